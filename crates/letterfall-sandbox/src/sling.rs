//! Sling settings and the ranges of their live controls

use letterfall_core::{LetterfallError, Result};
use std::ops::RangeInclusive;

/// Range of the radius control
pub const RADIUS_RANGE: RangeInclusive<f32> = 50.0..=500.0;
/// Range of the power control
pub const POWER_RANGE: RangeInclusive<f32> = 0.05..=1.0;
/// Increment of the power control
pub const POWER_STEP: f32 = 0.05;

/// Radius and peak power of the click impulse.
///
/// Read fresh on every click; changing it only affects later clicks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlingConfig {
    radius: f32,
    power: f32,
}

impl Default for SlingConfig {
    fn default() -> Self {
        Self {
            radius: 200.0,
            power: 0.25,
        }
    }
}

impl SlingConfig {
    /// Both values must be positive and finite
    pub fn new(radius: f32, power: f32) -> Result<Self> {
        check_positive("sling.radius", radius)?;
        check_positive("sling.power", power)?;
        Ok(Self { radius, power })
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn power(&self) -> f32 {
        self.power
    }

    /// Set the radius as the radius control would, clamped to its range
    pub fn set_radius_control(&mut self, radius: f32) {
        if radius.is_finite() {
            self.radius = radius.clamp(*RADIUS_RANGE.start(), *RADIUS_RANGE.end());
        }
    }

    /// Set the power as the power control would, clamped and snapped to its step
    pub fn set_power_control(&mut self, power: f32) {
        if power.is_finite() {
            let snapped = (power / POWER_STEP).round() * POWER_STEP;
            self.power = snapped.clamp(*POWER_RANGE.start(), *POWER_RANGE.end());
        }
    }
}

fn check_positive(field: &str, value: f32) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(LetterfallError::ValueOutOfRange {
            field: field.to_string(),
            min: 0.0,
            max: f32::MAX as f64,
            value: value as f64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let sling = SlingConfig::default();
        assert_eq!(sling.radius(), 200.0);
        assert_eq!(sling.power(), 0.25);
    }

    #[test]
    fn test_new_rejects_non_positive() {
        assert!(SlingConfig::new(0.0, 0.25).is_err());
        assert!(SlingConfig::new(200.0, -0.1).is_err());
        assert!(SlingConfig::new(f32::NAN, 0.25).is_err());
        assert!(SlingConfig::new(10.0, 3.0).is_ok());
    }

    #[test]
    fn test_radius_control_clamps() {
        let mut sling = SlingConfig::default();
        sling.set_radius_control(10.0);
        assert_eq!(sling.radius(), 50.0);
        sling.set_radius_control(900.0);
        assert_eq!(sling.radius(), 500.0);
        sling.set_radius_control(f32::INFINITY);
        assert_eq!(sling.radius(), 500.0);
    }

    #[test]
    fn test_power_control_snaps() {
        let mut sling = SlingConfig::default();
        sling.set_power_control(0.33);
        assert!((sling.power() - 0.35).abs() < 1e-6);
        sling.set_power_control(0.0);
        assert!((sling.power() - 0.05).abs() < 1e-6);
        sling.set_power_control(4.0);
        assert!((sling.power() - 1.0).abs() < 1e-6);
    }
}
