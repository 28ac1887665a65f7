//! Frame clock with fixed-timestep accumulator

use std::time::Instant;

/// Longest frame the clock will account for, in seconds
const MAX_FRAME_TIME: f64 = 0.25;

/// Tracks frame time and hands out fixed simulation steps
pub struct FrameClock {
    /// Total elapsed frame time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    /// Fixed timestep interval (default: 1/60 second)
    pub fixed_timestep: f64,
    accumulator: f64,
    last_instant: Option<Instant>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            fixed_timestep: 1.0 / 60.0,
            accumulator: 0.0,
            last_instant: None,
        }
    }
}

impl FrameClock {
    /// Create a new clock with the default 60Hz fixed timestep
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock with a custom fixed step rate
    pub fn with_fixed_timestep(hz: f64) -> Self {
        Self {
            fixed_timestep: 1.0 / hz,
            ..Self::default()
        }
    }

    /// Advance by wall-clock time. Call once per frame; the first call yields zero.
    pub fn tick(&mut self) {
        let now = Instant::now();
        let elapsed = match self.last_instant.replace(now) {
            Some(last) => now.duration_since(last).as_secs_f64(),
            None => 0.0,
        };
        self.advance(elapsed);
    }

    /// Advance by an explicit amount of time
    pub fn advance(&mut self, elapsed: f64) {
        // Clamp to avoid spiral of death
        self.delta_time = elapsed.clamp(0.0, MAX_FRAME_TIME);
        self.total_time += self.delta_time;
        self.accumulator += self.delta_time;
    }

    /// Returns true if there's enough accumulated time for a fixed step
    pub fn should_fixed_update(&self) -> bool {
        self.accumulator >= self.fixed_timestep
    }

    /// Consume one fixed timestep from the accumulator
    pub fn consume_fixed_step(&mut self) {
        self.accumulator -= self.fixed_timestep;
    }

    /// Drop accumulated time that has not been stepped yet.
    ///
    /// Called while the simulation is paused so that resuming does not
    /// replay the paused interval.
    pub fn discard_backlog(&mut self) {
        self.accumulator = 0.0;
    }

    /// Accumulated time not yet consumed, in seconds
    pub fn backlog(&self) -> f64 {
        self.accumulator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_defaults() {
        let clock = FrameClock::new();
        assert!((clock.fixed_timestep - 1.0 / 60.0).abs() < 1e-10);
        assert_eq!(clock.total_time, 0.0);
        assert_eq!(clock.delta_time, 0.0);
    }

    #[test]
    fn test_custom_timestep() {
        let clock = FrameClock::with_fixed_timestep(30.0);
        assert!((clock.fixed_timestep - 1.0 / 30.0).abs() < 1e-10);
    }

    #[test]
    fn test_first_tick_zero_delta() {
        let mut clock = FrameClock::new();
        clock.tick();
        assert_eq!(clock.delta_time, 0.0);
        assert!(!clock.should_fixed_update());
    }

    #[test]
    fn test_accumulator_logic() {
        let mut clock = FrameClock::new();
        clock.advance(1.0 / 30.0);

        assert!(clock.should_fixed_update());
        clock.consume_fixed_step();
        assert!(clock.should_fixed_update());
        clock.consume_fixed_step();
        assert!(!clock.should_fixed_update());
    }

    #[test]
    fn test_advance_is_clamped() {
        let mut clock = FrameClock::new();
        clock.advance(5.0);
        assert!((clock.delta_time - MAX_FRAME_TIME).abs() < 1e-12);
        clock.advance(-1.0);
        assert_eq!(clock.delta_time, 0.0);
    }

    #[test]
    fn test_discard_backlog() {
        let mut clock = FrameClock::new();
        clock.advance(0.2);
        assert!(clock.backlog() > 0.0);
        clock.discard_backlog();
        assert_eq!(clock.backlog(), 0.0);
        assert!(!clock.should_fixed_update());
        assert!((clock.total_time - 0.2).abs() < 1e-12);
    }
}
