//! Physics engine capability trait and body description types

use letterfall_core::{BodyTransform, Color, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to a body owned by a `PhysicsEngine`.
///
/// The generation half makes a handle go stale once its body is removed,
/// even if the engine later reuses the slot.
#[derive(Clone, Copy, Hash, Eq, PartialEq)]
pub struct BodyHandle {
    index: u32,
    generation: u32,
}

impl BodyHandle {
    pub fn from_raw_parts(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn into_raw_parts(self) -> (u32, u32) {
        (self.index, self.generation)
    }
}

impl fmt::Debug for BodyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BodyHandle({}v{})", self.index, self.generation)
    }
}

/// Whether a body moves under simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Dynamic,
    Static,
}

/// Surface material of a body's collider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            restitution: 0.0,
            friction: 0.5,
            density: 0.001,
        }
    }
}

/// Outline pen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

/// How the engine's default rendering shows a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyStyle {
    pub fill: Option<Color>,
    pub stroke: Stroke,
    pub stroke_visible: bool,
}

impl BodyStyle {
    /// Solid fill, no outline
    pub fn filled(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: Stroke {
                color,
                width: 0.0,
            },
            stroke_visible: false,
        }
    }

    /// Transparent body with a toggleable outline
    pub fn outlined(stroke: Stroke, visible: bool) -> Self {
        Self {
            fill: None,
            stroke,
            stroke_visible: visible,
        }
    }

    /// Whether default rendering has anything to draw for this style
    pub fn is_drawn(&self) -> bool {
        self.fill.is_some() || self.stroke_visible
    }
}

/// Everything needed to create an axis-aligned box body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDesc {
    pub kind: BodyKind,
    pub position: Vec2,
    pub half_extents: Vec2,
    pub material: Material,
    pub style: BodyStyle,
}

impl BodyDesc {
    pub fn dynamic_box(position: Vec2, size: Vec2, material: Material, style: BodyStyle) -> Self {
        Self {
            kind: BodyKind::Dynamic,
            position,
            half_extents: size * 0.5,
            material,
            style,
        }
    }

    pub fn static_box(position: Vec2, size: Vec2, style: BodyStyle) -> Self {
        Self {
            kind: BodyKind::Static,
            position,
            half_extents: size * 0.5,
            material: Material::default(),
            style,
        }
    }
}

/// A body as the engine's default rendering would draw it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugShape {
    pub transform: BodyTransform,
    pub half_extents: Vec2,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

impl DebugShape {
    /// Corners in surface space, clockwise on screen starting top-left
    pub fn corners(&self) -> [Vec2; 4] {
        let h = self.half_extents;
        [
            self.transform.apply(Vec2::new(-h.x, -h.y)),
            self.transform.apply(Vec2::new(h.x, -h.y)),
            self.transform.apply(Vec2::new(h.x, h.y)),
            self.transform.apply(Vec2::new(-h.x, h.y)),
        ]
    }
}

/// World-level tuning shared by engine implementations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Gravity in surface units per second squared (positive y is down)
    #[serde(default = "default_gravity")]
    pub gravity: [f32; 2],
    /// Multiplier turning a sling magnitude into an engine impulse
    #[serde(default = "default_impulse_scale")]
    pub impulse_scale: f32,
    /// Typical object size in surface units, used for solver tolerances
    #[serde(default = "default_length_unit")]
    pub length_unit: f32,
}

fn default_gravity() -> [f32; 2] {
    [0.0, 1000.0]
}
fn default_impulse_scale() -> f32 {
    16_667.0
}
fn default_length_unit() -> f32 {
    100.0
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            gravity: default_gravity(),
            impulse_scale: default_impulse_scale(),
            length_unit: default_length_unit(),
        }
    }
}

/// Capability interface over a 2D rigid-body engine.
///
/// All methods taking a handle tolerate stale handles: lookups return `None`
/// and mutations return `false`.
pub trait PhysicsEngine {
    /// Short identifier for logs
    fn name(&self) -> &str;

    /// Create a body with a single box collider
    fn create_body(&mut self, desc: &BodyDesc) -> BodyHandle;

    /// Remove a body and its collider. Returns false for stale handles.
    fn remove_body(&mut self, handle: BodyHandle) -> bool;

    /// Whether the handle refers to a live body
    fn contains(&self, handle: BodyHandle) -> bool;

    /// Advance simulated time by `dt` seconds
    fn step(&mut self, dt: f32);

    /// Current position and rotation
    fn transform(&self, handle: BodyHandle) -> Option<BodyTransform>;

    /// Current linear velocity
    fn velocity(&self, handle: BodyHandle) -> Option<Vec2>;

    /// Whether the body is static
    fn is_static(&self, handle: BodyHandle) -> Option<bool>;

    /// Apply an instantaneous impulse at a surface-space point
    fn apply_impulse(&mut self, handle: BodyHandle, impulse: Vec2, point: Vec2) -> bool;

    /// Show or hide the body's outline in default rendering
    fn set_outline_visible(&mut self, handle: BodyHandle, visible: bool) -> bool;

    /// Shapes the engine's default rendering draws this frame
    fn shapes(&self) -> Vec<DebugShape>;

    /// Number of live bodies, static ones included
    fn body_count(&self) -> usize;

    /// Remove every body
    fn clear(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_raw_parts() {
        let h = BodyHandle::from_raw_parts(4, 2);
        assert_eq!(h.into_raw_parts(), (4, 2));
        assert_ne!(h, BodyHandle::from_raw_parts(4, 3));
    }

    #[test]
    fn test_desc_halves_size() {
        let desc = BodyDesc::static_box(
            Vec2::new(0.0, 0.0),
            Vec2::new(50.0, 100.0),
            BodyStyle::filled(Color::WHITE),
        );
        assert_eq!(desc.half_extents, Vec2::new(25.0, 50.0));
        assert_eq!(desc.kind, BodyKind::Static);
    }

    #[test]
    fn test_style_visibility() {
        let stroke = Stroke {
            color: Color::RED,
            width: 2.0,
        };
        assert!(!BodyStyle::outlined(stroke, false).is_drawn());
        assert!(BodyStyle::outlined(stroke, true).is_drawn());
        assert!(BodyStyle::filled(Color::BLACK).is_drawn());
    }

    #[test]
    fn test_shape_corners_unrotated() {
        let shape = DebugShape {
            transform: BodyTransform::new(Vec2::new(100.0, 50.0), 0.0),
            half_extents: Vec2::new(10.0, 5.0),
            fill: None,
            stroke: None,
        };
        let c = shape.corners();
        assert_eq!(c[0], Vec2::new(90.0, 45.0));
        assert_eq!(c[2], Vec2::new(110.0, 55.0));
    }

    #[test]
    fn test_settings_defaults() {
        let s = EngineSettings::default();
        assert_eq!(s.gravity, [0.0, 1000.0]);
        assert!(s.impulse_scale > 0.0);
    }
}
