//! Ground and side walls that keep letters on screen

use crate::config::BoundaryConfig;
use letterfall_core::{Color, Vec2};
use letterfall_physics::{BodyDesc, BodyHandle, BodyStyle, PhysicsEngine};

/// The three static bodies created once per sandbox
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticBoundary {
    pub ground: BodyHandle,
    pub left_wall: BodyHandle,
    pub right_wall: BodyHandle,
}

impl StaticBoundary {
    /// Ground along the bottom edge, walls just outside the left and right
    /// edges. The ground's top face sits `ground_height / 2` above the bottom.
    pub fn create<E: PhysicsEngine + ?Sized>(
        width: f32,
        height: f32,
        config: &BoundaryConfig,
        engine: &mut E,
    ) -> Self {
        let style = BodyStyle::filled(Color::from_hex(config.color));
        let half_ground = config.ground_height * 0.5;
        let half_wall = config.wall_thickness * 0.5;

        let ground = engine.create_body(&BodyDesc::static_box(
            Vec2::new(width * 0.5, height - half_ground),
            Vec2::new(width, config.ground_height),
            style,
        ));
        let left_wall = engine.create_body(&BodyDesc::static_box(
            Vec2::new(-half_wall, height * 0.5),
            Vec2::new(config.wall_thickness, height),
            style,
        ));
        let right_wall = engine.create_body(&BodyDesc::static_box(
            Vec2::new(width + half_wall, height * 0.5),
            Vec2::new(config.wall_thickness, height),
            style,
        ));

        log::debug!("Boundary created for {width}x{height} surface");
        Self {
            ground,
            left_wall,
            right_wall,
        }
    }

    pub fn handles(&self) -> [BodyHandle; 3] {
        [self.ground, self.left_wall, self.right_wall]
    }

    /// All three bodies still exist and are static
    pub fn is_intact<E: PhysicsEngine + ?Sized>(&self, engine: &E) -> bool {
        self.handles()
            .iter()
            .all(|h| engine.is_static(*h) == Some(true))
    }

    pub fn remove<E: PhysicsEngine + ?Sized>(&self, engine: &mut E) {
        for handle in self.handles() {
            engine.remove_body(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use letterfall_physics::MockEngine;

    #[test]
    fn test_layout_matches_surface() {
        let mut engine = MockEngine::new();
        let boundary = StaticBoundary::create(800.0, 600.0, &BoundaryConfig::default(), &mut engine);

        let ground = engine.transform(boundary.ground).unwrap().position;
        let left = engine.transform(boundary.left_wall).unwrap().position;
        let right = engine.transform(boundary.right_wall).unwrap().position;
        assert_eq!(ground, Vec2::new(400.0, 550.0));
        assert_eq!(left, Vec2::new(-25.0, 300.0));
        assert_eq!(right, Vec2::new(825.0, 300.0));
        assert_eq!(engine.body_count(), 3);
        assert!(boundary.is_intact(&engine));
    }

    #[test]
    fn test_boundary_is_drawn_filled() {
        let mut engine = MockEngine::new();
        StaticBoundary::create(400.0, 300.0, &BoundaryConfig::default(), &mut engine);
        let shapes = engine.shapes();
        assert_eq!(shapes.len(), 3);
        assert!(shapes
            .iter()
            .all(|s| s.fill == Some(Color::from_hex(0x555555))));
    }

    #[test]
    fn test_remove_breaks_boundary() {
        let mut engine = MockEngine::new();
        let boundary = StaticBoundary::create(400.0, 300.0, &BoundaryConfig::default(), &mut engine);
        boundary.remove(&mut engine);
        assert!(!boundary.is_intact(&engine));
        assert_eq!(engine.body_count(), 0);
    }
}
