//! Physics engine backed by Rapier 2D

use crate::engine::{
    BodyDesc, BodyHandle, BodyKind, BodyStyle, DebugShape, EngineSettings, PhysicsEngine,
};
use letterfall_core::{BodyTransform, Vec2};
use rapier2d::prelude::*;
use std::collections::HashMap;

/// Per-body data rapier has no slot for
#[derive(Debug, Clone, Copy)]
struct BodyMeta {
    half_extents: Vec2,
    style: BodyStyle,
}

/// Wraps Rapier's physics pipeline and body/collider sets
pub struct RapierEngine {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub gravity: Vector<Real>,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
    pub query_pipeline: QueryPipeline,

    impulse_scale: f32,
    meta: HashMap<RigidBodyHandle, BodyMeta>,
}

impl RapierEngine {
    /// Create an empty world with the given tuning
    pub fn new(settings: EngineSettings) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.length_unit = settings.length_unit;

        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            gravity: vector![settings.gravity[0], settings.gravity[1]],
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            impulse_scale: settings.impulse_scale,
            meta: HashMap::new(),
        }
    }

    /// Angular velocity in radians per second
    pub fn angular_velocity(&self, handle: BodyHandle) -> Option<f32> {
        self.get_rigid_body(handle).map(|rb| rb.angvel())
    }

    fn get_rigid_body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(to_rapier(handle))
    }

    fn get_rigid_body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(to_rapier(handle))
    }
}

impl Default for RapierEngine {
    fn default() -> Self {
        Self::new(EngineSettings::default())
    }
}

fn to_rapier(handle: BodyHandle) -> RigidBodyHandle {
    let (index, generation) = handle.into_raw_parts();
    RigidBodyHandle::from_raw_parts(index, generation)
}

fn from_rapier(handle: RigidBodyHandle) -> BodyHandle {
    let (index, generation) = handle.into_raw_parts();
    BodyHandle::from_raw_parts(index, generation)
}

fn transform_of(rb: &RigidBody) -> BodyTransform {
    let t = rb.translation();
    BodyTransform::new(Vec2::new(t.x, t.y), rb.rotation().angle())
}

impl PhysicsEngine for RapierEngine {
    fn name(&self) -> &str {
        "rapier2d"
    }

    fn create_body(&mut self, desc: &BodyDesc) -> BodyHandle {
        let builder = match desc.kind {
            BodyKind::Dynamic => RigidBodyBuilder::dynamic().ccd_enabled(true),
            BodyKind::Static => RigidBodyBuilder::fixed(),
        };
        let body = builder
            .translation(vector![desc.position.x, desc.position.y])
            .build();
        let handle = self.rigid_body_set.insert(body);

        let collider = ColliderBuilder::cuboid(desc.half_extents.x, desc.half_extents.y)
            .restitution(desc.material.restitution)
            .restitution_combine_rule(CoefficientCombineRule::Max)
            .friction(desc.material.friction)
            .density(desc.material.density)
            .build();
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);

        self.meta.insert(
            handle,
            BodyMeta {
                half_extents: desc.half_extents,
                style: desc.style,
            },
        );

        from_rapier(handle)
    }

    fn remove_body(&mut self, handle: BodyHandle) -> bool {
        let handle = to_rapier(handle);
        self.meta.remove(&handle);
        self.rigid_body_set
            .remove(
                handle,
                &mut self.island_manager,
                &mut self.collider_set,
                &mut self.impulse_joint_set,
                &mut self.multibody_joint_set,
                true,
            )
            .is_some()
    }

    fn contains(&self, handle: BodyHandle) -> bool {
        self.rigid_body_set.contains(to_rapier(handle))
    }

    fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    fn transform(&self, handle: BodyHandle) -> Option<BodyTransform> {
        self.get_rigid_body(handle).map(transform_of)
    }

    fn velocity(&self, handle: BodyHandle) -> Option<Vec2> {
        self.get_rigid_body(handle).map(|rb| {
            let v = rb.linvel();
            Vec2::new(v.x, v.y)
        })
    }

    fn is_static(&self, handle: BodyHandle) -> Option<bool> {
        self.get_rigid_body(handle).map(|rb| rb.is_fixed())
    }

    fn apply_impulse(&mut self, handle: BodyHandle, impulse: Vec2, point: Vec2) -> bool {
        let scale = self.impulse_scale;
        match self.get_rigid_body_mut(handle) {
            Some(rb) => {
                rb.apply_impulse_at_point(
                    vector![impulse.x * scale, impulse.y * scale],
                    point![point.x, point.y],
                    true,
                );
                true
            }
            None => false,
        }
    }

    fn set_outline_visible(&mut self, handle: BodyHandle, visible: bool) -> bool {
        match self.meta.get_mut(&to_rapier(handle)) {
            Some(meta) => {
                meta.style.stroke_visible = visible;
                true
            }
            None => false,
        }
    }

    fn shapes(&self) -> Vec<DebugShape> {
        self.rigid_body_set
            .iter()
            .filter_map(|(handle, rb)| {
                let meta = self.meta.get(&handle)?;
                if !meta.style.is_drawn() {
                    return None;
                }
                Some(DebugShape {
                    transform: transform_of(rb),
                    half_extents: meta.half_extents,
                    fill: meta.style.fill,
                    stroke: meta.style.stroke_visible.then_some(meta.style.stroke),
                })
            })
            .collect()
    }

    fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }

    fn clear(&mut self) {
        let handles: Vec<RigidBodyHandle> =
            self.rigid_body_set.iter().map(|(handle, _)| handle).collect();
        let count = handles.len();
        for handle in handles {
            self.remove_body(from_rapier(handle));
        }
        log::debug!("rapier2d: cleared {count} bodies");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Material, Stroke};
    use letterfall_core::Color;

    fn letter_desc(x: f32, y: f32) -> BodyDesc {
        BodyDesc::dynamic_box(
            Vec2::new(x, y),
            Vec2::new(45.0, 50.0),
            Material {
                restitution: 1.0,
                friction: 0.05,
                density: 0.001,
            },
            BodyStyle::outlined(
                Stroke {
                    color: Color::RED,
                    width: 2.0,
                },
                false,
            ),
        )
    }

    #[test]
    fn test_create_engine() {
        let engine = RapierEngine::default();
        assert_eq!(engine.body_count(), 0);
        assert_eq!(engine.collider_set.len(), 0);
        assert_eq!(engine.name(), "rapier2d");
    }

    #[test]
    fn test_create_body_with_collider() {
        let mut engine = RapierEngine::default();
        let handle = engine.create_body(&letter_desc(100.0, -50.0));

        assert!(engine.contains(handle));
        assert_eq!(engine.body_count(), 1);
        assert_eq!(engine.collider_set.len(), 1);
        assert_eq!(engine.is_static(handle), Some(false));
        let t = engine.transform(handle).unwrap();
        assert_eq!(t.position, Vec2::new(100.0, -50.0));
    }

    #[test]
    fn test_gravity_pulls_down_screen() {
        let mut engine = RapierEngine::default();
        let handle = engine.create_body(&letter_desc(100.0, 0.0));

        for _ in 0..30 {
            engine.step(1.0 / 60.0);
        }

        let t = engine.transform(handle).unwrap();
        assert!(t.position.y > 0.0, "y-down gravity should increase y");
        assert!(engine.velocity(handle).unwrap().y > 0.0);
    }

    #[test]
    fn test_static_body_does_not_move() {
        let mut engine = RapierEngine::default();
        let ground = engine.create_body(&BodyDesc::static_box(
            Vec2::new(400.0, 670.0),
            Vec2::new(800.0, 100.0),
            BodyStyle::filled(Color::from_hex(0x555555)),
        ));

        engine.apply_impulse(ground, Vec2::new(0.0, -1.0), Vec2::new(400.0, 670.0));
        for _ in 0..30 {
            engine.step(1.0 / 60.0);
        }

        assert_eq!(engine.is_static(ground), Some(true));
        assert_eq!(
            engine.transform(ground).unwrap().position,
            Vec2::new(400.0, 670.0)
        );
    }

    #[test]
    fn test_impulse_changes_velocity() {
        let mut engine = RapierEngine::new(EngineSettings {
            gravity: [0.0, 0.0],
            ..EngineSettings::default()
        });
        let handle = engine.create_body(&letter_desc(100.0, 100.0));
        // Mass properties settle on the first step
        engine.step(1.0 / 60.0);

        assert!(engine.apply_impulse(handle, Vec2::new(0.25, 0.0), Vec2::new(100.0, 100.0)));
        let v = engine.velocity(handle).unwrap();
        assert!(v.x > 0.0);
        assert!(v.y.abs() < 1e-3);
    }

    #[test]
    fn test_removed_handle_is_stale() {
        let mut engine = RapierEngine::default();
        let handle = engine.create_body(&letter_desc(0.0, 0.0));

        assert!(engine.remove_body(handle));
        assert!(!engine.contains(handle));
        assert!(engine.transform(handle).is_none());
        assert!(!engine.apply_impulse(handle, Vec2::ONE, Vec2::ZERO));
        assert!(!engine.set_outline_visible(handle, true));
        assert!(!engine.remove_body(handle));
        assert_eq!(engine.collider_set.len(), 0);
    }

    #[test]
    fn test_shapes_follow_outline_flag() {
        let mut engine = RapierEngine::default();
        let handle = engine.create_body(&letter_desc(0.0, 0.0));
        assert!(engine.shapes().is_empty());

        engine.set_outline_visible(handle, true);
        let shapes = engine.shapes();
        assert_eq!(shapes.len(), 1);
        assert!(shapes[0].stroke.is_some());
        assert!(shapes[0].fill.is_none());
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut engine = RapierEngine::default();
        engine.create_body(&letter_desc(0.0, 0.0));
        engine.create_body(&letter_desc(50.0, 0.0));
        engine.clear();
        assert_eq!(engine.body_count(), 0);
        assert_eq!(engine.collider_set.len(), 0);
        assert!(engine.shapes().is_empty());
    }
}
