//! Mock engine for testing
//!
//! Integrates gravity and velocity without collision response and records
//! every impulse it receives, so coordinator behaviour can be asserted
//! exactly.

use crate::engine::{
    BodyDesc, BodyHandle, BodyKind, BodyStyle, DebugShape, EngineSettings, PhysicsEngine,
};
use letterfall_core::{BodyTransform, Vec2};

#[derive(Debug, Clone)]
struct MockBody {
    kind: BodyKind,
    transform: BodyTransform,
    velocity: Vec2,
    half_extents: Vec2,
    mass: f32,
    style: BodyStyle,
    impulses: Vec<(Vec2, Vec2)>,
}

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    body: Option<MockBody>,
}

/// A deterministic engine that moves bodies kinematically
#[derive(Debug, Clone, Default)]
pub struct MockEngine {
    gravity: Vec2,
    slots: Vec<Slot>,
    free: Vec<u32>,
    steps: u64,
    simulated_time: f64,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with gravity taken from settings
    pub fn with_settings(settings: EngineSettings) -> Self {
        Self {
            gravity: Vec2::from_array(settings.gravity),
            ..Self::default()
        }
    }

    pub fn with_gravity(gravity: Vec2) -> Self {
        Self {
            gravity,
            ..Self::default()
        }
    }

    /// Number of `step` calls so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Total simulated seconds
    pub fn simulated_time(&self) -> f64 {
        self.simulated_time
    }

    /// Impulses applied to a body as `(impulse, point)` pairs, oldest first
    pub fn impulses(&self, handle: BodyHandle) -> &[(Vec2, Vec2)] {
        self.get(handle)
            .map(|b| b.impulses.as_slice())
            .unwrap_or(&[])
    }

    /// Current outline visibility
    pub fn outline_visible(&self, handle: BodyHandle) -> Option<bool> {
        self.get(handle).map(|b| b.style.stroke_visible)
    }

    /// Overwrite a body's position, for arranging test scenes
    pub fn place(&mut self, handle: BodyHandle, position: Vec2) -> bool {
        match self.get_mut(handle) {
            Some(body) => {
                body.transform.position = position;
                true
            }
            None => false,
        }
    }

    fn get(&self, handle: BodyHandle) -> Option<&MockBody> {
        let (index, generation) = handle.into_raw_parts();
        let slot = self.slots.get(index as usize)?;
        if slot.generation != generation {
            return None;
        }
        slot.body.as_ref()
    }

    fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut MockBody> {
        let (index, generation) = handle.into_raw_parts();
        let slot = self.slots.get_mut(index as usize)?;
        if slot.generation != generation {
            return None;
        }
        slot.body.as_mut()
    }

    fn live(&self) -> impl Iterator<Item = &MockBody> {
        self.slots.iter().filter_map(|s| s.body.as_ref())
    }
}

impl PhysicsEngine for MockEngine {
    fn name(&self) -> &str {
        "mock"
    }

    fn create_body(&mut self, desc: &BodyDesc) -> BodyHandle {
        let area = desc.half_extents.x * desc.half_extents.y * 4.0;
        let body = MockBody {
            kind: desc.kind,
            transform: BodyTransform::new(desc.position, 0.0),
            velocity: Vec2::ZERO,
            half_extents: desc.half_extents,
            mass: (area * desc.material.density).max(f32::EPSILON),
            style: desc.style,
            impulses: Vec::new(),
        };

        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.body = Some(body);
                BodyHandle::from_raw_parts(index, slot.generation)
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    body: Some(body),
                });
                BodyHandle::from_raw_parts(self.slots.len() as u32 - 1, 0)
            }
        }
    }

    fn remove_body(&mut self, handle: BodyHandle) -> bool {
        if self.get(handle).is_none() {
            return false;
        }
        let (index, _) = handle.into_raw_parts();
        let slot = &mut self.slots[index as usize];
        slot.body = None;
        slot.generation += 1;
        self.free.push(index);
        true
    }

    fn contains(&self, handle: BodyHandle) -> bool {
        self.get(handle).is_some()
    }

    fn step(&mut self, dt: f32) {
        let gravity = self.gravity;
        for body in self.slots.iter_mut().filter_map(|s| s.body.as_mut()) {
            if body.kind == BodyKind::Static {
                continue;
            }
            body.velocity = body.velocity + gravity * dt;
            body.transform.position = body.transform.position + body.velocity * dt;
        }
        self.steps += 1;
        self.simulated_time += dt as f64;
    }

    fn transform(&self, handle: BodyHandle) -> Option<BodyTransform> {
        self.get(handle).map(|b| b.transform)
    }

    fn velocity(&self, handle: BodyHandle) -> Option<Vec2> {
        self.get(handle).map(|b| b.velocity)
    }

    fn is_static(&self, handle: BodyHandle) -> Option<bool> {
        self.get(handle).map(|b| b.kind == BodyKind::Static)
    }

    fn apply_impulse(&mut self, handle: BodyHandle, impulse: Vec2, point: Vec2) -> bool {
        match self.get_mut(handle) {
            Some(body) => {
                body.impulses.push((impulse, point));
                if body.kind == BodyKind::Dynamic {
                    body.velocity = body.velocity + impulse / body.mass;
                }
                true
            }
            None => false,
        }
    }

    fn set_outline_visible(&mut self, handle: BodyHandle, visible: bool) -> bool {
        match self.get_mut(handle) {
            Some(body) => {
                body.style.stroke_visible = visible;
                true
            }
            None => false,
        }
    }

    fn shapes(&self) -> Vec<DebugShape> {
        self.live()
            .filter(|b| b.style.is_drawn())
            .map(|b| DebugShape {
                transform: b.transform,
                half_extents: b.half_extents,
                fill: b.style.fill,
                stroke: b.style.stroke_visible.then_some(b.style.stroke),
            })
            .collect()
    }

    fn body_count(&self) -> usize {
        self.live().count()
    }

    fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.body.take().is_some() {
                slot.generation += 1;
                self.free.push(index as u32);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Material;
    use letterfall_core::Color;

    fn dynamic_at(x: f32, y: f32) -> BodyDesc {
        BodyDesc::dynamic_box(
            Vec2::new(x, y),
            Vec2::new(10.0, 10.0),
            Material {
                restitution: 1.0,
                friction: 0.05,
                density: 0.01,
            },
            BodyStyle::filled(Color::WHITE),
        )
    }

    #[test]
    fn test_reused_slot_invalidates_old_handle() {
        let mut engine = MockEngine::new();
        let first = engine.create_body(&dynamic_at(0.0, 0.0));
        engine.remove_body(first);
        let second = engine.create_body(&dynamic_at(5.0, 5.0));

        assert_eq!(first.into_raw_parts().0, second.into_raw_parts().0);
        assert!(!engine.contains(first));
        assert!(engine.contains(second));
        assert!(engine.transform(first).is_none());
    }

    #[test]
    fn test_step_integrates_gravity() {
        let mut engine = MockEngine::with_gravity(Vec2::new(0.0, 10.0));
        let h = engine.create_body(&dynamic_at(0.0, 0.0));
        engine.step(1.0);
        assert_eq!(engine.velocity(h), Some(Vec2::new(0.0, 10.0)));
        assert_eq!(engine.transform(h).unwrap().position, Vec2::new(0.0, 10.0));
        assert_eq!(engine.steps(), 1);
    }

    #[test]
    fn test_impulse_divides_by_mass() {
        let mut engine = MockEngine::new();
        let h = engine.create_body(&dynamic_at(0.0, 0.0));
        // 10x10 box at density 0.01 weighs 1
        engine.apply_impulse(h, Vec2::new(2.0, 0.0), Vec2::ZERO);
        let v = engine.velocity(h).unwrap();
        assert!((v.x - 2.0).abs() < 1e-4);
        assert_eq!(v.y, 0.0);
        assert_eq!(engine.impulses(h).len(), 1);
    }

    #[test]
    fn test_static_ignores_gravity_and_impulse() {
        let mut engine = MockEngine::with_gravity(Vec2::new(0.0, 10.0));
        let h = engine.create_body(&BodyDesc::static_box(
            Vec2::new(1.0, 1.0),
            Vec2::new(4.0, 4.0),
            BodyStyle::filled(Color::BLACK),
        ));
        engine.apply_impulse(h, Vec2::new(5.0, 5.0), Vec2::ZERO);
        engine.step(1.0);
        assert_eq!(engine.transform(h).unwrap().position, Vec2::new(1.0, 1.0));
        assert_eq!(engine.is_static(h), Some(true));
    }

    #[test]
    fn test_clear() {
        let mut engine = MockEngine::new();
        let h = engine.create_body(&dynamic_at(0.0, 0.0));
        engine.create_body(&dynamic_at(1.0, 0.0));
        engine.clear();
        assert_eq!(engine.body_count(), 0);
        assert!(!engine.contains(h));
    }
}
