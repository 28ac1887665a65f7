//! Letterfall Physics - 2D rigid-body engine adapter
//!
//! The sandbox never talks to a physics library directly. It drives a
//! `PhysicsEngine`:
//! - `PhysicsEngine` - create/remove bodies, step, read transforms, apply impulses
//! - `RapierEngine` - rapier2d-backed implementation used by the player and CLI
//! - `MockEngine` - deterministic kinematic stand-in that records impulses

mod engine;
pub mod mock;
pub mod world;

pub use engine::{
    BodyDesc, BodyHandle, BodyKind, BodyStyle, DebugShape, EngineSettings, Material,
    PhysicsEngine, Stroke,
};
pub use mock::MockEngine;
pub use world::RapierEngine;
