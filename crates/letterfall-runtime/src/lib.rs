//! Letterfall Runtime - Frame loop infrastructure
//!
//! Provides the building blocks the sandbox coordinator drives each frame:
//! - `FrameClock` - fixed-timestep accumulator for deterministic stepping
//! - `Lifecycle` - Running/Paused state machine gating simulated time
//! - `SandboxEvent` - user-triggered actions the coordinator dispatches
//! - `InputState` / `Shortcut` - pointer and keyboard shortcut tracking

mod clock;
mod event;
mod input;
mod lifecycle;

pub use clock::FrameClock;
pub use event::SandboxEvent;
pub use input::{InputState, Shortcut};
pub use lifecycle::{Lifecycle, SimulationState, Transition};
