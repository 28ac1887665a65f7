//! Letterfall Sandbox - the letter-drop coordinator
//!
//! Ties a `PhysicsEngine` to a `DisplaySurface`: text submissions become
//! falling letter bodies, clicks push nearby letters away, and every frame
//! paints the engine's shapes with each letter's glyph on top.

pub mod boundary;
pub mod config;
pub mod force_field;
pub mod overlay;
pub mod registry;
mod sandbox;
pub mod sling;
pub mod surface;

pub use boundary::StaticBoundary;
pub use config::SandboxConfig;
pub use force_field::{sling_impulse, SlingImpulse};
pub use overlay::{OverlayStats, OverlaySynchronizer};
pub use registry::{HitboxMode, LetterBody, LetterRegistry, LetterTemplate};
pub use sandbox::{FrameStats, Sandbox};
pub use sling::SlingConfig;
pub use surface::{DisplaySurface, DrawCommand, GlyphDraw, RecordingSurface};
