//! Letterfall Player - windowed sandbox
//!
//! Provides the `PlayerApp` application handler, which runs the sandbox
//! against the rapier engine and paints it, together with its controls,
//! through egui.

pub mod controls;
mod painter_surface;
mod player_app;

pub use painter_surface::PainterSurface;
pub use player_app::{PlayerApp, PlayerOptions};
