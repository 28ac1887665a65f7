//! Letterfall Render - window surface and 2D paint pass
//!
//! The sandbox draws everything through egui shapes; this crate owns the
//! wgpu device and surface and submits egui's tessellated output each frame.

mod context;
mod egui_pass;

pub use context::{RenderContext, RenderError};
pub use egui_pass::EguiPass;
