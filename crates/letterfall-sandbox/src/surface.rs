//! Drawing capability the sandbox renders through

use letterfall_core::{Color, Vec2};
use letterfall_physics::DebugShape;

/// A glyph drawn centered on a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphDraw {
    pub glyph: char,
    pub center: Vec2,
    /// Rotation in radians, matching the body
    pub angle: f32,
    pub size: f32,
    pub color: Color,
}

/// Something the sandbox can paint a frame onto.
///
/// Calls arrive in paint order: one `clear`, then engine shapes, then glyphs.
pub trait DisplaySurface {
    fn clear(&mut self, color: Color);
    fn draw_shape(&mut self, shape: &DebugShape);
    fn draw_glyph(&mut self, glyph: &GlyphDraw);
}

/// A recorded paint call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Shape(DebugShape),
    Glyph(GlyphDraw),
}

/// Surface that keeps every call, for headless runs and tests
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands since the most recent `clear`, inclusive
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear(_)))
            .unwrap_or(0);
        &self.commands[start..]
    }

    pub fn glyphs(&self) -> impl Iterator<Item = &GlyphDraw> {
        self.last_frame().iter().filter_map(|c| match c {
            DrawCommand::Glyph(g) => Some(g),
            _ => None,
        })
    }

    pub fn shapes(&self) -> impl Iterator<Item = &DebugShape> {
        self.last_frame().iter().filter_map(|c| match c {
            DrawCommand::Shape(s) => Some(s),
            _ => None,
        })
    }

    pub fn frames(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Clear(_)))
            .count()
    }

    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

impl DisplaySurface for RecordingSurface {
    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn draw_shape(&mut self, shape: &DebugShape) {
        self.commands.push(DrawCommand::Shape(*shape));
    }

    fn draw_glyph(&mut self, glyph: &GlyphDraw) {
        self.commands.push(DrawCommand::Glyph(*glyph));
    }
}
