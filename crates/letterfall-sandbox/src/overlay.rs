//! Glyph overlay drawn over the engine's own shapes

use crate::registry::LetterBody;
use crate::surface::{DisplaySurface, GlyphDraw};
use letterfall_core::{BodyTransform, Color, LetterfallError, Result};
use letterfall_physics::PhysicsEngine;

/// Counts from one overlay pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayStats {
    pub drawn: usize,
    pub skipped: usize,
}

/// Draws each letter's glyph at its body's current pose
#[derive(Debug, Clone, Copy)]
pub struct OverlaySynchronizer {
    pub glyph_size: f32,
    pub color: Color,
}

impl Default for OverlaySynchronizer {
    fn default() -> Self {
        Self {
            glyph_size: 60.0,
            color: Color::WHITE,
        }
    }
}

impl OverlaySynchronizer {
    pub fn new(glyph_size: f32, color: Color) -> Self {
        Self { glyph_size, color }
    }

    /// Draw every letter in the snapshot. Letters whose body is gone are
    /// skipped and counted, never reported as errors.
    pub fn draw<E, S>(&self, letters: &[LetterBody], engine: &E, surface: &mut S) -> OverlayStats
    where
        E: PhysicsEngine + ?Sized,
        S: DisplaySurface + ?Sized,
    {
        let mut stats = OverlayStats::default();
        for letter in letters {
            match pose(letter, engine) {
                Ok(transform) => {
                    surface.draw_glyph(&GlyphDraw {
                        glyph: letter.glyph,
                        center: transform.position,
                        angle: transform.angle,
                        size: self.glyph_size,
                        color: self.color,
                    });
                    stats.drawn += 1;
                }
                Err(err) => {
                    log::trace!("Overlay skipped: {err}");
                    stats.skipped += 1;
                }
            }
        }
        stats
    }
}

fn pose<E: PhysicsEngine + ?Sized>(letter: &LetterBody, engine: &E) -> Result<BodyTransform> {
    engine
        .transform(letter.handle)
        .ok_or(LetterfallError::StaleHandle(letter.id))
}
