//! `DisplaySurface` over an egui painter

use letterfall_core::{Color, Vec2};
use letterfall_physics::DebugShape;
use letterfall_sandbox::{DisplaySurface, GlyphDraw};

/// Paints sandbox frames with egui shapes. Sandbox units map 1:1 to egui
/// points, offset by the painter's top-left corner.
pub struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    origin: egui::Pos2,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a egui::Painter) -> Self {
        Self {
            painter,
            origin: painter.clip_rect().min,
        }
    }

    fn pos(&self, v: Vec2) -> egui::Pos2 {
        egui::pos2(self.origin.x + v.x, self.origin.y + v.y)
    }
}

pub(crate) fn color32(color: Color) -> egui::Color32 {
    let [r, g, b, a] = color.to_rgba8();
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

impl DisplaySurface for PainterSurface<'_> {
    fn clear(&mut self, color: Color) {
        self.painter
            .rect_filled(self.painter.clip_rect(), 0.0, color32(color));
    }

    fn draw_shape(&mut self, shape: &DebugShape) {
        let points: Vec<egui::Pos2> = shape.corners().iter().map(|c| self.pos(*c)).collect();
        if let Some(fill) = shape.fill {
            self.painter.add(egui::Shape::convex_polygon(
                points.clone(),
                color32(fill),
                egui::Stroke::NONE,
            ));
        }
        if let Some(stroke) = shape.stroke {
            self.painter.add(egui::Shape::closed_line(
                points,
                egui::Stroke::new(stroke.width, color32(stroke.color)),
            ));
        }
    }

    fn draw_glyph(&mut self, glyph: &GlyphDraw) {
        let galley = self.painter.layout_no_wrap(
            glyph.glyph.to_string(),
            egui::FontId::proportional(glyph.size),
            color32(glyph.color),
        );
        // Text shapes rotate about their top-left corner
        let half = galley.size() * 0.5;
        let top_left = glyph.center + Vec2::new(-half.x, -half.y).rotated(glyph.angle);
        let text = egui::epaint::TextShape::new(self.pos(top_left), galley, color32(glyph.color))
            .with_angle(glyph.angle);
        self.painter.add(text);
    }
}
