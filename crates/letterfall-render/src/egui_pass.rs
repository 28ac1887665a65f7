//! egui paint pass

use crate::context::RenderContext;
use letterfall_core::Color;

/// Uploads egui textures and buffers and draws one frame's paint jobs
pub struct EguiPass {
    renderer: egui_wgpu::Renderer,
}

impl EguiPass {
    pub fn new(context: &RenderContext) -> Self {
        let renderer =
            egui_wgpu::Renderer::new(&context.device, context.config.format, None, 1, false);
        Self { renderer }
    }

    /// Clear `target` to `clear` and paint `output` over it
    pub fn paint(
        &mut self,
        context: &RenderContext,
        egui_ctx: &egui::Context,
        output: egui::FullOutput,
        target: &wgpu::TextureView,
        clear: Color,
    ) {
        let paint_jobs = egui_ctx.tessellate(output.shapes, output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [context.config.width, context.config.height],
            pixels_per_point: output.pixels_per_point,
        };

        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui Encoder"),
            });

        for (id, image_delta) in &output.textures_delta.set {
            self.renderer
                .update_texture(&context.device, &context.queue, *id, image_delta);
        }

        let extra = self.renderer.update_buffers(
            &context.device,
            &context.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(to_wgpu(clear)),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let mut render_pass = render_pass.forget_lifetime();
            self.renderer
                .render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        context.queue.submit(
            extra
                .into_iter()
                .chain(std::iter::once(encoder.finish())),
        );

        for id in &output.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}

fn to_wgpu(color: Color) -> wgpu::Color {
    wgpu::Color {
        r: color.r as f64,
        g: color.g as f64,
        b: color.b as f64,
        a: color.a as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_color_conversion() {
        let c = to_wgpu(Color::from_hex(0x333333));
        assert!((c.r - 0.2).abs() < 1e-6);
        assert_eq!(c.a, 1.0);
    }
}
