//! Player application implementing winit ApplicationHandler
//!
//! Runs the sandbox frame loop against the rapier engine and paints each
//! frame, controls included, with a single egui pass.

use crate::controls::{controls_ui, ControlsState};
use crate::painter_surface::PainterSurface;
use letterfall_core::{Color, LetterfallError, Result, Vec2};
use letterfall_physics::RapierEngine;
use letterfall_render::{EguiPass, RenderContext};
use letterfall_runtime::{InputState, SandboxEvent, Shortcut};
use letterfall_sandbox::{Sandbox, SandboxConfig, SlingConfig};
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::PhysicalKey;
use winit::window::{Fullscreen, Window, WindowId};

/// Window options chosen on the command line
#[derive(Debug, Clone, Default)]
pub struct PlayerOptions {
    pub fullscreen: bool,
}

pub struct PlayerApp {
    config: SandboxConfig,
    options: PlayerOptions,

    // Sandbox and its inputs
    sandbox: Option<Sandbox<RapierEngine>>,
    input: InputState,
    controls: ControlsState,

    // Rendering
    window: Option<Arc<Window>>,
    render_context: Option<RenderContext>,
    egui_ctx: egui::Context,
    egui_winit: Option<egui_winit::State>,
    egui_pass: Option<EguiPass>,

    failure: Option<LetterfallError>,
}

impl PlayerApp {
    pub fn new(config: SandboxConfig, options: PlayerOptions) -> Self {
        let sling = SlingConfig::new(config.sling.radius, config.sling.power).unwrap_or_default();
        Self {
            config,
            options,
            sandbox: None,
            input: InputState::new(),
            controls: ControlsState::new(sling),
            window: None,
            render_context: None,
            egui_ctx: egui::Context::default(),
            egui_winit: None,
            egui_pass: None,
            failure: None,
        }
    }

    /// The error that stopped the player, if any
    pub fn take_failure(&mut self) -> Option<LetterfallError> {
        self.failure.take()
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attrs = Window::default_attributes()
            .with_title("Letterfall")
            .with_inner_size(LogicalSize::new(
                self.config.display.width as f64,
                self.config.display.height as f64,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs).map_err(|e| {
            LetterfallError::InitializationFailure(format!("failed to create window: {e}"))
        })?);

        if self.options.fullscreen {
            window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let render_context = pollster::block_on(RenderContext::new(window.clone()))?;

        // Display size is read once; later resizes only affect the surface
        let logical: LogicalSize<f32> = window.inner_size().to_logical(window.scale_factor());
        let engine = RapierEngine::new(self.config.simulation.engine);
        let sandbox = Sandbox::new(
            &self.config,
            engine,
            Vec2::new(logical.width, logical.height),
        )?;

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_pass = EguiPass::new(&render_context);

        self.window = Some(window);
        self.render_context = Some(render_context);
        self.egui_winit = Some(egui_winit);
        self.egui_pass = Some(egui_pass);
        self.sandbox = Some(sandbox);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: LetterfallError) {
        log::error!("{err}");
        self.failure = Some(err);
        event_loop.exit();
    }

    /// Turn this frame's shortcuts and canvas clicks into sandbox events
    fn collect_input(&mut self, event_loop: &ActiveEventLoop) {
        let Some(sandbox) = self.sandbox.as_mut() else {
            return;
        };
        for shortcut in self.input.shortcuts_pressed() {
            match shortcut.event() {
                Some(event) => sandbox.queue(event),
                None if shortcut == Shortcut::Exit => event_loop.exit(),
                None => {}
            }
        }
        for click in self.input.take_clicks() {
            sandbox.queue(SandboxEvent::Click(click));
        }
        self.input.end_frame();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.collect_input(event_loop);

        let (Some(window), Some(sandbox), Some(egui_winit)) = (
            self.window.clone(),
            self.sandbox.as_mut(),
            self.egui_winit.as_mut(),
        ) else {
            return;
        };

        let stats = sandbox.update_realtime();
        if stats.steps > 1 {
            log::trace!("Caught up {} steps", stats.steps);
        }

        // The UI pass may run more than once per frame, so it only paints
        let controls = &mut self.controls;
        let raw_input = egui_winit.take_egui_input(&window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            for event in controls_ui(ctx, controls, sandbox.state()) {
                sandbox.queue(event);
            }
            let painter = ctx.layer_painter(egui::LayerId::background());
            let overlay = sandbox.render(&mut PainterSurface::new(&painter));
            if overlay.skipped > 0 {
                log::debug!("Overlay skipped {} stale letters", overlay.skipped);
            }
        });
        egui_winit.handle_platform_output(&window, full_output.platform_output.clone());

        let (Some(context), Some(pass)) = (self.render_context.as_mut(), self.egui_pass.as_mut())
        else {
            return;
        };
        let frame = match context.acquire() {
            Ok(Some(frame)) => frame,
            Ok(None) => return,
            Err(e) => {
                log::warn!("{e}");
                return;
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let background = Color::from_hex(self.config.display.background);
        pass.paint(context, &self.egui_ctx, full_output, &view, background);
        frame.present();
    }
}

impl ApplicationHandler for PlayerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(err) = self.initialize(event_loop) {
                self.fail(event_loop, err);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Releases must reach the input state even when egui keeps the event
        match &event {
            WindowEvent::KeyboardInput { event: key, .. }
                if key.state == ElementState::Released =>
            {
                if let PhysicalKey::Code(key_code) = key.physical_key {
                    self.input.process_key_up(key_code);
                }
            }
            WindowEvent::Focused(false) => self.input.release_all(),
            _ => {}
        }

        // Let egui handle the event first
        if let (Some(egui_winit), Some(window)) = (&mut self.egui_winit, &self.window) {
            let response = egui_winit.on_window_event(window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(context) = &mut self.render_context {
                    context.resize(new_size);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => self.input.process_key_down(key_code),
                        ElementState::Released => self.input.process_key_up(key_code),
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let scale = self.window.as_ref().map_or(1.0, |w| w.scale_factor());
                self.input.process_pointer_move(position.x, position.y, scale);
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if !self.egui_ctx.is_pointer_over_area() {
                    self.input.process_click();
                }
            }

            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(sandbox) = self.sandbox.take() {
            sandbox.shutdown();
        }
    }
}
