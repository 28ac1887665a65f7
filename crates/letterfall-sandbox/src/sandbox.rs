//! Sandbox coordinator
//!
//! Owns the engine, the letter registry, the boundary and the lifecycle, and
//! drives them one frame at a time: queued events are dispatched in arrival
//! order, the engine is stepped on a fixed timestep while running, and the
//! frame is painted as background, engine shapes, then glyphs.

use crate::boundary::StaticBoundary;
use crate::config::SandboxConfig;
use crate::force_field::{self, SlingImpulse};
use crate::overlay::{OverlayStats, OverlaySynchronizer};
use crate::registry::{HitboxMode, LetterBody, LetterRegistry, LetterTemplate};
use crate::sling::SlingConfig;
use crate::surface::DisplaySurface;
use letterfall_core::{Color, LetterfallError, Result, Vec2};
use letterfall_physics::PhysicsEngine;
use letterfall_runtime::{FrameClock, Lifecycle, SandboxEvent, SimulationState, Transition};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;

/// What one frame did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub events: usize,
    pub steps: u32,
    pub overlay: OverlayStats,
}

/// The letter-drop sandbox over any physics engine
pub struct Sandbox<E: PhysicsEngine> {
    engine: E,
    registry: LetterRegistry,
    boundary: StaticBoundary,
    lifecycle: Lifecycle,
    sling: SlingConfig,
    clock: FrameClock,
    rng: StdRng,
    overlay: OverlaySynchronizer,
    /// Delivered by `queue`, dispatched oldest first on the next update
    events: VecDeque<SandboxEvent>,
    background: Color,
    size: Vec2,
    frames: u64,
    torn_down: bool,
}

impl<E: PhysicsEngine> Sandbox<E> {
    /// Build the sandbox for a surface of `size` logical units.
    ///
    /// The size is read once here; the boundary does not follow later resizes.
    pub fn new(config: &SandboxConfig, mut engine: E, size: Vec2) -> Result<Self> {
        if !(size.is_finite() && size.x > 0.0 && size.y > 0.0) {
            return Err(LetterfallError::InitializationFailure(format!(
                "display surface has unusable size {}x{}",
                size.x, size.y
            )));
        }

        let sling = SlingConfig::new(config.sling.radius, config.sling.power)?;
        let boundary = StaticBoundary::create(size.x, size.y, &config.boundary, &mut engine);
        let template = LetterTemplate::from_config(&config.letters, size.x);
        let registry = LetterRegistry::new(
            template,
            HitboxMode::from_visible(config.letters.hitboxes_visible),
        );
        let rng = match config.simulation.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        log::info!(
            "Sandbox ready: {}x{} surface, {} engine, {} Hz",
            size.x,
            size.y,
            engine.name(),
            config.simulation.timestep_hz
        );

        Ok(Self {
            engine,
            registry,
            boundary,
            lifecycle: Lifecycle::new(),
            sling,
            clock: FrameClock::with_fixed_timestep(config.simulation.timestep_hz),
            rng,
            overlay: OverlaySynchronizer::new(
                config.letters.glyph_size,
                Color::from_hex(config.letters.glyph_color),
            ),
            events: VecDeque::new(),
            background: Color::from_hex(config.display.background),
            size,
            frames: 0,
            torn_down: false,
        })
    }

    // --- operations ---

    /// Spawn letters for a text submission. Empty or all-space text spawns nothing.
    pub fn submit(&mut self, text: &str) -> Vec<LetterBody> {
        self.registry.spawn(text, &mut self.engine, &mut self.rng)
    }

    /// Push every letter near `pointer` away from it
    pub fn click(&mut self, pointer: Vec2) -> Vec<SlingImpulse> {
        let letters = self.registry.all();
        force_field::apply_at(pointer, &self.sling, &letters, &mut self.engine)
    }

    /// Remove every letter; the boundary stays
    pub fn reset(&mut self) {
        self.registry.reset(&mut self.engine);
    }

    pub fn toggle_hitboxes(&mut self) -> HitboxMode {
        let mode = self.registry.hitbox_mode().toggled();
        self.registry.set_hitboxes(mode, &mut self.engine);
        mode
    }

    pub fn set_hitboxes_visible(&mut self, visible: bool) {
        self.registry
            .set_hitboxes(HitboxMode::from_visible(visible), &mut self.engine);
    }

    pub fn pause(&mut self) -> Transition {
        let t = self.lifecycle.pause();
        self.after_transition(t)
    }

    pub fn resume(&mut self) -> Transition {
        let t = self.lifecycle.resume();
        self.after_transition(t)
    }

    pub fn toggle_pause(&mut self) -> Transition {
        let t = self.lifecycle.toggle();
        self.after_transition(t)
    }

    fn after_transition(&mut self, transition: Transition) -> Transition {
        if transition.changed() {
            self.clock.discard_backlog();
        }
        transition
    }

    pub fn set_sling_radius(&mut self, radius: f32) {
        self.sling.set_radius_control(radius);
        log::debug!("Sling radius {}", self.sling.radius());
    }

    pub fn set_sling_power(&mut self, power: f32) {
        self.sling.set_power_control(power);
        log::debug!("Sling power {}", self.sling.power());
    }

    /// Handle one event immediately
    pub fn dispatch(&mut self, event: SandboxEvent) {
        log::trace!("Dispatch {}", event.kind());
        match event {
            SandboxEvent::Submit(text) => {
                self.submit(&text);
            }
            SandboxEvent::Click(pointer) => {
                self.click(pointer);
            }
            SandboxEvent::Reset => self.reset(),
            SandboxEvent::ToggleHitboxes => {
                self.toggle_hitboxes();
            }
            SandboxEvent::TogglePause => {
                self.toggle_pause();
            }
            SandboxEvent::SetSlingRadius(radius) => self.set_sling_radius(radius),
            SandboxEvent::SetSlingPower(power) => self.set_sling_power(power),
        }
    }

    /// Queue an event for the next frame
    pub fn queue(&mut self, event: SandboxEvent) {
        self.events.push_back(event);
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    // --- frame loop ---

    /// Run one frame that covers `elapsed` seconds of wall time
    pub fn frame<S: DisplaySurface + ?Sized>(
        &mut self,
        elapsed: f64,
        surface: &mut S,
    ) -> FrameStats {
        let mut stats = self.update(elapsed);
        stats.overlay = self.render(surface);
        stats
    }

    /// Dispatch queued events and step for `elapsed` seconds, without painting
    pub fn update(&mut self, elapsed: f64) -> FrameStats {
        let events = self.drain_events();
        self.clock.advance(elapsed);
        self.step_pending(events)
    }

    /// `update` timed by the wall clock
    pub fn update_realtime(&mut self) -> FrameStats {
        let events = self.drain_events();
        self.clock.tick();
        self.step_pending(events)
    }

    fn drain_events(&mut self) -> usize {
        let mut count = 0;
        while let Some(event) = self.events.pop_front() {
            self.dispatch(event);
            count += 1;
        }
        count
    }

    fn step_pending(&mut self, events: usize) -> FrameStats {
        let mut steps = 0;
        if self.lifecycle.is_running() {
            let dt = self.clock.fixed_timestep as f32;
            while self.clock.should_fixed_update() {
                self.engine.step(dt);
                self.clock.consume_fixed_step();
                steps += 1;
            }
        } else {
            self.clock.discard_backlog();
        }

        self.frames += 1;
        FrameStats {
            events,
            steps,
            overlay: OverlayStats::default(),
        }
    }

    /// Paint the current state without stepping
    pub fn render<S: DisplaySurface + ?Sized>(&self, surface: &mut S) -> OverlayStats {
        surface.clear(self.background);
        for shape in self.engine.shapes() {
            surface.draw_shape(&shape);
        }
        self.overlay.draw(&self.registry.all(), &self.engine, surface)
    }

    // --- accessors ---

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn registry(&self) -> &LetterRegistry {
        &self.registry
    }

    /// Snapshot of the live letters
    pub fn letters(&self) -> Vec<LetterBody> {
        self.registry.all()
    }

    pub fn boundary(&self) -> &StaticBoundary {
        &self.boundary
    }

    pub fn state(&self) -> SimulationState {
        self.lifecycle.state()
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn hitbox_mode(&self) -> HitboxMode {
        self.registry.hitbox_mode()
    }

    pub fn sling(&self) -> SlingConfig {
        self.sling
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    // --- teardown ---

    /// Remove letters, boundary and any other body from the engine
    pub fn shutdown(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.registry.reset(&mut self.engine);
        self.boundary.remove(&mut self.engine);
        // Bodies added through `engine_mut` are ours to drop too
        let leftover = self.engine.body_count();
        if leftover > 0 {
            log::debug!("Teardown clearing {leftover} bodies outside the registry");
            self.engine.clear();
        }
        self.torn_down = true;
        log::info!("Sandbox shut down after {} frames", self.frames);
    }
}

impl<E: PhysicsEngine> Drop for Sandbox<E> {
    fn drop(&mut self) {
        self.teardown();
    }
}
