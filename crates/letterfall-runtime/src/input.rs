//! Pointer and keyboard shortcut tracking

use crate::event::SandboxEvent;
use letterfall_core::Vec2;
use std::collections::HashSet;
use winit::keyboard::KeyCode;

/// Keyboard shortcuts the player understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Shortcut {
    ToggleHitboxes,
    TogglePause,
    Reset,
    Exit,
}

impl Shortcut {
    pub const ALL: [Shortcut; 4] = [
        Shortcut::ToggleHitboxes,
        Shortcut::TogglePause,
        Shortcut::Reset,
        Shortcut::Exit,
    ];

    pub fn key(self) -> KeyCode {
        match self {
            Shortcut::ToggleHitboxes => KeyCode::F1,
            Shortcut::TogglePause => KeyCode::F2,
            Shortcut::Reset => KeyCode::F5,
            Shortcut::Exit => KeyCode::Escape,
        }
    }

    /// The sandbox event this shortcut triggers. `Exit` is handled by the
    /// window, not the sandbox.
    pub fn event(self) -> Option<SandboxEvent> {
        match self {
            Shortcut::ToggleHitboxes => Some(SandboxEvent::ToggleHitboxes),
            Shortcut::TogglePause => Some(SandboxEvent::TogglePause),
            Shortcut::Reset => Some(SandboxEvent::Reset),
            Shortcut::Exit => None,
        }
    }
}

/// Per-frame input: held keys, fresh presses, pointer position and clicks
pub struct InputState {
    held: HashSet<KeyCode>,
    pressed: HashSet<KeyCode>,

    /// Pointer position in logical surface units
    pub pointer_position: Vec2,
    clicks: Vec<Vec2>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            pressed: HashSet::new(),
            pointer_position: Vec2::ZERO,
            clicks: Vec::new(),
        }
    }

    pub fn process_key_down(&mut self, key: KeyCode) {
        // Auto-repeat arrives as repeated presses of a held key
        if self.held.insert(key) {
            self.pressed.insert(key);
        }
    }

    pub fn process_key_up(&mut self, key: KeyCode) {
        self.held.remove(&key);
    }

    /// Forget every held key. Used when the window loses focus, since the
    /// matching releases may never arrive.
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// `scale` converts physical pixels to logical units
    pub fn process_pointer_move(&mut self, x: f64, y: f64, scale: f64) {
        let scale = if scale > 0.0 { scale } else { 1.0 };
        self.pointer_position = Vec2::new((x / scale) as f32, (y / scale) as f32);
    }

    /// Record a primary-button press at the current pointer position
    pub fn process_click(&mut self) {
        self.clicks.push(self.pointer_position);
    }

    /// Clicks recorded since the last call
    pub fn take_clicks(&mut self) -> Vec<Vec2> {
        std::mem::take(&mut self.clicks)
    }

    /// Forget this frame's presses and clicks
    pub fn end_frame(&mut self) {
        self.pressed.clear();
        self.clicks.clear();
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    pub fn shortcut_pressed(&self, shortcut: Shortcut) -> bool {
        self.pressed.contains(&shortcut.key())
    }

    /// Shortcuts pressed this frame, in declaration order
    pub fn shortcuts_pressed(&self) -> Vec<Shortcut> {
        Shortcut::ALL
            .into_iter()
            .filter(|s| self.shortcut_pressed(*s))
            .collect()
    }
}
