//! Letter body registry
//!
//! The authoritative set of spawned letters. Each record pairs a glyph with
//! the physics handle created for it; the handle is created and removed in
//! the same call as the record, so the registry never holds a handle the
//! engine has dropped and the engine never holds a letter the registry has
//! forgotten. Readers get snapshots, never the live collection.

use crate::config::LetterConfig;
use letterfall_core::{Color, LetterId, Vec2};
use letterfall_physics::{BodyDesc, BodyHandle, BodyStyle, Material, PhysicsEngine, Stroke};
use rand::Rng;

/// One spawned character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LetterBody {
    pub id: LetterId,
    pub glyph: char,
    pub handle: BodyHandle,
    pub hitbox_visible: bool,
}

/// Global hitbox outline toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitboxMode {
    #[default]
    Hidden,
    Visible,
}

impl HitboxMode {
    pub fn from_visible(visible: bool) -> Self {
        if visible {
            HitboxMode::Visible
        } else {
            HitboxMode::Hidden
        }
    }

    pub fn is_visible(&self) -> bool {
        *self == HitboxMode::Visible
    }

    pub fn toggled(&self) -> Self {
        match self {
            HitboxMode::Hidden => HitboxMode::Visible,
            HitboxMode::Visible => HitboxMode::Hidden,
        }
    }
}

/// Body footprint, material, and start layout applied to every spawn
#[derive(Debug, Clone, Copy)]
pub struct LetterTemplate {
    pub size: Vec2,
    pub material: Material,
    pub outline: Stroke,
    /// Spawn x is drawn from `[0, spawn_width)`
    pub spawn_width: f32,
    pub spawn_top: f32,
    pub stagger: f32,
}

impl LetterTemplate {
    pub fn from_config(config: &LetterConfig, spawn_width: f32) -> Self {
        Self {
            size: Vec2::new(config.width, config.height),
            material: Material {
                restitution: config.restitution,
                friction: config.friction,
                density: config.density,
            },
            outline: Stroke {
                color: Color::from_hex(config.hitbox_color),
                width: config.hitbox_width,
            },
            spawn_width,
            spawn_top: config.spawn_top,
            stagger: config.stagger,
        }
    }

    /// Start height for the character at `index` in the submitted text
    pub fn start_y(&self, index: usize) -> f32 {
        self.spawn_top - index as f32 * self.stagger
    }
}

/// Owns every live `LetterBody`
pub struct LetterRegistry {
    letters: Vec<LetterBody>,
    next_id: LetterId,
    hitboxes: HitboxMode,
    template: LetterTemplate,
}

impl LetterRegistry {
    pub fn new(template: LetterTemplate, hitboxes: HitboxMode) -> Self {
        Self {
            letters: Vec::new(),
            next_id: LetterId::from_raw(1),
            hitboxes,
            template,
        }
    }

    pub fn template(&self) -> &LetterTemplate {
        &self.template
    }

    pub fn hitbox_mode(&self) -> HitboxMode {
        self.hitboxes
    }

    /// Spawn one body per character of `text` other than `' '`, in order.
    ///
    /// A space creates nothing but still advances the stagger index, so a
    /// word after a space starts higher than the word before it. Tabs,
    /// newlines and other whitespace are spawned like any other glyph.
    pub fn spawn<E, R>(&mut self, text: &str, engine: &mut E, rng: &mut R) -> Vec<LetterBody>
    where
        E: PhysicsEngine + ?Sized,
        R: Rng + ?Sized,
    {
        let mut spawned = Vec::new();
        for (index, glyph) in text.chars().enumerate() {
            if glyph == ' ' {
                continue;
            }

            let x = rng.random::<f32>() * self.template.spawn_width;
            let position = Vec2::new(x, self.template.start_y(index));
            let style = BodyStyle::outlined(self.template.outline, self.hitboxes.is_visible());
            let desc =
                BodyDesc::dynamic_box(position, self.template.size, self.template.material, style);
            let handle = engine.create_body(&desc);

            let letter = LetterBody {
                id: self.next_id,
                glyph,
                handle,
                hitbox_visible: self.hitboxes.is_visible(),
            };
            self.next_id = self.next_id.next();
            self.letters.push(letter);
            spawned.push(letter);
        }

        if !spawned.is_empty() {
            log::info!(
                "Spawned {} letters from {:?} ({} live)",
                spawned.len(),
                text,
                self.letters.len()
            );
        }
        spawned
    }

    /// Remove every letter from the engine and forget it
    pub fn reset<E: PhysicsEngine + ?Sized>(&mut self, engine: &mut E) {
        let letters = std::mem::take(&mut self.letters);
        let mut missing = 0usize;
        for letter in &letters {
            if !engine.remove_body(letter.handle) {
                missing += 1;
            }
        }
        if missing > 0 {
            log::warn!("Reset found {missing} letters already gone from the engine");
        }
        log::info!("Reset removed {} letters", letters.len());
    }

    /// Apply a hitbox mode to every current letter and to future spawns
    pub fn set_hitboxes<E: PhysicsEngine + ?Sized>(&mut self, mode: HitboxMode, engine: &mut E) {
        self.hitboxes = mode;
        let visible = mode.is_visible();
        for letter in &mut self.letters {
            letter.hitbox_visible = visible;
            engine.set_outline_visible(letter.handle, visible);
        }
        log::debug!("Hitboxes {:?} on {} letters", mode, self.letters.len());
    }

    /// Snapshot of all live letters in spawn order
    pub fn all(&self) -> Vec<LetterBody> {
        self.letters.clone()
    }

    pub fn get(&self, id: LetterId) -> Option<LetterBody> {
        self.letters.iter().find(|l| l.id == id).copied()
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }
}
