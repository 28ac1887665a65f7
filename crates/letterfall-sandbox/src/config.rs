//! Layered configuration system
//!
//! Config is loaded with four layers of precedence (highest wins):
//! 1. An explicit file passed on the command line
//! 2. Project-local: `./letterfall.toml`
//! 3. Global: `~/.letterfall/config.toml`
//! 4. Built-in defaults
//!
//! Files may be partial; tables are merged key by key before the result is
//! deserialized. `LETTERFALL_SEED` overrides the spawn seed.

use letterfall_core::{LetterfallError, Result};
use letterfall_physics::EngineSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Display surface sizing and colors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Surface width used when no window supplies one (headless runs)
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
    #[serde(default = "default_background")]
    pub background: u32,
}

fn default_width() -> f32 {
    1280.0
}
fn default_height() -> f32 {
    720.0
}
fn default_background() -> u32 {
    0x333333
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            background: default_background(),
        }
    }
}

/// Letter body footprint, material, spawn layout, and glyph appearance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LetterConfig {
    #[serde(default = "default_letter_width")]
    pub width: f32,
    #[serde(default = "default_letter_height")]
    pub height: f32,
    #[serde(default = "default_restitution")]
    pub restitution: f32,
    #[serde(default = "default_friction")]
    pub friction: f32,
    #[serde(default = "default_density")]
    pub density: f32,
    /// Start height of the first character; must be above the surface
    #[serde(default = "default_spawn_top")]
    pub spawn_top: f32,
    /// Extra height per character index
    #[serde(default = "default_stagger")]
    pub stagger: f32,
    #[serde(default = "default_glyph_size")]
    pub glyph_size: f32,
    #[serde(default = "default_glyph_color")]
    pub glyph_color: u32,
    #[serde(default = "default_hitbox_color")]
    pub hitbox_color: u32,
    #[serde(default = "default_hitbox_width")]
    pub hitbox_width: f32,
    #[serde(default)]
    pub hitboxes_visible: bool,
}

fn default_letter_width() -> f32 {
    45.0
}
fn default_letter_height() -> f32 {
    50.0
}
fn default_restitution() -> f32 {
    1.0
}
fn default_friction() -> f32 {
    0.05
}
fn default_density() -> f32 {
    0.001
}
fn default_spawn_top() -> f32 {
    -50.0
}
fn default_stagger() -> f32 {
    40.0
}
fn default_glyph_size() -> f32 {
    60.0
}
fn default_glyph_color() -> u32 {
    0xFFFFFF
}
fn default_hitbox_color() -> u32 {
    0xFF0000
}
fn default_hitbox_width() -> f32 {
    2.0
}

impl Default for LetterConfig {
    fn default() -> Self {
        Self {
            width: default_letter_width(),
            height: default_letter_height(),
            restitution: default_restitution(),
            friction: default_friction(),
            density: default_density(),
            spawn_top: default_spawn_top(),
            stagger: default_stagger(),
            glyph_size: default_glyph_size(),
            glyph_color: default_glyph_color(),
            hitbox_color: default_hitbox_color(),
            hitbox_width: default_hitbox_width(),
            hitboxes_visible: false,
        }
    }
}

/// Ground and side walls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundaryConfig {
    #[serde(default = "default_ground_height")]
    pub ground_height: f32,
    #[serde(default = "default_wall_thickness")]
    pub wall_thickness: f32,
    #[serde(default = "default_boundary_color")]
    pub color: u32,
}

fn default_ground_height() -> f32 {
    100.0
}
fn default_wall_thickness() -> f32 {
    50.0
}
fn default_boundary_color() -> u32 {
    0x555555
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            ground_height: default_ground_height(),
            wall_thickness: default_wall_thickness(),
            color: default_boundary_color(),
        }
    }
}

/// Initial sling settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlingSection {
    #[serde(default = "default_sling_radius")]
    pub radius: f32,
    #[serde(default = "default_sling_power")]
    pub power: f32,
}

fn default_sling_radius() -> f32 {
    200.0
}
fn default_sling_power() -> f32 {
    0.25
}

impl Default for SlingSection {
    fn default() -> Self {
        Self {
            radius: default_sling_radius(),
            power: default_sling_power(),
        }
    }
}

/// Stepping rate, engine tuning, and spawn randomness
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_timestep_hz")]
    pub timestep_hz: f64,
    #[serde(flatten)]
    pub engine: EngineSettings,
    /// Fixed seed for spawn positions; random when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_timestep_hz() -> f64 {
    60.0
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            timestep_hz: default_timestep_hz(),
            engine: EngineSettings::default(),
            seed: None,
        }
    }
}

/// Complete sandbox configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SandboxConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub letters: LetterConfig,
    #[serde(default)]
    pub boundary: BoundaryConfig,
    #[serde(default)]
    pub sling: SlingSection,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl SandboxConfig {
    /// Load with layered precedence: defaults < global < project < explicit file
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut layers = Vec::new();
        if let Some(global) = Self::global_config_path() {
            if global.exists() {
                layers.push(global);
            }
        }
        let local = PathBuf::from("letterfall.toml");
        if local.exists() {
            layers.push(local);
        }
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(LetterfallError::InvalidConfig(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            layers.push(path.to_path_buf());
        }

        let mut config = Self::load_layers(&layers)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Merge the given files in order (later wins) over the defaults
    pub fn load_layers(paths: &[PathBuf]) -> Result<Self> {
        let mut merged = toml::Table::new();
        for path in paths {
            let content = std::fs::read_to_string(path)?;
            let table: toml::Table = toml::from_str(&content)?;
            log::debug!("Loaded config layer {}", path.display());
            merge_tables(&mut merged, table);
        }
        let config: SandboxConfig = toml::Value::Table(merged).try_into()?;
        Ok(config)
    }

    /// Parse a single TOML document over the defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SandboxConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the effective configuration
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".letterfall").join("config.toml"))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(raw) = std::env::var("LETTERFALL_SEED") {
            match raw.trim().parse::<u64>() {
                Ok(seed) => self.simulation.seed = Some(seed),
                Err(_) => log::warn!("Ignoring LETTERFALL_SEED={raw:?}: not an integer"),
            }
        }
    }

    /// Reject values the sandbox cannot run with
    pub fn validate(&self) -> Result<()> {
        positive("display.width", self.display.width)?;
        positive("display.height", self.display.height)?;
        positive("letters.width", self.letters.width)?;
        positive("letters.height", self.letters.height)?;
        positive("letters.density", self.letters.density)?;
        positive("letters.glyph_size", self.letters.glyph_size)?;
        in_range("letters.restitution", self.letters.restitution, 0.0, 1.0)?;
        in_range("letters.friction", self.letters.friction, 0.0, f32::MAX)?;
        in_range("letters.stagger", self.letters.stagger, 0.0, f32::MAX)?;
        if !(self.letters.spawn_top < 0.0) {
            return Err(LetterfallError::InvalidConfig(format!(
                "letters.spawn_top must be above the surface (negative), got {}",
                self.letters.spawn_top
            )));
        }
        positive("boundary.ground_height", self.boundary.ground_height)?;
        positive("boundary.wall_thickness", self.boundary.wall_thickness)?;
        positive("sling.radius", self.sling.radius)?;
        positive("sling.power", self.sling.power)?;
        if !(self.simulation.timestep_hz > 0.0 && self.simulation.timestep_hz.is_finite()) {
            return Err(LetterfallError::InvalidConfig(format!(
                "simulation.timestep_hz must be positive, got {}",
                self.simulation.timestep_hz
            )));
        }
        positive("simulation.length_unit", self.simulation.engine.length_unit)?;
        Ok(())
    }
}

fn positive(field: &str, value: f32) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(LetterfallError::ValueOutOfRange {
            field: field.to_string(),
            min: 0.0,
            max: f32::MAX as f64,
            value: value as f64,
        })
    }
}

fn in_range(field: &str, value: f32, min: f32, max: f32) -> Result<()> {
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(LetterfallError::ValueOutOfRange {
            field: field.to_string(),
            min: min as f64,
            max: max as f64,
            value: value as f64,
        })
    }
}

/// Deep-merge `overlay` into `base`; overlay values win
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
