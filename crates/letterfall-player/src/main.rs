//! Letterfall Player - windowed sandbox binary
//!
//! Usage:
//!   letterfall-player [--config <file>] [--width W] [--height H] [--seed S] [--fullscreen]

use anyhow::{Context, Result};
use clap::Parser;
use letterfall_player::{PlayerApp, PlayerOptions};
use letterfall_sandbox::SandboxConfig;
use std::path::PathBuf;
use winit::event_loop::{ControlFlow, EventLoop};

#[derive(Parser)]
#[command(name = "letterfall-player")]
#[command(about = "Type text, watch it fall, click to fling the letters")]
struct Args {
    /// Config file layered over ~/.letterfall/config.toml and ./letterfall.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial window width in logical pixels
    #[arg(long)]
    width: Option<f32>,

    /// Initial window height in logical pixels
    #[arg(long)]
    height: Option<f32>,

    /// Seed for spawn positions
    #[arg(long)]
    seed: Option<u64>,

    /// Launch in fullscreen mode
    #[arg(long)]
    fullscreen: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = SandboxConfig::load(args.config.as_deref()).context("Failed to load config")?;
    if let Some(width) = args.width {
        config.display.width = width;
    }
    if let Some(height) = args.height {
        config.display.height = height;
    }
    if args.seed.is_some() {
        config.simulation.seed = args.seed;
    }
    config.validate().context("Invalid config")?;

    println!("Controls:");
    println!("  Click    - Fling nearby letters");
    println!("  F1       - Toggle hitboxes");
    println!("  F2       - Pause / resume");
    println!("  F5       - Reset letters");
    println!("  Escape   - Exit");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = PlayerApp::new(
        config,
        PlayerOptions {
            fullscreen: args.fullscreen,
        },
    );
    event_loop.run_app(&mut app)?;

    if let Some(err) = app.take_failure() {
        return Err(err).context("Player stopped");
    }
    Ok(())
}
