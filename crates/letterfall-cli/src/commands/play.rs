//! Play command - opens the sandbox window

use anyhow::{Context, Result};
use letterfall_player::{PlayerApp, PlayerOptions};
use letterfall_sandbox::SandboxConfig;
use std::path::PathBuf;
use winit::event_loop::{ControlFlow, EventLoop};

pub struct PlayArgs {
    pub config: Option<PathBuf>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub seed: Option<u64>,
    pub fullscreen: bool,
}

pub fn run(args: PlayArgs) -> Result<()> {
    let mut config =
        SandboxConfig::load(args.config.as_deref()).context("Failed to load config")?;
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
