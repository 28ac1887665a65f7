//! Letterfall CLI - play the sandbox or run it headless

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, play, simulate};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "letterfall")]
#[command(about = "Letter-drop physics sandbox", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the sandbox window
    Play {
        /// Config file layered over the global and project configs
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
    },

    /// Drop text without a window and report where the letters end up
    Simulate {
        /// Text to drop
        #[arg(long)]
        text: String,

        /// Frames to run
        #[arg(long, default_value = "180")]
        frames: u32,

        /// Click position as X,Y, or "centroid" for the letters' mean position
        #[arg(long)]
        click: Option<String>,

        /// Frame on which the click happens
        #[arg(long, default_value = "60")]
        click_frame: u32,

        /// Sling radius
        #[arg(long)]
        radius: Option<f32>,

        /// Sling power
        #[arg(long)]
        power: Option<f32>,

        /// Frames to run paused after the main run
        #[arg(long, default_value = "0")]
        pause_frames: u32,

        /// Reset the letters before reporting
        #[arg(long)]
        reset: bool,

        /// Seed for spawn positions
        #[arg(long)]
        seed: Option<u64>,

        /// Config file layered over the global and project configs
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Config file layered over the global and project configs
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            config,
            width,
            height,
            seed,
            fullscreen,
        } => play::run(play::PlayArgs {
            config,
            width,
            height,
            seed,
            fullscreen,
        }),
        Commands::Simulate {
            text,
            frames,
            click,
            click_frame,
            radius,
            power,
            pause_frames,
            reset,
            seed,
            config,
            format,
        } => simulate::run(simulate::SimulateArgs {
            text,
            frames,
            click,
            click_frame,
            radius,
            power,
            pause_frames,
            reset,
            seed,
            config,
            format,
        }),
        Commands::Config { config } => config::run(config.as_deref()),
    }
}
