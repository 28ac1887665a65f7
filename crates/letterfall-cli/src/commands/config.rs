//! Config command - prints the effective configuration

use anyhow::{Context, Result};
use letterfall_sandbox::SandboxConfig;
use std::path::Path;

pub fn run(config: Option<&Path>) -> Result<()> {
    let config = SandboxConfig::load(config).context("Failed to load config")?;
    let text = config.to_toml().context("Failed to serialize config")?;
    print!("{}", text);
    Ok(())
}
