use std::path::Path;

use anyhow::Result;
use eventcal_core::config::EventCalConfig;
use owo_colors::OwoColorize;

pub fn run(path: &Path, config: &EventCalConfig) -> Result<()> {
    println!("{} {}", "Config file:".dimmed(), path.display());
    if !path.exists() {
        println!("{}", "(not found, using defaults)".dimmed());
    }
    println!();
    print!("{}", config.to_toml()?);
    Ok(())
}
