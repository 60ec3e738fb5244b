//! Initialize a new Immunobot project.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::{Config, CONFIG_FILE};

pub fn run(path: Option<String>) -> Result<()> {
    let base_path = match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    println!("{} Initializing Immunobot project...", "→".blue());

    std::fs::create_dir_all(&base_path)
        .with_context(|| format!("Failed to create {}", base_path.display()))?;

    let config_path = base_path.join(CONFIG_FILE);
    if !config_path.exists() {
        let config = Config::default();
        config.save(&config_path)?;
        println!(
            "  {} Created {} ({} robots)",
            "✓".green(),
            config_path.display(),
            config.layout.len()
        );
    } else {
        println!("  {} {} already exists", "•".yellow(), config_path.display());
    }

    println!();
    println!("{} Immunobot project initialized!", "✓".green().bold());
    println!();
    println!("Next steps:");
    println!("  {} edit the [[layout]] entries in {}", "1.".blue(), CONFIG_FILE);
    println!("  {} immunobot run --ticks 300", "2.".blue());
    println!("  {} immunobot roles", "3.".blue());

    Ok(())
}
