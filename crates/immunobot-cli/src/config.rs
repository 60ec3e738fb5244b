//! Configuration management for the Immunobot CLI.

use anyhow::{bail, Context, Result};
use immunobot::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE: &str = "immunobot.toml";

/// Immunobot project configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub swarm: SwarmConfig,
    #[serde(default = "default_layout")]
    pub layout: Vec<Placement>,
}

/// Where one robot starts on the arena floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub role: Role,
    pub x: f64,
    pub y: f64,
}

impl Placement {
    fn new(role: Role, x: f64, y: f64) -> Self {
        Self { role, x, y }
    }
}

/// A cancer chain on the left, an untouched healthy pair on the right
/// and a nucleus in between that hears only the cancer side.
fn default_layout() -> Vec<Placement> {
    vec![
        Placement::new(Role::TCellStrong, 0.0, 0.0),
        Placement::new(Role::AntibodyCancer, 50.0, 0.0),
        Placement::new(Role::AntigenCancer, 100.0, 0.0),
        Placement::new(Role::CancerInterior, 150.0, 0.0),
        Placement::new(Role::TNucleus, 250.0, 0.0),
        Placement::new(Role::AntigenHealthy, 400.0, 0.0),
        Placement::new(Role::HealthyInterior, 450.0, 0.0),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            swarm: SwarmConfig::default(),
            layout: default_layout(),
        }
    }
}

impl Config {
    /// Load config from immunobot.toml in the current or parent directories.
    pub fn load() -> Result<Self> {
        let start = std::env::current_dir().context("Failed to read current directory")?;
        match find_config_file(&start) {
            Some(path) => {
                debug!(path = %path.display(), "loading config");
                Self::load_from(&path)
            }
            None => {
                debug!(dir = %start.display(), "no {} found, using defaults", CONFIG_FILE);
                Ok(Config::default())
            }
        }
    }

    /// Load config from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Build a swarm with every placement spawned.
    pub fn build_swarm(&self) -> Result<Swarm> {
        let mut swarm =
            Swarm::from_config(self.swarm.clone()).context("Invalid swarm configuration")?;
        for (i, p) in self.layout.iter().enumerate() {
            if !p.x.is_finite() || !p.y.is_finite() {
                bail!("Layout entry {i} ({}) has a non-finite position", p.role);
            }
            swarm.spawn(p.role, Position::new(p.x, p.y));
        }
        Ok(swarm)
    }
}

/// Find immunobot.toml in `start` or its parent directories.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}
