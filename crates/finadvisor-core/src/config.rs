use crate::advisor::Advisor;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Tunables persisted at `<config_dir>/finadvisor/config.json`. Conversation
/// history is never written anywhere; this file carries settings only.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    pub response_delay_ms: Option<u64>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            response_delay_ms: None,
        }
    }

    /// Simulated advisor latency, falling back to the built-in default.
    pub fn response_delay(&self) -> Duration {
        self.response_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(Advisor::DEFAULT_DELAY)
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(path, config_content)?;
        Ok(())
    }

    fn get_config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("finadvisor").join("config.json"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
