use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default = "default_round_size")]
    pub round_size: usize,
    #[serde(default = "default_player_position")]
    pub player_position: usize,
}

fn default_theme() -> String {
    "railway-default".to_string()
}
fn default_width() -> usize {
    14
}
fn default_fps() -> u32 {
    30
}
fn default_round_size() -> usize {
    200
}
fn default_player_position() -> usize {
    3
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            width: default_width(),
            fps: default_fps(),
            round_size: default_round_size(),
            player_position: default_player_position(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("railbar")
            .join("config.toml")
    }

    /// Reset an unknown theme name to the default. Call after loading so
    /// stale names from old configs never reach `Theme::load` unchecked.
    pub fn normalize_theme(&mut self, available: &[String]) {
        if !available.iter().any(|t| t == &self.theme) {
            self.theme = default_theme();
        }
    }
}
