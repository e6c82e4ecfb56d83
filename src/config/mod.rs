//! This module handles the application's configuration, including loading and
//! saving user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use align_lens::config::{self, Config};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.language = Some("fr".to_string());
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

use crate::error::Result;
use crate::gesture::AngleWrapPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "AlignLens";

/// Default base URL of the remote store (PostgREST-style REST API).
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

/// Default opacity applied to a freshly opened overlay.
pub const DEFAULT_OPACITY: f32 = crate::gesture::transform::DEFAULT_OPACITY;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub language: Option<String>,
    #[serde(default)]
    pub server_url: Option<String>,
    #[serde(default)]
    pub anon_key: Option<String>,
    /// Rotation behavior across the ±180° bearing boundary.
    #[serde(default)]
    pub angle_wrap: Option<AngleWrapPolicy>,
    #[serde(default)]
    pub default_opacity: Option<f32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: None,
            server_url: Some(DEFAULT_SERVER_URL.to_string()),
            anon_key: None,
            angle_wrap: Some(AngleWrapPolicy::Raw),
            default_opacity: Some(DEFAULT_OPACITY),
        }
    }
}

impl Config {
    /// Base URL of the remote store, falling back to the default.
    #[must_use]
    pub fn server_url(&self) -> &str {
        self.server_url.as_deref().unwrap_or(DEFAULT_SERVER_URL)
    }

    /// Effective angle wrap policy for the gesture engine.
    #[must_use]
    pub fn angle_wrap(&self) -> AngleWrapPolicy {
        self.angle_wrap.unwrap_or_default()
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
