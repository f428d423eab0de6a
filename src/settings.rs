//! Settings file fallback for environment variables.
//!
//! Values missing from the environment are looked up in the `env` map of
//! `$HOME/.submodule-release-notes/settings.json`.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

/// Settings loaded from `$HOME/.submodule-release-notes/settings.json`.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Environment variable overrides.
    #[serde(default)]
    pub env: HashMap<String, String>,
}

impl Settings {
    /// Loads settings from the default location.
    pub fn load() -> Result<Self> {
        let settings_path = Self::get_settings_path()?;
        Self::load_from_path(&settings_path)
    }

    /// Loads settings from a specific path; a missing file gives empty settings.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        serde_json::from_str::<Self>(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    /// Returns the default settings path.
    pub fn get_settings_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to determine home directory")?;

        Ok(home_dir
            .join(".submodule-release-notes")
            .join("settings.json"))
    }

    /// Returns a non-empty environment variable, falling back to settings.
    pub fn get_env_var(&self, key: &str) -> Option<String> {
        match env::var(key) {
            Ok(value) if !value.is_empty() => Some(value),
            _ => self.env.get(key).filter(|value| !value.is_empty()).cloned(),
        }
    }
}

/// Returns an environment variable with fallback to the settings file.
pub fn get_env_var(key: &str) -> Result<String> {
    lookup_env_var(key, Settings::load)
}

/// Reads `key` from the environment, loading settings only when it is unset or empty.
fn lookup_env_var<F>(key: &str, load: F) -> Result<String>
where
    F: FnOnce() -> Result<Settings>,
{
    match env::var(key) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => match load() {
            Ok(settings) => settings
                .get_env_var(key)
                .ok_or_else(|| anyhow::anyhow!("Environment variable not found: {}", key)),
            Err(err) => {
                warn!("Ignoring unreadable settings file: {err:#}");
                Err(anyhow::anyhow!("Environment variable not found: {}", key).context(err))
            }
        },
    }
}
