//! Client-local preferences. Only the theme is persisted.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use shared::domain::Theme;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
}

pub fn default_preferences_path() -> Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| anyhow!("unable to resolve config dir"))?;
    Ok(base.join("daily_verse").join("preferences.toml"))
}

/// Missing or unreadable files fall back to defaults.
pub fn load_preferences(path: &Path) -> Preferences {
    fs::read_to_string(path)
        .ok()
        .and_then(|raw| toml::from_str(&raw).ok())
        .unwrap_or_default()
}

pub fn save_preferences(path: &Path, preferences: &Preferences) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| {
            format!("failed to create preferences directory '{}'", parent.display())
        })?;
    }
    let raw = toml::to_string(preferences).context("failed to encode preferences")?;
    fs::write(path, raw)
        .with_context(|| format!("failed to write preferences '{}'", path.display()))
}
