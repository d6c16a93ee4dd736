// Loaded on startup and rewritten on every theme toggle, so the preference
// survives across sessions.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::shared::Theme;

const SETTINGS_FILE: &str = "settings.json";

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Settings {
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self { theme: Theme::Dark }
    }
}

/// Platform config dir for the app, e.g. `~/.config/lull` on Linux.
pub fn default_settings_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "lull").map(|d| d.config_dir().to_path_buf())
}

pub fn load_settings(dir: &Path) -> Settings {
    let path = dir.join(SETTINGS_FILE);
    std::fs::read_to_string(&path)
        .ok()
        .and_then(|data| serde_json::from_str(&data).ok())
        .unwrap_or_default()
}

// Save the settings to disk, making the directory if it doesn't exist yet
pub fn save_settings(dir: &Path, settings: &Settings) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)?;
    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(dir.join(SETTINGS_FILE), json)?;
    Ok(())
}
