//! User settings
//!
//! Where data and sprites live, which language to show, and the scaling
//! values a view starts at. Stored as RON.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::{achievements_path, BASE_LANGUAGE};
use crate::description::DEFAULT_SPRITE_DIR;
use crate::items::ItemKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding `locales/`, `keywords.json` and `travelers.json`
    pub data_dir: PathBuf,
    /// Directory (or URL prefix) for sprite images
    pub sprite_dir: String,
    pub language: String,
    /// Starting memory level
    pub memory_level: f64,
    /// Starting essence quality, in percent
    pub essence_quality: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("assets/data"),
            sprite_dir: DEFAULT_SPRITE_DIR.to_string(),
            language: BASE_LANGUAGE.to_string(),
            memory_level: ItemKind::Memory.default_scaling(),
            essence_quality: ItemKind::Essence.default_scaling(),
        }
    }
}

impl Settings {
    /// Starting scaling value for a kind
    pub fn scaling_for(&self, kind: ItemKind) -> f64 {
        match kind {
            ItemKind::Memory => self.memory_level,
            ItemKind::Essence => self.essence_quality,
        }
    }

    pub fn keywords_path(&self) -> PathBuf {
        self.data_dir.join("keywords.json")
    }

    pub fn travelers_path(&self) -> PathBuf {
        self.data_dir.join("travelers.json")
    }

    pub fn achievements_path(&self) -> PathBuf {
        achievements_path(&self.data_dir)
    }
}

/// Get the default settings file path
pub fn settings_path() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "memoria", "Memoria") {
        let mut path = proj_dirs.config_dir().to_path_buf();
        path.push("settings.ron");
        path
    } else {
        PathBuf::from("./settings.ron")
    }
}

/// Load settings from `path`, or defaults if it is missing or invalid
pub fn load_settings(path: &Path) -> Settings {
    if path.exists() {
        match fs::read_to_string(path) {
            Ok(content) => match ron::from_str(&content) {
                Ok(settings) => {
                    log::info!("Settings loaded from {:?}", path);
                    return settings;
                }
                Err(e) => log::warn!("Failed to parse settings: {}, using defaults", e),
            },
            Err(e) => log::warn!("Failed to read settings: {}, using defaults", e),
        }
    }

    Settings::default()
}

/// Write settings as pretty RON
pub fn save_settings(settings: &Settings, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }

    let content = ron::ser::to_string_pretty(settings, ron::ser::PrettyConfig::default())
        .map_err(|e| e.to_string())?;
    fs::write(path, content).map_err(|e| e.to_string())?;

    log::info!("Settings saved to {:?}", path);
    Ok(())
}
