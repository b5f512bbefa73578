//! Achievement unlock conditions
//!
//! `achievements.json` is only published in English. Its entries are looked
//! up by achievement name, which is what items carry as `achievementKey`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::keywords::load_or_default;
use super::loader::BASE_LANGUAGE;
use crate::items::Item;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Achievement {
    pub name: String,
    pub description: String,
}

/// Achievements keyed by name
#[derive(Debug, Clone, Default)]
pub struct Achievements {
    by_name: HashMap<String, Achievement>,
}

impl Achievements {
    pub fn new(entries: impl IntoIterator<Item = Achievement>) -> Self {
        Self {
            by_name: entries
                .into_iter()
                .map(|achievement| (achievement.name.clone(), achievement))
                .collect(),
        }
    }

    /// Load the table, or an empty one if the file is missing or invalid
    pub fn load(path: &Path) -> Self {
        let raw: HashMap<String, Achievement> = load_or_default(path);
        Self::new(raw.into_values())
    }

    pub fn get(&self, name: &str) -> Option<&Achievement> {
        self.by_name.get(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Name and description of the achievement that unlocks `item`.
    ///
    /// A table entry wins over the item's own fallback fields. Nothing is
    /// returned unless both a name and a description are known.
    pub fn unlock_condition<'a>(&'a self, item: &'a Item) -> Option<(&'a str, &'a str)> {
        let key = item.achievement_key.as_deref()?;
        let (name, description) = match self.get(key) {
            Some(achievement) => (
                Some(achievement.name.as_str()),
                Some(achievement.description.as_str()),
            ),
            None => (
                item.achievement_name.as_deref(),
                item.achievement_description.as_deref(),
            ),
        };

        match (name, description) {
            (Some(name), Some(description)) if !name.is_empty() && !description.is_empty() => {
                Some((name, description))
            }
            _ => None,
        }
    }
}

/// Path of the achievements table
pub fn achievements_path(data_dir: &Path) -> PathBuf {
    data_dir
        .join("locales")
        .join(BASE_LANGUAGE)
        .join("achievements.json")
}
