//! Localized keyword and traveler names
//!
//! Both lookups are language -> (category ->) key -> display string, and
//! resolve through the requested language, then English, then the raw key.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::loader::BASE_LANGUAGE;

const ELEMENTS: [&str; 4] = ["cold", "fire", "light", "dark"];

/// Keyword groups in `keywords.json`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Rarities,
    Elements,
    Tags,
}

impl KeywordCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeywordCategory::Rarities => "rarities",
            KeywordCategory::Elements => "elements",
            KeywordCategory::Tags => "tags",
        }
    }

    /// Elemental tags have their own category; everything else is a tag
    pub fn for_tag(tag: &str) -> Self {
        if ELEMENTS.iter().any(|e| tag.eq_ignore_ascii_case(e)) {
            KeywordCategory::Elements
        } else {
            KeywordCategory::Tags
        }
    }
}

/// language -> category -> key -> display name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keywords(HashMap<String, HashMap<String, HashMap<String, String>>>);

impl Keywords {
    pub fn load(path: &Path) -> Self {
        load_or_default(path)
    }

    fn lookup(&self, language: &str, category: KeywordCategory, key: &str) -> Option<&str> {
        self.0
            .get(language)
            .and_then(|categories| categories.get(category.as_str()))
            .and_then(|names| names.get(key))
            .map(String::as_str)
    }

    /// Display name for a keyword, or the key itself when untranslated
    pub fn display_name<'a>(&'a self, key: &'a str, category: KeywordCategory, language: &str) -> &'a str {
        self.lookup(language, category, key)
            .or_else(|| self.lookup(BASE_LANGUAGE, category, key))
            .unwrap_or(key)
    }

    /// Display name for an item tag, picking its category
    pub fn tag_name<'a>(&'a self, tag: &'a str, language: &str) -> &'a str {
        self.display_name(tag, KeywordCategory::for_tag(tag), language)
    }
}

/// language -> hero name -> display name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TravelerNames(HashMap<String, HashMap<String, String>>);

impl TravelerNames {
    pub fn load(path: &Path) -> Self {
        load_or_default(path)
    }

    fn lookup(&self, language: &str, name: &str) -> Option<&str> {
        self.0
            .get(language)
            .and_then(|names| names.get(name))
            .map(String::as_str)
    }

    /// Display name for a traveler key such as `Hero_Mist`
    pub fn display_name<'a>(&'a self, traveler: &'a str, language: &str) -> &'a str {
        let name = traveler.strip_prefix("Hero_").unwrap_or(traveler);
        self.lookup(language, name)
            .or_else(|| self.lookup(BASE_LANGUAGE, name))
            .unwrap_or(name)
    }
}

/// Load a JSON lookup table, falling back to an empty one
pub(super) fn load_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(table) => return table,
            Err(e) => log::warn!("Failed to parse {:?}: {}", path, e),
        },
        Err(e) => log::warn!("Failed to read {:?}: {}", path, e),
    }
    T::default()
}
