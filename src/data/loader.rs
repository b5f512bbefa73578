//! JSON data loader
//!
//! Loads a localized item catalog from the data directory, falling back to
//! the English dataset when a translation is missing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::items::{merge_localized, Item, ItemKind, RawDataset};

/// Language every dataset is authored in
pub const BASE_LANGUAGE: &str = "en-US";

/// Errors while loading data files
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Path of a dataset for a language
pub fn dataset_path(data_dir: &Path, language: &str, kind: ItemKind) -> PathBuf {
    data_dir.join("locales").join(language).join(kind.file_name())
}

/// Read and parse a dataset. A missing file is `Ok(None)`.
fn read_dataset(path: &Path) -> Result<Option<RawDataset>, LoadError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(LoadError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// All items of one kind in one language
#[derive(Debug, Clone)]
pub struct Catalog {
    kind: ItemKind,
    language: String,
    items: Vec<Item>,
}

impl Catalog {
    pub fn new(kind: ItemKind, language: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            kind,
            language: language.into(),
            items,
        }
    }

    /// Load the catalog for `language`, merged over the English baseline.
    pub fn load(data_dir: &Path, language: &str, kind: ItemKind) -> Result<Self, LoadError> {
        let english_path = dataset_path(data_dir, BASE_LANGUAGE, kind);
        let english = read_dataset(&english_path)?.unwrap_or_else(|| {
            log::warn!("English {} dataset missing at {:?}", kind.name(), english_path);
            RawDataset::new()
        });

        let translated = if language == BASE_LANGUAGE {
            english.clone()
        } else {
            let path = dataset_path(data_dir, language, kind);
            read_dataset(&path)?.unwrap_or_else(|| {
                log::warn!("No {} dataset for {}, using English", kind.name(), language);
                english.clone()
            })
        };

        let items = merge_localized(&english, &translated);
        for item in items.iter().filter(|i| kind == ItemKind::Essence && i.rarity.is_memory_only()) {
            log::warn!("Essence {} has memory-only rarity {}", item.id, item.rarity.name());
        }

        log::info!("Loaded {} {} items for {}", items.len(), kind.name(), language);
        Ok(Self::new(kind, language, items))
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Find an item by ID
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items grouped by rarity (Common first), file order within a rarity
    pub fn in_display_order(&self) -> Vec<&Item> {
        let mut ordered: Vec<&Item> = self.items.iter().collect();
        ordered.sort_by_key(|item| item.rarity.sort_value());
        ordered
    }
}
