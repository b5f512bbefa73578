//! Locale merging
//!
//! Builds item records by overlaying a translated dataset on the English one.

use serde_json::{Map, Value};

use super::item::Item;

/// A dataset as stored on disk: item key -> item object
pub type RawDataset = Map<String, Value>;

/// Merge a translated dataset over the English baseline.
///
/// Items follow the translated dataset's key order. Translated fields replace
/// English ones field by field; `id` is always the dataset key and
/// `englishName` is always the English `name`. Records that do not form a
/// valid item are skipped with a warning.
pub fn merge_localized(english: &RawDataset, translated: &RawDataset) -> Vec<Item> {
    let mut items = Vec::with_capacity(translated.len());

    for (key, entry) in translated {
        let Some(overlay) = entry.as_object() else {
            log::warn!("Skipping {}: entry is not an object", key);
            continue;
        };

        let baseline = english.get(key).and_then(Value::as_object);
        let mut merged = baseline.cloned().unwrap_or_default();
        for (field, value) in overlay {
            merged.insert(field.clone(), value.clone());
        }

        let english_name = baseline
            .and_then(|b| b.get("name"))
            .and_then(Value::as_str)
            .unwrap_or_default();
        merged.insert("id".to_string(), Value::String(key.clone()));
        merged.insert("englishName".to_string(), Value::String(english_name.to_string()));

        match serde_json::from_value::<Item>(Value::Object(merged)) {
            Ok(item) => items.push(item),
            Err(e) => log::warn!("Skipping {}: {}", key, e),
        }
    }

    items
}
