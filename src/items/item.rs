//! Item definitions
//!
//! Memories and essences, their rarities, and the placeholder data that
//! drives their scaling descriptions.

use serde::{Deserialize, Deserializer, Serialize};

/// Which dataset an item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Memory,
    Essence,
}

impl ItemKind {
    /// Scale applied to the per-unit rate shown in tooltips.
    /// Essences quote the rate per 50% quality, memories per level.
    pub fn tooltip_multiplier(&self) -> f64 {
        match self {
            ItemKind::Memory => 100.0,
            ItemKind::Essence => 5000.0,
        }
    }

    /// Unit suffix for the tooltip rate
    pub fn tooltip_label(&self) -> &'static str {
        match self {
            ItemKind::Memory => "/ lvl",
            ItemKind::Essence => "/ 50% Qual.",
        }
    }

    /// Dataset file name inside a locale directory
    pub fn file_name(&self) -> &'static str {
        match self {
            ItemKind::Memory => "memories.json",
            ItemKind::Essence => "essences.json",
        }
    }

    /// Scaling value a fresh view starts at (level 0, 100% quality)
    pub fn default_scaling(&self) -> f64 {
        match self {
            ItemKind::Memory => 0.0,
            ItemKind::Essence => 100.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Memory => "memory",
            ItemKind::Essence => "essence",
        }
    }
}

/// Item rarity tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
    Unique,
    Character, // memories only
    Identity,  // memories only
}

impl Rarity {
    /// Get rarity name
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
            Rarity::Unique => "Unique",
            Rarity::Character => "Character",
            Rarity::Identity => "Identity",
        }
    }

    /// Get numeric value for display ordering (lower = shown first)
    pub fn sort_value(&self) -> u8 {
        match self {
            Rarity::Common => 0,
            Rarity::Rare => 1,
            Rarity::Epic => 2,
            Rarity::Legendary => 3,
            Rarity::Unique => 4,
            Rarity::Character => 5,
            Rarity::Identity => 6,
        }
    }

    /// CSS class for rarity-colored text
    pub fn text_class(&self) -> String {
        format!("rarity-{}", self.name())
    }

    /// CSS class for the card background
    pub fn card_class(&self) -> String {
        format!("card-bg-{}", self.name())
    }

    /// Character and Identity only exist on memories
    pub fn is_memory_only(&self) -> bool {
        matches!(self, Rarity::Character | Rarity::Identity)
    }
}

/// Coefficients of the scaling formula for one placeholder
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoefficientSet {
    #[serde(deserialize_with = "lenient_number")]
    pub basic_constant: f64,
    #[serde(rename = "basicAP", deserialize_with = "lenient_number")]
    pub basic_ap: f64,
    #[serde(rename = "basicAD", deserialize_with = "lenient_number")]
    pub basic_ad: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub basic_lvl: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub basic_added_multiplier_per_level: f64,
}

impl CoefficientSet {
    /// Sum of the flat coefficients (constant, AP, AD and level)
    pub fn base(&self) -> f64 {
        self.basic_constant + self.basic_ap + self.basic_ad + self.basic_lvl
    }

    /// True if any coefficient is strictly positive
    pub fn has_positive(&self) -> bool {
        [
            self.basic_constant,
            self.basic_ap,
            self.basic_ad,
            self.basic_lvl,
            self.basic_added_multiplier_per_level,
        ]
        .iter()
        .any(|c| *c > 0.0)
    }
}

/// One `{i}` substitution point of a description template
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaceholderSpec {
    /// Literal markup, or markup holding the computed-value marker
    #[serde(deserialize_with = "null_as_default")]
    pub rendered: String,
    /// Format code such as `#,##0` or `P0`
    #[serde(deserialize_with = "null_as_default")]
    pub format: String,
    #[serde(deserialize_with = "lenient_string")]
    pub scaling_type: Option<String>,
    /// Anything other than an object reads as missing data
    #[serde(deserialize_with = "lenient_coefficients")]
    pub data: Option<CoefficientSet>,
}

impl PlaceholderSpec {
    /// Coefficients usable by the formula, or `None` when the value is unknown.
    ///
    /// A placeholder is calculable when it has data, at least one strictly
    /// positive coefficient, and a scaling type other than `"unknown"`.
    pub fn calculable(&self) -> Option<&CoefficientSet> {
        if self.scaling_type.as_deref() == Some("unknown") {
            return None;
        }
        self.data.as_ref().filter(|data| data.has_positive())
    }

    pub fn is_calculable(&self) -> bool {
        self.calculable().is_some()
    }
}

/// One labelled fact shown under a card's description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyInformation {
    #[serde(deserialize_with = "lenient_text")]
    pub label: String,
    #[serde(deserialize_with = "lenient_text")]
    pub value: String,
}

impl KeyInformation {
    /// Entries missing a label or a value are not shown
    pub fn is_complete(&self) -> bool {
        !self.label.is_empty() && !self.value.is_empty()
    }
}

/// A memory or essence card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub english_name: String,
    pub rarity: Rarity,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub raw_desc: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub raw_desc_vars: Vec<PlaceholderSpec>,
    #[serde(default)]
    pub traveler: Option<String>,
    #[serde(default)]
    pub cooldown_time: Option<f64>,
    /// Key into the achievements table
    #[serde(default, deserialize_with = "lenient_string")]
    pub achievement_key: Option<String>,
    /// Used when the key is not in the achievements table
    #[serde(default, deserialize_with = "lenient_string")]
    pub achievement_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub achievement_description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub informations: Vec<KeyInformation>,
}

impl Item {
    /// Description template, if the item has a non-empty one
    pub fn template(&self) -> Option<&str> {
        self.raw_desc.as_deref().filter(|raw| !raw.is_empty())
    }

    /// Cooldown in seconds, if the item has a non-zero one
    pub fn cooldown(&self) -> Option<f64> {
        self.cooldown_time.filter(|c| *c != 0.0)
    }

    /// Key information entries with both a label and a value
    pub fn key_informations(&self) -> impl Iterator<Item = &KeyInformation> {
        self.informations.iter().filter(|info| info.is_complete())
    }

    /// Case-insensitive tag membership
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Accept numbers, numeric strings and anything else as 0
fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let number = match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(if number.is_finite() { number } else { 0.0 })
}

/// Non-empty strings only; other values read as absent
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) if !s.is_empty() => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// Strings as-is, numbers and booleans printed, anything else empty
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

fn lenient_coefficients<'de, D>(deserializer: D) -> Result<Option<CoefficientSet>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
