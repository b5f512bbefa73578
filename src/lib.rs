//! Memoria - card codex for memories and essences
//!
//! Renders item descriptions whose numbers scale with a level or quality
//! value, with localized item data and keyword lookups.

pub mod items;
pub mod description;
pub mod data;
pub mod config;

// Re-export commonly used types
pub use items::{Item, ItemKind, Rarity};
pub use description::{DescriptionEngine, DescriptionError};
pub use data::{Achievements, Catalog, Keywords, TravelerNames};
pub use config::Settings;
