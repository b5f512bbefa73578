//! Data loading and localized lookups
//!
//! This module loads item catalogs from per-language JSON files and the
//! keyword, traveler and achievement tables used to display them.

pub mod loader;
pub mod keywords;
pub mod achievements;

pub use loader::{Catalog, LoadError, dataset_path, BASE_LANGUAGE};
pub use keywords::{Keywords, KeywordCategory, TravelerNames};
pub use achievements::{Achievement, Achievements, achievements_path};
