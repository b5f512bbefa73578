//! Item system

pub mod item;
pub mod merge;

pub use item::{Item, ItemKind, Rarity, PlaceholderSpec, CoefficientSet, KeyInformation};
pub use merge::{merge_localized, RawDataset};
