//! Scaling formulas
//!
//! The same linear formula serves memories (scaled by level) and essences
//! (scaled by quality percentage).

use crate::items::{CoefficientSet, ItemKind};

/// Value of a placeholder at the given scaling value.
///
/// `(constant + AP + AD + lvl) * (1 + multiplier * scaling) + lvl * scaling`
pub fn evaluate(coeffs: &CoefficientSet, scaling: f64) -> f64 {
    coeffs.base() * (1.0 + coeffs.basic_added_multiplier_per_level * scaling)
        + coeffs.basic_lvl * scaling
}

/// Growth per tooltip unit: per level for memories, per 50% quality for essences.
pub fn tooltip_rate(coeffs: &CoefficientSet, kind: ItemKind) -> f64 {
    (coeffs.base() * coeffs.basic_added_multiplier_per_level + coeffs.basic_lvl)
        * kind.tooltip_multiplier()
}
