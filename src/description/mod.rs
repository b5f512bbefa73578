//! Description engine
//!
//! Turns an item's templated description into HTML for a given scaling
//! value (level for memories, quality percentage for essences).
//!
//! The pipeline is pure: resolve placeholders (evaluating and formatting
//! computed values), then translate the game markup.

pub mod format;
pub mod formula;
pub mod markup;
pub mod resolver;

pub use format::{format_value, FormatCode, FormatCodeError, FormattedValue};
pub use formula::{evaluate, tooltip_rate};
pub use markup::{MarkupTranslator, DEFAULT_SPRITE_DIR};
pub use resolver::{render_token, resolve, COMPUTED_MARKER};

use crate::items::{Item, ItemKind};

/// Errors raised while rendering a description
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DescriptionError {
    /// A computed placeholder declares a format code we cannot render
    #[error("placeholder {{{index}}}: {source}")]
    Format {
        index: usize,
        source: FormatCodeError,
    },
}

/// Renders item descriptions to HTML
#[derive(Debug, Clone, Default)]
pub struct DescriptionEngine {
    markup: MarkupTranslator,
}

impl DescriptionEngine {
    pub fn new(sprite_dir: impl Into<String>) -> Self {
        Self {
            markup: MarkupTranslator::new(sprite_dir),
        }
    }

    pub fn markup(&self) -> &MarkupTranslator {
        &self.markup
    }

    /// Render an item's description at a scaling value.
    ///
    /// Items without a template render their plain description.
    pub fn render(
        &self,
        item: &Item,
        scaling: f64,
        kind: ItemKind,
    ) -> Result<String, DescriptionError> {
        match item.template() {
            Some(template) => {
                let resolved = resolve(template, &item.raw_desc_vars, scaling, kind)?;
                Ok(self.markup.translate(&resolved))
            }
            None => Ok(self.markup.translate(&item.description)),
        }
    }

    /// Like [`render`](Self::render), but falls back to the plain description
    /// when the template cannot be rendered.
    pub fn render_or_plain(&self, item: &Item, scaling: f64, kind: ItemKind) -> String {
        self.render(item, scaling, kind).unwrap_or_else(|e| {
            log::warn!("Rendering plain description for {}: {}", item.id, e);
            self.markup.translate(&item.description)
        })
    }
}
