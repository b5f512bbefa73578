//! Markup translation
//!
//! Converts the game's inline rich-text tags into HTML:
//! - `<color=X>` / `</color>` become a styled `span`
//! - `<sprite=N>` becomes an inline image, wrapped in a tooltip span when it
//!   carries a `data-tooltip-formula` attribute
//! - newlines become `<br>`

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Where sprite images live unless configured otherwise
pub const DEFAULT_SPRITE_DIR: &str = "assets/game/sprites";

static COLOR_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<color=(.*?)>").unwrap());
static SPRITE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<sprite=(\d+)(?: data-tooltip-formula="(.*?)")?>"#).unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupTranslator {
    sprite_dir: String,
}

impl MarkupTranslator {
    pub fn new(sprite_dir: impl Into<String>) -> Self {
        let sprite_dir = sprite_dir.into();
        Self {
            sprite_dir: sprite_dir.trim_end_matches('/').to_string(),
        }
    }

    pub fn sprite_dir(&self) -> &str {
        &self.sprite_dir
    }

    /// Image path for a sprite id. Existence is not checked.
    pub fn sprite_path(&self, id: &str) -> String {
        format!("{}/{}.png", self.sprite_dir, id)
    }

    /// Translate game markup into HTML. Text without tags only has its
    /// newlines replaced, so translating twice changes nothing.
    pub fn translate(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let colored = COLOR_OPEN.replace_all(text, |caps: &Captures| {
            let color = &caps[1];
            let css = if color.starts_with('#') {
                color.to_string()
            } else {
                color.to_lowercase()
            };
            format!("<span style=\"color: {}\">", css)
        });
        let closed = colored.replace("</color>", "</span>");

        let with_sprites = SPRITE.replace_all(&closed, |caps: &Captures| {
            let id = &caps[1];
            let image = format!(
                "<img src=\"{}\" class=\"inline-sprite\" alt=\"Sprite {}\">",
                self.sprite_path(id),
                id
            );
            match caps.get(2) {
                Some(formula) => format!(
                    "<span class=\"tooltip\" data-tip=\"{}\">{}</span>",
                    formula.as_str(),
                    image
                ),
                None => image,
            }
        });

        with_sprites.replace('\n', "<br>")
    }
}

impl Default for MarkupTranslator {
    fn default() -> Self {
        Self::new(DEFAULT_SPRITE_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_named_color_is_lowercased() {
        let markup = MarkupTranslator::default();
        assert_eq!(
            markup.translate("<color=Red>hot</color>"),
            "<span style=\"color: red\">hot</span>"
        );
    }

    #[test]
    fn test_hex_color_kept_verbatim() {
        let markup = MarkupTranslator::default();
        assert_eq!(
            markup.translate("<color=#00FFCC>35%</color>"),
            "<span style=\"color: #00FFCC\">35%</span>"
        );
    }

    #[test]
    fn test_sprite_without_tooltip() {
        let markup = MarkupTranslator::new("sprites/");
        assert_eq!(
            markup.translate("<sprite=1>"),
            "<img src=\"sprites/1.png\" class=\"inline-sprite\" alt=\"Sprite 1\">"
        );
    }

    #[test]
    fn test_sprite_with_tooltip() {
        let markup = MarkupTranslator::default();
        assert_eq!(
            markup.translate("10<sprite=5 data-tooltip-formula=\"2.5 / lvl\">"),
            "10<span class=\"tooltip\" data-tip=\"2.5 / lvl\">\
             <img src=\"assets/game/sprites/5.png\" class=\"inline-sprite\" alt=\"Sprite 5\">\
             </span>"
        );
    }

    #[test]
    fn test_newlines_and_plain_text() {
        let markup = MarkupTranslator::default();
        assert_eq!(markup.translate("a\nb"), "a<br>b");
        assert_eq!(markup.translate("no tags here"), "no tags here");
        assert_eq!(markup.translate(""), "");
    }

    fn fragment() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("<color=Red>".to_string()),
            Just("<color=#00ffcc>".to_string()),
            Just("</color>".to_string()),
            Just("<sprite=5>".to_string()),
            Just("<sprite=12 data-tooltip-formula=\"3 / lvl\">".to_string()),
            Just("\n".to_string()),
            "[a-zA-Z0-9 %.?]{0,8}",
        ]
    }

    proptest! {
        #[test]
        fn translate_is_idempotent(parts in prop::collection::vec(fragment(), 0..12)) {
            let markup = MarkupTranslator::default();
            let once = markup.translate(&parts.concat());
            prop_assert_eq!(markup.translate(&once), once);
        }

        #[test]
        fn untagged_text_only_loses_newlines(text in "[a-zA-Z0-9 %.?\n]{0,40}") {
            let markup = MarkupTranslator::default();
            prop_assert_eq!(markup.translate(&text), text.replace('\n', "<br>"));
        }
    }
}
