//! Template resolution
//!
//! Renders each placeholder of an item into markup and splices the results
//! into the `{i}` slots of the description template.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use super::format::{format_value, FormatCode, FormatCodeError, FormattedValue};
use super::formula::{evaluate, tooltip_rate};
use super::DescriptionError;
use crate::items::{ItemKind, PlaceholderSpec};

/// Marks a placeholder whose value comes from the scaling formula
pub const COMPUTED_MARKER: &str = "<sprite=5>";

const UNKNOWN_TOOLTIP: &str = "Unknown value";

static COLOR_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<color=[^>]*>(.*?)</color>").unwrap());
static PERCENT_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\d.]+%").unwrap());

/// Resolve a description template for the given scaling value.
///
/// Every occurrence of `{i}` is replaced by the rendered placeholder `i`.
/// Indices without a placeholder are left as written.
pub fn resolve(
    template: &str,
    vars: &[PlaceholderSpec],
    scaling: f64,
    kind: ItemKind,
) -> Result<String, DescriptionError> {
    let tokens = vars
        .iter()
        .enumerate()
        .map(|(index, spec)| {
            render_token(spec, scaling, kind)
                .map_err(|source| DescriptionError::Format { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(substitute_placeholders(template, &tokens))
}

/// Render one placeholder into markup.
///
/// Literal placeholders come back unchanged. Computed ones get their number
/// replaced and a tooltip attached to the marker, or a `?` when the value
/// cannot be calculated.
pub fn render_token(
    spec: &PlaceholderSpec,
    scaling: f64,
    kind: ItemKind,
) -> Result<String, FormatCodeError> {
    if !spec.rendered.contains(COMPUTED_MARKER) {
        return Ok(spec.rendered.clone());
    }

    let Some(coeffs) = spec.calculable() else {
        log::debug!("Placeholder {:?} has no usable data", spec.rendered);
        return Ok(mark_unknown(&spec.rendered));
    };

    let code: FormatCode = spec.format.parse()?;
    // lifts values stored just below a decimal tie over it
    let value = evaluate(coeffs, scaling) + f64::EPSILON;
    let rate = tooltip_rate(coeffs, kind);
    let color_wrapped = COLOR_SPAN.is_match(&spec.rendered);

    let formatted = format_value(value, rate, code, color_wrapped, kind);
    Ok(insert_value(&spec.rendered, &formatted))
}

/// Single left-to-right pass; inserted tokens are never rescanned.
fn substitute_placeholders(template: &str, tokens: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let digits = after.bytes().take_while(|b| b.is_ascii_digit()).count();

        let token = if digits > 0 && after[digits..].starts_with('}') {
            after[..digits].parse::<usize>().ok().and_then(|i| tokens.get(i))
        } else {
            None
        };

        match token {
            Some(token) => {
                out.push_str(token);
                rest = &after[digits + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

fn insert_value(rendered: &str, formatted: &FormattedValue) -> String {
    let mut token = rendered.to_string();

    if formatted.is_percent() {
        if let Some(sign) = find_outside_tags(&token, |text| text.find('%').map(|i| i..i + 1)) {
            token.replace_range(sign, "");
        }
    }

    let target = match COLOR_SPAN.captures(&token).and_then(|caps| caps.get(1)) {
        Some(inner) => inner.range(),
        None => 0..leading_number_len(&token),
    };
    token.replace_range(target, &formatted.display);

    attach_tooltip(&token, &formatted.tooltip)
}

fn mark_unknown(rendered: &str) -> String {
    let marked = match find_outside_tags(rendered, |text| PERCENT_NUMBER.find(text).map(|m| m.range())) {
        Some(number) => {
            let mut token = rendered.to_string();
            token.insert(number.end - 1, '?');
            token
        }
        None => format!("{}?", rendered),
    };
    attach_tooltip(&marked, UNKNOWN_TOOLTIP)
}

fn attach_tooltip(token: &str, tooltip: &str) -> String {
    token.replacen(
        COMPUTED_MARKER,
        &format!("<sprite=5 data-tooltip-formula=\"{}\">", tooltip),
        1,
    )
}

fn leading_number_len(token: &str) -> usize {
    token.bytes().take_while(|b| b.is_ascii_digit() || *b == b'.').count()
}

/// First match of `find` in the text between tags, as a range into `s`
fn find_outside_tags<F>(s: &str, find: F) -> Option<Range<usize>>
where
    F: Fn(&str) -> Option<Range<usize>>,
{
    text_segments(s).into_iter().find_map(|segment| {
        find(&s[segment.clone()]).map(|m| segment.start + m.start..segment.start + m.end)
    })
}

/// Byte ranges of `s` not inside `<...>`. An unclosed `<` runs to the end.
fn text_segments(s: &str) -> Vec<Range<usize>> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut in_tag = false;

    for (i, c) in s.char_indices() {
        match c {
            '<' if !in_tag => {
                if i > start {
                    segments.push(start..i);
                }
                in_tag = true;
            }
            '>' if in_tag => {
                in_tag = false;
                start = i + 1;
            }
            _ => {}
        }
    }
    if !in_tag && start < s.len() {
        segments.push(start..s.len());
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::CoefficientSet;
    use proptest::prelude::*;

    fn computed(rendered: &str, format: &str, data: CoefficientSet) -> PlaceholderSpec {
        PlaceholderSpec {
            rendered: rendered.to_string(),
            format: format.to_string(),
            scaling_type: None,
            data: Some(data),
        }
    }

    fn constant(value: f64) -> CoefficientSet {
        CoefficientSet { basic_constant: value, ..Default::default() }
    }

    #[test]
    fn test_flat_damage() {
        let vars = vec![computed("<sprite=5>", "#,##0", constant(10.0))];
        let resolved = resolve("Deals {0} damage.", &vars, 5.0, ItemKind::Memory).unwrap();
        assert_eq!(
            resolved,
            "Deals 10<sprite=5 data-tooltip-formula=\"0 / lvl\"> damage."
        );
    }

    #[test]
    fn test_level_scaling_replaces_leading_number() {
        let data = CoefficientSet { basic_constant: 10.0, basic_lvl: 2.0, ..Default::default() };
        let vars = vec![computed("12<sprite=5>", "#,##0", data)];
        // (10 + 2) * 1 + 2 * 3 = 18, rate 2 * 100 / 100 = 2
        let resolved = resolve("Heal {0}.", &vars, 3.0, ItemKind::Memory).unwrap();
        assert_eq!(resolved, "Heal 18<sprite=5 data-tooltip-formula=\"2 / lvl\">.");
    }

    #[test]
    fn test_percent_not_doubled() {
        let data = CoefficientSet { basic_constant: 0.2, ..Default::default() };
        let vars = vec![computed("20%<sprite=5>", "P0", data)];
        let resolved = resolve("+{0} speed", &vars, 0.0, ItemKind::Memory).unwrap();
        assert_eq!(resolved, "+20%<sprite=5 data-tooltip-formula=\"0% / lvl\"> speed");
    }

    #[test]
    fn test_essence_percent_sign_code() {
        let data = CoefficientSet { basic_constant: 20.0, ..Default::default() };
        let vars = vec![computed("20%<sprite=5>", "#,##0'%'", data)];
        let resolved = resolve("{0} crit", &vars, 100.0, ItemKind::Essence).unwrap();
        assert_eq!(resolved, "20%<sprite=5 data-tooltip-formula=\"0% / 50% Qual.\"> crit");
    }

    #[test]
    fn test_color_wrapped_ratio() {
        let data = CoefficientSet { basic_ap: 0.35, ..Default::default() };
        let vars = vec![computed("<color=#00ffcc>0</color><sprite=5>", "#,##0.#", data)];
        let resolved = resolve("Scales {0}", &vars, 0.0, ItemKind::Memory).unwrap();
        assert_eq!(
            resolved,
            "Scales <color=#00ffcc>35%</color><sprite=5 data-tooltip-formula=\"0 / lvl\">"
        );
    }

    #[test]
    fn test_color_wrapped_integer_uses_ratio_tooltip() {
        let data = CoefficientSet {
            basic_ad: 0.5,
            basic_added_multiplier_per_level: 0.02,
            ..Default::default()
        };
        let vars = vec![computed("<color=#ff8800>50%</color><sprite=5>", "#,##0", data)];
        // 0.5 * (1 + 0.02 * 10) = 0.6; rate 0.5 * 0.02 * 100 = 1
        let resolved = resolve("{0}", &vars, 10.0, ItemKind::Memory).unwrap();
        assert_eq!(
            resolved,
            "<color=#ff8800>60%</color><sprite=5 data-tooltip-formula=\"1% / lvl\">"
        );
    }

    #[test]
    fn test_unknown_without_data() {
        let spec = PlaceholderSpec {
            rendered: "15%<sprite=5>".to_string(),
            format: "P0".to_string(),
            scaling_type: None,
            data: None,
        };
        let token = render_token(&spec, 3.0, ItemKind::Memory).unwrap();
        assert_eq!(token, "15?%<sprite=5 data-tooltip-formula=\"Unknown value\">");
    }

    #[test]
    fn test_unknown_appends_when_no_percent() {
        let spec = PlaceholderSpec {
            rendered: "<sprite=5>".to_string(),
            format: "#,##0".to_string(),
            scaling_type: Some("unknown".to_string()),
            data: Some(constant(4.0)),
        };
        let token = render_token(&spec, 3.0, ItemKind::Memory).unwrap();
        assert_eq!(token, "<sprite=5 data-tooltip-formula=\"Unknown value\">?");
    }

    #[test]
    fn test_zero_coefficients_are_unknown() {
        let spec = computed("8<sprite=5>", "#,##0", CoefficientSet::default());
        let token = render_token(&spec, 1.0, ItemKind::Memory).unwrap();
        assert!(token.ends_with('?'));
        assert!(token.contains("Unknown value"));
    }

    #[test]
    fn test_literal_placeholder_untouched() {
        let spec = PlaceholderSpec {
            rendered: "<sprite=1>".to_string(),
            ..Default::default()
        };
        assert_eq!(render_token(&spec, 7.0, ItemKind::Memory).unwrap(), "<sprite=1>");
    }

    #[test]
    fn test_unknown_format_code_is_error() {
        let vars = vec![
            PlaceholderSpec { rendered: "<sprite=2>".to_string(), ..Default::default() },
            computed("<sprite=5>", "C2", constant(1.0)),
        ];
        let err = resolve("{0} {1}", &vars, 0.0, ItemKind::Memory).unwrap_err();
        assert_eq!(
            err,
            DescriptionError::Format { index: 1, source: FormatCodeError("C2".to_string()) }
        );
    }

    #[test]
    fn test_every_occurrence_replaced() {
        let tokens = vec!["A".to_string(), "B".to_string()];
        assert_eq!(substitute_placeholders("{0}-{1}-{0}", &tokens), "A-B-A");
    }

    #[test]
    fn test_inserted_tokens_not_rescanned() {
        let tokens = vec!["{1}".to_string(), "B".to_string()];
        assert_eq!(substitute_placeholders("{0}", &tokens), "{1}");
    }

    #[test]
    fn test_unmatched_braces_left_alone() {
        let tokens = vec!["A".to_string()];
        assert_eq!(substitute_placeholders("{7} {x} {0 {} {0}", &tokens), "{7} {x} {0 {} A");
    }

    #[test]
    fn test_text_segments_skip_tags() {
        let s = "12<sprite=5 data-tooltip-formula=\"3%\">%";
        let segments = text_segments(s);
        assert_eq!(segments.len(), 2);
        assert_eq!(&s[segments[0].clone()], "12");
        assert_eq!(&s[segments[1].clone()], "%");
    }

    proptest! {
        #[test]
        fn missing_data_always_marks_unknown(
            prefix in "[0-9.]{0,4}%?",
            format in prop::sample::select(vec!["#,##0", "P0", "0.#", "bogus"]),
            scaling in -100f64..5000.0,
        ) {
            let spec = PlaceholderSpec {
                rendered: format!("{}<sprite=5>", prefix),
                format: format.to_string(),
                scaling_type: None,
                data: None,
            };
            let resolved = resolve("x {0} y", &[spec], scaling, ItemKind::Essence);
            prop_assert!(resolved.is_ok());
            prop_assert!(resolved.unwrap().contains('?'));
        }
    }
}
