//! Value formatting
//!
//! Turns an evaluated placeholder value into display text and tooltip text
//! according to the placeholder's format code.

use std::fmt;
use std::str::FromStr;

use crate::items::ItemKind;

/// Extra fractional digits used to detect exact decimal ties
const TIE_CHECK_DIGITS: usize = 40;

/// Format code was not one of the known codes
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown format code {0:?}")]
pub struct FormatCodeError(pub String);

/// Closed set of format codes found in item data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatCode {
    /// `#,##0`
    Integer,
    /// `P0`
    Percent,
    /// `#,##0'%'`
    IntegerPercentSign,
    /// `#,##0.#`, `0.#`, `###,0.#`
    OptionalDecimal,
    /// `#,##0.0`, `#.0`
    FixedDecimal,
    /// `#,##0.#%`
    OptionalDecimalPercent,
    /// `0.##`
    TwoOptionalDecimals,
    /// `#,##0.0%`
    FixedDecimalPercent,
}

impl FromStr for FormatCode {
    type Err = FormatCodeError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code {
            "#,##0" => Ok(FormatCode::Integer),
            "P0" => Ok(FormatCode::Percent),
            "#,##0'%'" => Ok(FormatCode::IntegerPercentSign),
            "#,##0.#" | "0.#" | "###,0.#" => Ok(FormatCode::OptionalDecimal),
            "#,##0.0" | "#.0" => Ok(FormatCode::FixedDecimal),
            "#,##0.#%" => Ok(FormatCode::OptionalDecimalPercent),
            "0.##" => Ok(FormatCode::TwoOptionalDecimals),
            "#,##0.0%" => Ok(FormatCode::FixedDecimalPercent),
            other => Err(FormatCodeError(other.to_string())),
        }
    }
}

/// How a value maps onto a percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    /// Shown as-is
    Plain,
    /// A fraction shown as a percentage (x100, `%`)
    Ratio,
    /// Already a percentage, only gains the `%` sign
    PercentSign,
}

/// Decimal places of the rendered number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decimals {
    Whole,
    /// Up to n digits, trailing zeros dropped
    Optional(usize),
    /// Exactly n digits
    Fixed(usize),
}

impl Decimals {
    pub fn render(&self, value: f64) -> String {
        match *self {
            Decimals::Whole => round_to_string(value),
            Decimals::Optional(digits) => trim_fixed(&to_fixed(value, digits)),
            Decimals::Fixed(digits) => to_fixed(value, digits),
        }
    }
}

impl FormatCode {
    /// Scale used for the value. `#,##0` inside a color tag is an AP/AD ratio.
    pub fn scale(&self, color_wrapped: bool) -> Scale {
        match self {
            FormatCode::Integer if color_wrapped => Scale::Ratio,
            FormatCode::Integer
            | FormatCode::OptionalDecimal
            | FormatCode::FixedDecimal
            | FormatCode::TwoOptionalDecimals => Scale::Plain,
            FormatCode::Percent
            | FormatCode::OptionalDecimalPercent
            | FormatCode::FixedDecimalPercent => Scale::Ratio,
            FormatCode::IntegerPercentSign => Scale::PercentSign,
        }
    }

    pub fn decimals(&self) -> Decimals {
        match self {
            FormatCode::Integer | FormatCode::Percent | FormatCode::IntegerPercentSign => {
                Decimals::Whole
            }
            FormatCode::OptionalDecimal | FormatCode::OptionalDecimalPercent => {
                Decimals::Optional(1)
            }
            FormatCode::FixedDecimal | FormatCode::FixedDecimalPercent => Decimals::Fixed(1),
            FormatCode::TwoOptionalDecimals => Decimals::Optional(2),
        }
    }
}

/// Display and tooltip text for one computed placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedValue {
    pub display: String,
    pub tooltip: String,
}

impl FormattedValue {
    /// Whether the display text already ends in a percent sign
    pub fn is_percent(&self) -> bool {
        self.display.ends_with('%')
    }
}

impl fmt::Display for FormattedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display)
    }
}

/// Format a computed value and its per-unit rate.
///
/// Values inside a color tag are always shown as a ratio percentage, keeping
/// the code's decimal places. The tooltip scale always follows the code.
pub fn format_value(
    value: f64,
    rate: f64,
    code: FormatCode,
    color_wrapped: bool,
    kind: ItemKind,
) -> FormattedValue {
    let display_scale = if color_wrapped { Scale::Ratio } else { code.scale(false) };
    let decimals = code.decimals();

    let display = match display_scale {
        Scale::Plain => decimals.render(value),
        Scale::Ratio => format!("{}%", decimals.render(value * 100.0)),
        Scale::PercentSign => format!("{}%", decimals.render(value)),
    };

    let label = kind.tooltip_label();
    let tooltip = match (code.scale(color_wrapped), decimals) {
        (Scale::Ratio, _) => format!("{}% {}", trim_fixed(&to_fixed(rate, 2)), label),
        (Scale::PercentSign, _) => {
            format!("{}% {}", trim_fixed(&to_fixed(rate / 100.0, 2)), label)
        }
        (Scale::Plain, Decimals::Fixed(_)) => {
            format!("{} {}", trim_fixed(&to_fixed(rate / 100.0, 1)), label)
        }
        (Scale::Plain, _) => format!("{} {}", trim_fixed(&to_fixed(rate / 100.0, 2)), label),
    };

    FormattedValue { display, tooltip }
}

/// Round half toward positive infinity (`12.5 -> 13`, `-2.5 -> -2`).
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

fn round_to_string(value: f64) -> String {
    let rounded = round_half_up(value);
    if rounded == 0.0 {
        // no "-0"
        "0".to_string()
    } else {
        format!("{}", rounded)
    }
}

/// Fixed-point rendering with exactly `digits` decimals.
///
/// Ties on the exact binary value round away from zero, so `2.25` gives
/// `"2.3"`. Negative inputs keep their sign even when they round to zero.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let magnitude = value.abs();
    let expanded = format!("{:.*}", digits + TIE_CHECK_DIGITS, magnitude);
    let (head, tail) = expanded.split_at(expanded.len() - TIE_CHECK_DIGITS);
    let is_tie = tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0');

    let fixed = if is_tie {
        increment_last_digit(head.trim_end_matches('.'))
    } else {
        format!("{:.*}", digits, magnitude)
    };

    if value < 0.0 {
        format!("-{}", fixed)
    } else {
        fixed
    }
}

/// Drop trailing fractional zeros and a dangling dot; `-0` becomes `0`.
pub fn trim_fixed(fixed: &str) -> String {
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed
    };
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

fn increment_last_digit(number: &str) -> String {
    let mut chars: Vec<char> = number.chars().collect();
    let mut i = chars.len();
    loop {
        if i == 0 {
            chars.insert(0, '1');
            break;
        }
        i -= 1;
        match chars[i] {
            '.' => continue,
            '9' => chars[i] = '0',
            c => {
                chars[i] = char::from_digit(c.to_digit(10).unwrap_or(0) + 1, 10).unwrap_or(c);
                break;
            }
        }
    }
    chars.into_iter().collect()
}
