//! Scalar value classification and normalization.
//!
//! Number/unit/percentage/color detection, default-unit injection, opacity
//! and hex color conversion, and camelCase → dash-case property naming.

use crate::value::Value;
use regex::Regex;
use std::sync::LazyLock;

/// Properties whose values never receive a default unit.
pub const IGNORED_PROPERTIES: &[&str] = &["font-weight", "opacity", "content", "columns"];

/// Suffixes that mark a value as already carrying a unit.
pub const UNIT_SUFFIXES: &[&str] = &[
    "%", "cm", "rem", "em", "ex", "in", "mm", "pc", "px", "pt", "vh", "vw", "vmin",
];

static PERCENTAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+%$").expect("valid percentage pattern"));

static COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(#[\d\w]+|\w+\((?:\d+%?(?:,\s)*){3}(?:\d*\.?\d+)?\))")
        .expect("valid color pattern")
});

static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])([A-Z])").expect("valid camel case pattern"));

/// Units appended to bare numbers for one processing run.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Units {
    /// Unit for every property except `line-height`.
    pub default: String,
    /// Unit for `line-height`.
    pub line_height: String,
}

impl Default for Units {
    fn default() -> Self {
        Self {
            default: "rem".into(),
            line_height: "em".into(),
        }
    }
}

impl Units {
    pub fn new(default: impl Into<String>, line_height: impl Into<String>) -> Self {
        Self {
            default: default.into(),
            line_height: line_height.into(),
        }
    }

    /// Render `value` for `property`, appending the configured unit to a bare
    /// number. `None` as the property leaves the value untouched.
    ///
    /// Values are returned as-is for ignored properties, the number `0`, and
    /// anything containing whitespace (already a composite value).
    pub fn apply(&self, value: &Value, property: Option<&str>) -> String {
        let rendered = value.to_string();
        let Some(property) = property else {
            return rendered;
        };

        if IGNORED_PROPERTIES.contains(&property)
            || matches!(value, Value::Number(n) if *n == 0.0)
            || rendered.chars().any(char::is_whitespace)
        {
            return rendered;
        }

        let numeric = match value {
            Value::Number(_) => true,
            Value::Str(s) => is_number(s),
            _ => false,
        };
        if !numeric || is_unit(&rendered) {
            return rendered;
        }

        let suffix = if property == "line-height" {
            &self.line_height
        } else {
            &self.default
        };
        format!("{rendered}{suffix}")
    }

    /// Normalize a value that is not bound to a property yet.
    pub fn bare(&self, value: &Value) -> String {
        self.apply(value, Some(""))
    }
}

/// True for plain decimal numbers: digits and `.` only, parsing to a finite
/// float. `10px`, `-1` and `calc(1)` are not numbers.
pub fn is_number(value: &str) -> bool {
    !value.is_empty()
        && value.chars().all(|c| c.is_ascii_digit() || c == '.')
        && value.parse::<f64>().is_ok_and(f64::is_finite)
}

pub fn is_unit(value: &str) -> bool {
    UNIT_SUFFIXES.iter().any(|unit| value.ends_with(unit))
}

pub fn is_percentage(value: &str) -> bool {
    PERCENTAGE.is_match(value)
}

/// Hex (`#fff`) or functional (`rgb(1, 2, 3)`, `hsla(1, 2%, 3%, .5)`) colors.
pub fn is_color(value: &str) -> bool {
    COLOR.is_match(value)
}

/// Opacity as a fraction: `20%` and `20` both give `0.2`; values at or
/// below 1 pass through unchanged.
///
/// `0.5` and `50` therefore mean the same opacity, but `1` means fully opaque
/// rather than 1%.
pub fn calc_opacity(value: &Value) -> Value {
    match value {
        Value::Str(s) if is_percentage(s) => {
            let percent: f64 = s.trim_end_matches('%').parse().unwrap_or_default();
            Value::Number(percent / 100.0)
        }
        other => match other.as_number() {
            Some(n) if n > 1.0 => Value::Number(n / 100.0),
            _ => other.clone(),
        },
    }
}

/// Convert a 3- or 6-digit hex color to `rgb(r, g, b)`, or to
/// `rgba(r, g, b, a)` when a non-zero opacity is given.
///
/// Returns `None` when the color is not valid hex.
pub fn hex_to_rgba(color: &str, opacity: Option<&Value>) -> Option<String> {
    let hex = color.strip_prefix('#').unwrap_or(color);
    if !hex.is_ascii() {
        return None;
    }

    let hex: String = if hex.len() == 3 {
        hex.chars().flat_map(|c| [c, c]).collect()
    } else {
        hex.to_string()
    };
    if hex.len() < 6 {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    let (r, g, b) = (channel(0..2)?, channel(2..4)?, channel(4..6)?);

    match opacity.map(calc_opacity) {
        Some(alpha) if alpha.is_truthy() => Some(format!("rgba({r}, {g}, {b}, {alpha})")),
        _ => Some(format!("rgb({r}, {g}, {b})")),
    }
}

/// `lineHeight` → `line-height`.
pub fn to_dash_case(value: &str) -> String {
    CAMEL_BOUNDARY
        .replace_all(value, "$1-$2")
        .to_lowercase()
}

/// Prefix a property name: `prefix("top", Some("margin"), &[])` is
/// `margin-top`. A prefix listed in `ignored` only dash-cases the name.
pub fn prefix(value: &str, prefix: Option<&str>, ignored: &[&str]) -> String {
    match prefix {
        None => value.to_string(),
        Some(p) if ignored.contains(&p) => to_dash_case(value),
        Some(p) => format!("{p}-{}", to_dash_case(value)),
    }
}
