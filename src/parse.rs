//! Numeric parsing for field edits.
//!
//! Two policies are supported:
//!
//! | Policy | Unparsable input |
//! |--------|------------------|
//! | **Lenient** | Coerced to `0.0`; a leading number is accepted (`"0.12abc"` → 0.12) |
//! | **Strict** | Rejected with [`Error::Validation`] |

use crate::asset::AssetField;
use crate::error::{Error, Result};

/// How raw text from field edits is turned into numbers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ParsePolicy {
    /// Reject anything that is not a complete, finite number.
    Strict,
    /// Parse the leading number, fall back to zero.
    #[default]
    Lenient,
}

impl ParsePolicy {
    /// Parse `raw` as the value of `field`.
    pub fn parse(self, field: AssetField, raw: &str) -> Result<f64> {
        match self {
            ParsePolicy::Strict => parse_strict(raw).ok_or_else(|| Error::Validation {
                field,
                value: raw.to_string(),
            }),
            ParsePolicy::Lenient => {
                let value = parse_lenient(raw);
                if value == 0.0 && parse_strict(raw) != Some(0.0) {
                    log::warn!("coerced {field} input {raw:?} to 0");
                }
                Ok(value)
            }
        }
    }
}

fn parse_strict(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse the longest leading decimal number of `raw`, or 0.
///
/// Leading whitespace is skipped, trailing garbage is ignored, `Infinity`
/// is recognised, and NaN collapses to 0.
pub fn parse_lenient(raw: &str) -> f64 {
    let s = raw.trim_start();
    let prefix = leading_number(s);
    if prefix.is_empty() {
        return 0.0;
    }
    match prefix.parse::<f64>() {
        Ok(v) if !v.is_nan() => v,
        _ => 0.0,
    }
}

fn leading_number(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    if s[i..].starts_with("Infinity") {
        return &s[..i + "Infinity".len()];
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        digits += j - frac_start;
        if digits > 0 {
            i = j;
        }
    }

    if digits == 0 {
        return "";
    }

    // Exponent only counts when at least one digit follows it.
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    &s[..i]
}
