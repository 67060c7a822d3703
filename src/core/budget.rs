//! Budget strings such as "15M", "$500k" or "2000000" to absolute amounts.

use crate::domain::model::Value;
use crate::utils::error::ConversionError;
use regex::Regex;
use std::num::IntErrorKind;
use std::sync::LazyLock;

static MILLIONS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[Mm]").unwrap());
static THOUSANDS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[Kk]").unwrap());
static NON_NUMERIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\d\.]").unwrap());

fn parse_int(digits: &str, original: &str) -> Result<i64, ConversionError> {
    digits.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            ConversionError::overflow(original)
        }
        _ => ConversionError::not_a_number(original),
    })
}

fn scaled(text: &str, multiplier: i64) -> Result<i64, ConversionError> {
    let digits = NON_NUMERIC.replace_all(text, "");
    parse_int(&digits, text)?
        .checked_mul(multiplier)
        .ok_or_else(|| ConversionError::overflow(text))
}

/// The first matching suffix wins: anything containing an "M" is read as
/// millions even if it also contains a "K". Decimal amounts ("1.5M") are not
/// integers and are rejected.
pub fn parse_budget(text: &str) -> Result<i64, ConversionError> {
    let trimmed = text.trim();

    if MILLIONS.is_match(trimmed) {
        return scaled(trimmed, 1_000_000);
    }

    if THOUSANDS.is_match(trimmed) {
        return scaled(trimmed, 1_000);
    }

    parse_int(trimmed, text)
}

/// Text cells become absolute integer amounts; non-text values pass through.
pub fn normalize_budget(value: &Value) -> Value {
    let Value::Text(text) = value else {
        return value.clone();
    };

    match parse_budget(text) {
        Ok(amount) => Value::Integer(amount),
        Err(ConversionError::NotANumber { .. }) => Value::Missing,
        Err(e) => {
            tracing::warn!("⚠️ Unexpected error converting budget '{}': {}", text, e);
            Value::Missing
        }
    }
}
