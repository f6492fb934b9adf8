use rust_decimal::Decimal;
use std::str::FromStr;

use super::RawCell;

/// Trim and lower-case a text field. Idempotent.
pub fn normalize_text(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Split a raw color cell into normalized color tokens.
///
/// Newlines count as spaces, tokens are separated by commas, and empty
/// tokens are dropped, so an empty cell yields no colors.
pub fn split_colors(raw: &str) -> Vec<String> {
    raw.replace(['\n', '\r'], " ")
        .to_lowercase()
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Outcome of reading a numeric cell.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericCell {
    Value(Decimal),
    Missing,
    /// Non-empty content that is not a number.
    Unparseable(String),
}

/// Read a cell as a number, coercing failures to null.
///
/// Accepts native numeric cells and text like "150", " 1 200 ", "12,5".
pub fn parse_numeric(cell: &RawCell) -> NumericCell {
    match cell {
        RawCell::Empty => NumericCell::Missing,
        RawCell::Number(f) => match f64_to_decimal(*f) {
            Some(d) => NumericCell::Value(d),
            None => NumericCell::Unparseable(f.to_string()),
        },
        RawCell::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return NumericCell::Missing;
            }
            let compact: String = trimmed
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| if c == ',' { '.' } else { c })
                .collect();
            match Decimal::from_str(&compact) {
                Ok(d) => NumericCell::Value(d),
                Err(_) => NumericCell::Unparseable(trimmed.to_string()),
            }
        }
    }
}

/// Convert f64 to Decimal through its shortest string form, so 0.35 stays 0.35.
fn f64_to_decimal(f: f64) -> Option<Decimal> {
    if !f.is_finite() {
        return None;
    }
    format!("{f}")
        .parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::try_from(f).ok())
}
