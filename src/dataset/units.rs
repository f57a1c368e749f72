//! Weight and quantity parsing
//!
//! The catalog CSVs and the nutrition endpoint both carry quantities as
//! free-form strings ("500mg", "1.2kg", "12 g", "120 kkal", "1,5").

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UnitError {
    #[error("Unit not recognized. Please use mg, g, kg, or t.")]
    UnknownUnit,
    #[error("Invalid weight format: {0}")]
    InvalidNumber(String),
}

/// Parse a weight string into grams.
///
/// Recognized suffixes: `µg`/`ug`, `mg`, `kg`, `g`, `t`. The check order
/// matters: `mg` must win over the bare `g` it contains.
pub fn parse_weight_grams(text: &str) -> Result<f64, UnitError> {
    let weight = text.trim().to_lowercase();

    let (stripped, factor) = if let Some(v) = weight.strip_suffix("µg").or_else(|| weight.strip_suffix("ug")) {
        (v, 1e-6)
    } else if let Some(v) = weight.strip_suffix("mg") {
        (v, 1e-3)
    } else if let Some(v) = weight.strip_suffix("kg") {
        (v, 1e3)
    } else if let Some(v) = weight.strip_suffix('g') {
        (v, 1.0)
    } else if let Some(v) = weight.strip_suffix('t') {
        (v, 1e6)
    } else {
        return Err(UnitError::UnknownUnit);
    };

    let value: f64 = stripped
        .trim()
        .parse()
        .map_err(|_| UnitError::InvalidNumber(text.trim().to_string()))?;

    Ok(value * factor)
}

/// Best-effort numeric parse for catalog cells.
///
/// Strips a trailing unit word, converts a decimal comma to a dot, and
/// falls back to 0.0 when nothing numeric is left.
pub fn lenient_quantity(text: &str) -> f64 {
    text.trim()
        .trim_end_matches(|c: char| c.is_alphabetic() || c == 'µ' || c.is_whitespace())
        .replace(',', ".")
        .trim()
        .parse()
        .unwrap_or(0.0)
}

/// Serde adapter so CSV columns can use [`lenient_quantity`] directly.
pub fn lenient_quantity_de<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(lenient_quantity(&raw))
}
