//! Serde helpers for `search_read` payloads.
//!
//! The backends encode "no value" as the literal `false` rather than `null`,
//! and monetary fields may arrive as JSON numbers or numeric strings.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum OrFalse<T> {
    Value(T),
    Flag(bool),
}

/// Deserialize an optional field where `false`, `null` and absence all mean `None`.
pub fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<OrFalse<T>>::deserialize(deserializer)? {
        Some(OrFalse::Value(v)) => Some(v),
        Some(OrFalse::Flag(_)) | None => None,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Int(i64),
    Float(f64),
    Text(String),
    Flag(bool),
}

/// Deserialize a monetary field.
///
/// Integers, floats and numeric strings become a [`Decimal`]; `false`,
/// `null` and unparseable text become `None` (treated as zero downstream).
pub fn amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawAmount>::deserialize(deserializer)? {
        Some(RawAmount::Int(i)) => Some(Decimal::from(i)),
        Some(RawAmount::Float(f)) => decimal_from_f64(f),
        Some(RawAmount::Text(s)) => parse_decimal(&s),
        Some(RawAmount::Flag(_)) | None => None,
    })
}

/// Parse a numeric string, logging and discarding anything unparseable.
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    match Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed)) {
        Ok(d) => Some(d),
        Err(e) => {
            tracing::warn!(value = %trimmed, error = %e, "unparseable amount treated as zero");
            None
        }
    }
}

// Goes through the shortest round-trip representation so 16.1 stays 16.1
// instead of picking up binary noise.
fn decimal_from_f64(f: f64) -> Option<Decimal> {
    if !f.is_finite() {
        tracing::warn!(value = f, "non-finite amount treated as zero");
        return None;
    }
    parse_decimal(&f.to_string())
}
