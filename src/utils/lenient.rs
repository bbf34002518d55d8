//! Forgiving serde deserializers for payloads coming from the UI
//!
//! Form fields arrive as numbers, numeric strings, empty strings or `null`
//! depending on which screen produced them. None of these may fail the
//! request: anything that is not a number becomes zero.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::types::PriceType;
use crate::utils::number::parse_number_or_zero;

/// Coerce any JSON value to a decimal, zero when it is not numeric.
pub fn value_to_number(value: &Value) -> BigDecimal {
    match value {
        Value::Number(number) => parse_number_or_zero(&number.to_string()),
        Value::String(raw) => parse_number_or_zero(raw),
        Value::Null => BigDecimal::from(0),
        other => {
            tracing::warn!(input = %other, "non-numeric value coerced to zero");
            BigDecimal::from(0)
        }
    }
}

/// `deserialize_with` helper for amounts, rates and quantities.
pub fn number_or_zero<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(value_to_number).unwrap_or_default())
}

/// `deserialize_with` helper for opaque codes that may be sent as numbers.
pub fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(raw)) => raw.trim().to_string(),
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    })
}

/// `deserialize_with` helper for the price type, defaulting to exclusive.
pub fn price_type<'de, D>(deserializer: D) -> Result<PriceType, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(raw)) => PriceType::from(raw.as_str()),
        Some(Value::Bool(true)) => PriceType::Inclusive,
        _ => PriceType::Exclusive,
    })
}
