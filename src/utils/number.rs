//! Decimal helpers shared by every stage of the pipeline
//!
//! All amounts are carried as [`BigDecimal`] at full precision. Rounding only
//! happens at presentation time through [`round_currency`].

use bigdecimal::{BigDecimal, RoundingMode};
use std::str::FromStr;

/// Most decimal places an input may carry once trailing zeros are dropped
pub const MAX_INPUT_SCALE: i64 = 20;

/// Most integer digits an input may carry
pub const MAX_INPUT_INTEGER_DIGITS: i64 = 20;

/// Parse a user supplied number, falling back to zero.
///
/// Empty strings, garbage and non-finite spellings (`"NaN"`, `"Infinity"`)
/// all yield zero. So do values beyond [`MAX_INPUT_SCALE`] decimal places or
/// [`MAX_INPUT_INTEGER_DIGITS`] integer digits, which no till produces but a
/// short exponent like `"1e-5000000"` can. Surrounding whitespace is ignored.
pub fn parse_number_or_zero(raw: &str) -> BigDecimal {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return BigDecimal::from(0);
    }

    let value = match BigDecimal::from_str(trimmed) {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(input = %trimmed, "non-numeric input coerced to zero");
            return BigDecimal::from(0);
        }
    };

    let normalized = value.normalized();
    let (_, scale) = normalized.as_bigint_and_exponent();
    let integer_digits = normalized.digits() as i64 - scale;
    if scale > MAX_INPUT_SCALE || integer_digits > MAX_INPUT_INTEGER_DIGITS {
        tracing::warn!(input = %trimmed, "out-of-range input coerced to zero");
        return BigDecimal::from(0);
    }

    let (_, raw_scale) = value.as_bigint_and_exponent();
    if raw_scale > MAX_INPUT_SCALE {
        // only trailing zeros lie past the bound
        return value.with_scale(MAX_INPUT_SCALE);
    }
    value
}

/// Round an amount to `scale` decimal places, half away from zero.
pub fn round_currency(value: &BigDecimal, scale: i64) -> BigDecimal {
    value.with_scale_round(scale, RoundingMode::HalfUp)
}
