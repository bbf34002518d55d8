//! Input normalization
//!
//! The engine sits on the live-preview path, so out-of-range inputs are
//! clamped instead of rejected. Every clamp is logged.

use bigdecimal::BigDecimal;

/// Clamp a value to be non-negative
pub fn non_negative(value: &BigDecimal, field: &'static str) -> BigDecimal {
    if *value < BigDecimal::from(0) {
        tracing::warn!(field, value = %value, "negative input clamped to zero");
        BigDecimal::from(0)
    } else {
        value.clone()
    }
}

/// Clamp a percentage into `[0, 100]`
pub fn percentage(value: &BigDecimal, field: &'static str) -> BigDecimal {
    let hundred = BigDecimal::from(100);
    if *value > hundred {
        tracing::warn!(field, value = %value, "percentage above 100 clamped");
        hundred
    } else {
        non_negative(value, field)
    }
}

/// Clamp a value into `[0, ceiling]`
pub fn bounded(value: &BigDecimal, ceiling: &BigDecimal, field: &'static str) -> BigDecimal {
    if value > ceiling {
        tracing::warn!(
            field,
            value = %value,
            ceiling = %ceiling,
            "input above ceiling clamped"
        );
        ceiling.clone()
    } else {
        non_negative(value, field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_negative() {
        assert_eq!(non_negative(&BigDecimal::from(-5), "x"), BigDecimal::from(0));
        assert_eq!(non_negative(&BigDecimal::from(5), "x"), BigDecimal::from(5));
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(&BigDecimal::from(150), "x"), BigDecimal::from(100));
        assert_eq!(percentage(&BigDecimal::from(-1), "x"), BigDecimal::from(0));
        assert_eq!(percentage(&BigDecimal::from(12), "x"), BigDecimal::from(12));
    }

    #[test]
    fn test_bounded() {
        let ceiling = BigDecimal::from(400);
        assert_eq!(bounded(&BigDecimal::from(500), &ceiling, "x"), ceiling);
        assert_eq!(bounded(&BigDecimal::from(-1), &ceiling, "x"), BigDecimal::from(0));
        assert_eq!(bounded(&BigDecimal::from(100), &ceiling, "x"), BigDecimal::from(100));
    }
}
