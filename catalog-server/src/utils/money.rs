//! Money calculation utilities using rust_decimal for precision
//!
//! Amounts are validated and rounded as `Decimal`, then converted back to
//! `f64` for storage/serialization.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed price per group (1,000,000 in currency unit)
pub const MAX_PRICE: f64 = 1_000_000.0;

/// Maximum weight (kg) or dimension (cm) of a weight group
pub const MAX_MEASURE: f64 = 100_000.0;

/// Convert f64 to Decimal; `None` for NaN, infinities and values out of Decimal range
#[inline]
pub fn to_decimal(value: f64) -> Option<Decimal> {
    Decimal::from_f64(value)
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> Option<f64> {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
}

/// Round an amount to 2 decimal places; `None` if it cannot be represented
#[inline]
pub fn round2(value: f64) -> Option<f64> {
    to_decimal(value).and_then(to_f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2_half_away_from_zero() {
        // 0.125 is exact in binary, so this is a true midpoint
        assert_eq!(round2(0.125), Some(0.13));
        assert_eq!(round2(-0.125), Some(-0.13));
        assert_eq!(round2(1.239), Some(1.24));
        assert_eq!(round2(10.0), Some(10.0));
        assert_eq!(round2(0.333333), Some(0.33));
    }

    #[test]
    fn test_decimal_roundtrip() {
        let sum = to_decimal(0.1).unwrap() + to_decimal(0.2).unwrap();
        assert_eq!(to_f64(sum), Some(0.3));
    }

    #[test]
    fn test_unrepresentable_values() {
        assert_eq!(round2(1e30), None);
        assert_eq!(round2(f64::NAN), None);
        assert_eq!(round2(f64::INFINITY), None);
    }
}
