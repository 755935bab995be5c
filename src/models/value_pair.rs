//! Calculated vs. informed value pairs.
//!
//! A [`ValuePair`] holds the two independently sourced values of a pay event
//! for one reference period, along with their difference.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of decimal places every monetary and hour value is rounded to.
pub const AMOUNT_SCALE: u32 = 2;

/// Rounds an amount to two decimal places, half away from zero.
///
/// A result of negative zero is normalized to plain zero.
///
/// # Example
///
/// ```
/// use payroll_engine::models::round_amount;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_amount(Decimal::from_str("100.335").unwrap()), Decimal::from_str("100.34").unwrap());
/// assert_eq!(round_amount(Decimal::from_str("-0.001").unwrap()).to_string(), "0.00");
/// ```
pub fn round_amount(amount: Decimal) -> Decimal {
    let rounded = amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        Decimal::new(0, AMOUNT_SCALE)
    } else {
        rounded
    }
}

/// Converts a normalized float into a rounded decimal amount.
///
/// Values outside the decimal range (or non-finite) become zero, in line with
/// the normalizer's never-fail policy.
pub fn amount_from_f64(value: f64) -> Decimal {
    Decimal::from_f64(value).map_or(Decimal::ZERO, round_amount)
}

/// The calculated and informed values of a pay event for one reference.
///
/// Both values are rounded to two decimal places and `difference` is always
/// `calculated - informed`.
///
/// # Example
///
/// ```
/// use payroll_engine::models::ValuePair;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let pair = ValuePair::new(
///     Decimal::from_str("4077.32").unwrap(),
///     Decimal::from_str("220.00").unwrap(),
/// );
/// assert_eq!(pair.difference, Decimal::from_str("3857.32").unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuePair {
    /// The value computed by the payroll system.
    #[serde(with = "rust_decimal::serde::float")]
    pub calculated: Decimal,
    /// The value reported by the employer.
    #[serde(with = "rust_decimal::serde::float")]
    pub informed: Decimal,
    /// `calculated - informed`.
    #[serde(with = "rust_decimal::serde::float")]
    pub difference: Decimal,
}

impl ValuePair {
    /// Builds a pair from two amounts, rounding both and deriving the difference.
    pub fn new(calculated: Decimal, informed: Decimal) -> Self {
        let calculated = round_amount(calculated);
        let informed = round_amount(informed);
        Self {
            calculated,
            informed,
            difference: round_amount(calculated - informed),
        }
    }

    /// Builds a pair from normalized float values.
    pub fn from_f64(calculated: f64, informed: f64) -> Self {
        Self::new(amount_from_f64(calculated), amount_from_f64(informed))
    }

    /// The zero-filled pair used for absent event/reference combinations.
    pub fn zero() -> Self {
        Self::new(Decimal::ZERO, Decimal::ZERO)
    }

    /// Returns true when both sides are zero.
    pub fn is_zero(&self) -> bool {
        self.calculated.is_zero() && self.informed.is_zero()
    }
}

impl Default for ValuePair {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn decimal(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_new_derives_difference() {
        let pair = ValuePair::new(decimal("100.00"), decimal("40.50"));
        assert_eq!(pair.difference, decimal("59.50"));
    }

    #[test]
    fn test_new_rounds_inputs_before_subtracting() {
        let pair = ValuePair::new(decimal("10.005"), decimal("0.004"));
        assert_eq!(pair.calculated, decimal("10.01"));
        assert_eq!(pair.informed, decimal("0.00"));
        assert_eq!(pair.difference, decimal("10.01"));
    }

    #[test]
    fn test_from_f64_rounds_hours() {
        let pair = ValuePair::from_f64(100.0 + 20.0 / 60.0, 0.0);
        assert_eq!(pair.calculated, decimal("100.33"));
    }

    #[test]
    fn test_from_f64_out_of_range_becomes_zero() {
        let pair = ValuePair::from_f64(f64::INFINITY, 1e40);
        assert!(pair.is_zero());
    }

    #[test]
    fn test_negative_zero_is_normalized() {
        let pair = ValuePair::from_f64(-0.0, -0.001);
        assert!(!pair.calculated.is_sign_negative());
        assert!(!pair.informed.is_sign_negative());
    }

    #[test]
    fn test_zero_pair() {
        let pair = ValuePair::zero();
        assert!(pair.is_zero());
        assert_eq!(pair.difference, Decimal::ZERO);
    }

    #[test]
    fn test_serializes_as_json_numbers() {
        let pair = ValuePair::new(decimal("4077.32"), decimal("220.00"));
        let json = serde_json::to_value(pair).unwrap();
        assert_eq!(json["calculated"], serde_json::json!(4077.32));
        assert_eq!(json["informed"], serde_json::json!(220.0));
        assert_eq!(json["difference"], serde_json::json!(3857.32));
    }
}
