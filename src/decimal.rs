//! Exact decimal money type rendered with 2 decimal places.
//!
//! Uses `rust_decimal` internally so rate multiplications stay exact;
//! rounding happens only when a value is displayed.

use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// A monetary amount in INR.
///
/// Arithmetic keeps full precision. `Display` rounds half away from zero to
/// exactly 2 decimal places.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use tds_engine::Amount;
///
/// let amount = Amount::from_str("30000.01").unwrap();
/// assert_eq!(amount.to_string(), "30000.01");
/// assert_eq!(amount.apply_rate(Amount::rate(10, 2)).to_string(), "3000.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Amount(Decimal);

impl Amount {
    /// The number of decimal places shown.
    pub const DISPLAY_SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Amount(Decimal::ZERO);

    /// Whole rupees, e.g. a threshold.
    pub fn from_rupees(rupees: i64) -> Self {
        Amount(Decimal::from(rupees))
    }

    /// Builds a rate such as `rate(5, 2)` for 0.05.
    pub fn rate(num: i64, scale: u32) -> Decimal {
        Decimal::new(num, scale)
    }

    /// Returns the inner decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns `true` if this value is below zero.
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Multiplies by a rate without rounding.
    pub fn apply_rate(self, rate: Decimal) -> Self {
        Amount(self.0 * rate)
    }

    /// Multiplies by a whole number, or `None` on overflow.
    pub fn checked_mul(self, rhs: i64) -> Option<Self> {
        self.0.checked_mul(Decimal::from(rhs)).map(Amount)
    }

    /// The value as it is displayed.
    pub fn rounded(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(Self::DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero)
    }
}

impl FromStr for Amount {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let decimal = Decimal::from_str(trimmed)?;
        Ok(Amount(decimal))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.rounded())
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount(self.0 - rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amt(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    #[test]
    fn test_display_pads_to_two_places() {
        assert_eq!(amt("1").to_string(), "1.00");
        assert_eq!(amt("1.5").to_string(), "1.50");
        assert_eq!(amt("  2.25  ").to_string(), "2.25");
        assert_eq!(Amount::ZERO.to_string(), "0.00");
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        assert_eq!(amt("3000.001").to_string(), "3000.00");
        assert_eq!(amt("0.005").to_string(), "0.01");
        assert_eq!(amt("2.675").to_string(), "2.68");
        assert_eq!(amt("-0.005").to_string(), "-0.01");
    }

    #[test]
    fn test_arithmetic_keeps_full_precision() {
        let gross = amt("30000.01");
        let tds = gross.apply_rate(Amount::rate(10, 2));
        assert_eq!(tds.value(), Decimal::from_str("3000.001").unwrap());
        assert_eq!((gross - tds).value(), Decimal::from_str("27000.009").unwrap());
        assert_eq!((tds + tds).to_string(), "6000.00");
    }

    #[test]
    fn test_multiply_by_months() {
        assert_eq!(amt("45000").checked_mul(12).unwrap().to_string(), "540000.00");
    }

    #[test]
    fn test_multiply_overflow_is_none() {
        assert!(amt("10000000000000000000000000000").checked_mul(12).is_none());
        assert!(amt("-10000000000000000000000000000").checked_mul(12).is_none());
    }

    #[test]
    fn test_sign_checks() {
        assert!(Amount::ZERO.is_zero());
        assert!(!Amount::ZERO.is_negative());
        assert!(amt("-1").is_negative());
        assert!(!amt("1").is_negative());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(Amount::from_str("abc").is_err());
        assert!(Amount::from_str("").is_err());
    }
}
