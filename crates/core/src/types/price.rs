//! Type-safe price representation using decimal arithmetic.
//!
//! Artwork prices are non-negative decimal amounts in a single currency
//! (USD). The order endpoint wants integer cents, so [`Price::to_cents`]
//! does that conversion in one place.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PriceError {
    /// The input string is not a decimal number.
    #[error("price must be a decimal number")]
    Invalid,
    /// The amount is negative.
    #[error("price cannot be negative")]
    Negative,
}

/// A non-negative price in the store currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a `Price` from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] for amounts below zero.
    pub fn from_decimal(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount))
    }

    /// Parse a `Price` from a form input string such as `"24.99"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a decimal number or is negative.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let amount: Decimal = s.trim().parse().map_err(|_| PriceError::Invalid)?;
        Self::from_decimal(amount)
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The amount in integer cents, truncated.
    ///
    /// Saturates at `i64::MAX` for amounts no artwork will ever carry.
    #[must_use]
    pub fn to_cents(&self) -> i64 {
        (self.0 * Decimal::from(100))
            .trunc()
            .to_i64()
            .unwrap_or(i64::MAX)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let price = Price::parse("24.99").unwrap();
        assert_eq!(price.to_cents(), 2499);
    }

    #[test]
    fn test_parse_whole_number() {
        let price = Price::parse("100").unwrap();
        assert_eq!(price.to_cents(), 10_000);
    }

    #[test]
    fn test_parse_zero() {
        assert_eq!(Price::parse("0").unwrap(), Price::ZERO);
    }

    #[test]
    fn test_parse_negative() {
        assert!(matches!(Price::parse("-1.50"), Err(PriceError::Negative)));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(Price::parse("abc"), Err(PriceError::Invalid)));
        assert!(matches!(Price::parse(""), Err(PriceError::Invalid)));
    }

    #[test]
    fn test_sum() {
        let total: Price = [
            Price::parse("10.00").unwrap(),
            Price::parse("4.50").unwrap(),
        ]
        .into_iter()
        .sum();
        assert_eq!(total.to_cents(), 1450);
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::parse("5").unwrap().to_string(), "$5.00");
        assert_eq!(Price::parse("19.9").unwrap().to_string(), "$19.90");
    }
}
