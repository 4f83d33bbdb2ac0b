//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are stored and summed as [`rust_decimal::Decimal`] so cart totals
//! never accumulate binary floating-point error.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price in the store currency (USD, dollars not cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole-dollar amount.
    #[must_use]
    pub fn from_dollars(dollars: i64) -> Self {
        Self(Decimal::from(dollars))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Line total for a quantity of this price.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Apply a fractional rate (e.g. `0.10` for a 10% tax) and return the
    /// resulting amount, rounded to cents.
    #[must_use]
    pub fn rate(&self, rate: Decimal) -> Self {
        Self((self.0 * rate).round_dp(2))
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Mul<Decimal> for Price {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self {
        Self(self.0 * rhs)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dollars() {
        assert_eq!(Price::from_dollars(1199).amount(), Decimal::new(1199, 0));
        assert_eq!(Price::from_dollars(0), Price::ZERO);
    }

    #[test]
    fn test_times() {
        let price = Price::from_dollars(1200);
        assert_eq!(price.times(2), Price::from_dollars(2400));
        assert_eq!(price.times(0), Price::ZERO);
    }

    #[test]
    fn test_rate_rounds_to_cents() {
        let price = Price::new(Decimal::new(999, 2)); // $9.99
        let tax = price.rate(Decimal::new(10, 2)); // 10%
        assert_eq!(tax.amount(), Decimal::new(100, 2)); // $1.00 (0.999 rounded)
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::from_dollars(1), Price::from_dollars(2)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_dollars(3));
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_dollars(1199).display(), "$1199.00");
        assert_eq!(Price::new(Decimal::new(1050, 2)).to_string(), "$10.50");
    }

    #[test]
    fn test_serde_transparent() {
        let price = Price::new(Decimal::new(159900, 2));
        let json = serde_json::to_string(&price).unwrap();
        // rust_decimal's serde-with-str keeps precision through JSON
        assert_eq!(json, "\"1599.00\"");
        let parsed: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, price);
    }
}
