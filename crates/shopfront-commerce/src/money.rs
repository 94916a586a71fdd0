//! Money type for representing prices and totals.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations. On the wire a price is
//! a plain decimal number (`12.99`), which is what the product source sends
//! and what persisted cart snapshots carry.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;

/// Number of minor units per major unit.
const CENTS_PER_UNIT: i64 = 100;

/// Display symbol of the storefront currency.
const CURRENCY_SYMBOL: &str = "$";

/// A non-negative monetary amount in the storefront currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
}

impl Money {
    /// Create a new Money value from cents.
    pub const fn new(amount_cents: i64) -> Self {
        Self { amount_cents }
    }

    /// Zero.
    pub const fn zero() -> Self {
        Self::new(0)
    }

    /// Create a Money value from a decimal amount, rounding to the nearest cent.
    ///
    /// ```
    /// use shopfront_commerce::money::Money;
    /// let price = Money::from_decimal(49.99);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        Self::new((amount * CENTS_PER_UNIT as f64).round() as i64)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / CENTS_PER_UNIT as f64
    }

    /// Multiply by a quantity, saturating instead of overflowing.
    pub fn times(&self, quantity: u32) -> Money {
        Money::new(self.amount_cents.saturating_mul(i64::from(quantity)))
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        format!("{CURRENCY_SYMBOL}{}", self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        format!(
            "{}.{:02}",
            self.amount_cents / CENTS_PER_UNIT,
            (self.amount_cents % CENTS_PER_UNIT).abs()
        )
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| {
            Money::new(acc.amount_cents.saturating_add(m.amount_cents))
        })
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

/// Wire shapes a price may arrive in.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Number(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = match RawPrice::deserialize(deserializer)? {
            RawPrice::Number(n) => n,
            RawPrice::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|e| de::Error::custom(format!("invalid price {s:?}: {e}")))?,
        };
        if !amount.is_finite() || amount < 0.0 {
            return Err(de::Error::custom(format!(
                "price must be a non-negative number, got {amount}"
            )));
        }
        Ok(Money::from_decimal(amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_decimal_rounds() {
        assert_eq!(Money::from_decimal(0.1 + 0.2).amount_cents, 30);
        assert_eq!(Money::from_decimal(12.99).amount_cents, 1299);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::new(4999).display(), "$49.99");
        assert_eq!(Money::new(5).display(), "$0.05");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_times_and_sum() {
        let total: Money = [Money::new(1000).times(2), Money::new(1200).times(1)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::new(3200));
    }

    #[test]
    fn test_times_saturates() {
        assert_eq!(Money::new(i64::MAX).times(2).amount_cents, i64::MAX);
    }

    #[test]
    fn test_wire_format_is_decimal() {
        let json = serde_json::to_string(&Money::new(1299)).unwrap();
        assert_eq!(json, "12.99");

        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Money::new(1299));
    }

    #[test]
    fn test_deserialize_numeric_string() {
        let price: Money = serde_json::from_str(r#""7.50""#).unwrap();
        assert_eq!(price.amount_cents, 750);
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        let result: Result<Money, _> = serde_json::from_str("-1.0");
        assert!(result.is_err());
    }
}
