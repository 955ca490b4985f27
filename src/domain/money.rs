//! Money type
//!
//! Domain primitive for monetary values held in the ledger.
//! A `Money` is exact (base-10, no floating point) and never negative;
//! every arithmetic operation produces a new value.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Money represents a validated, non-negative decimal amount.
///
/// # Invariants
/// - Value is always zero or positive
/// - Value is exact: construction never rounds
///
/// # Example
/// ```
/// use fund_ledger::domain::Money;
///
/// let balance: Money = "100.50".parse().unwrap();
/// let amount: Money = "0.50".parse().unwrap();
/// let rest = balance.checked_sub(&amount).unwrap();
/// assert_eq!(rest.to_string(), "100.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Money(Decimal);

/// Errors that can occur when creating a Money value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyError {
    #[error("Amount must not be negative (got {0})")]
    Negative(Decimal),

    #[error("Amount exceeds the representable range")]
    Overflow,

    #[error("Invalid amount format: {0}")]
    ParseError(String),
}

impl Money {
    /// Zero money.
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Create a new Money with validation.
    ///
    /// # Errors
    /// - `MoneyError::Negative` if value < 0
    pub fn new(value: Decimal) -> Result<Self, MoneyError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(MoneyError::Negative(value));
        }

        // -0 is a valid Decimal; store it as plain zero.
        if value.is_zero() {
            return Ok(Self(Decimal::new(0, value.scale())));
        }

        Ok(Self(value))
    }

    /// Create Money from a whole number of units.
    pub fn from_units(units: u64) -> Self {
        Self(Decimal::from(units))
    }

    /// Get the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Exact sum. `None` only when the result leaves the Decimal range.
    pub fn checked_add(&self, other: &Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Exact difference, or `None` when `other` is larger than `self`.
    ///
    /// Subtraction never yields a negative Money; the caller decides what a
    /// rejected debit means.
    pub fn checked_sub(&self, other: &Money) -> Option<Money> {
        if self.0 < other.0 {
            return None;
        }
        self.0.checked_sub(other.0).map(Money)
    }

    /// Check if this value covers `amount`.
    pub fn is_sufficient_for(&self, amount: &Money) -> bool {
        self.0 >= amount.0
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MoneyError::ParseError("empty amount".to_string()));
        }

        // Exact parsing: digits that do not fit are an error, not a rounding.
        let decimal = Decimal::from_str_exact(trimmed).map_err(|e| match e {
            rust_decimal::Error::ExceedsMaximumPossibleValue
            | rust_decimal::Error::LessThanMinimumPossibleValue => MoneyError::Overflow,
            other => MoneyError::ParseError(format!("{trimmed}: {other}")),
        })?;
        Money::new(decimal)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Money::new(value)
    }
}

impl TryFrom<String> for Money {
    type Error = MoneyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Money::from_str(&value)
    }
}

impl From<Money> for String {
    fn from(money: Money) -> Self {
        money.0.to_string()
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_positive() {
        let money = Money::new(dec!(100)).unwrap();
        assert_eq!(money.value(), dec!(100));
    }

    #[test]
    fn test_money_zero_accepted() {
        let money = Money::new(Decimal::ZERO).unwrap();
        assert!(money.is_zero());
    }

    #[test]
    fn test_money_negative_zero_normalised() {
        let money = Money::new(dec!(-0.00)).unwrap();
        assert!(money.is_zero());
        assert!(!money.value().is_sign_negative());
    }

    #[test]
    fn test_money_negative_rejected() {
        let money = Money::new(dec!(-100));
        assert!(matches!(money, Err(MoneyError::Negative(_))));

        let parsed: Result<Money, _> = "-0.01".parse();
        assert!(matches!(parsed, Err(MoneyError::Negative(_))));
    }

    #[test]
    fn test_money_from_str() {
        let money: Money = "123.45".parse().unwrap();
        assert_eq!(money.value(), dec!(123.45));
        assert_eq!(money.to_string(), "123.45");
    }

    #[test]
    fn test_money_malformed_rejected() {
        for input in ["", "   ", "abc", "12.3.4", "1,000", "NaN"] {
            let parsed: Result<Money, _> = input.parse();
            assert!(
                matches!(parsed, Err(MoneyError::ParseError(_))),
                "expected parse error for {input:?}, got {parsed:?}"
            );
        }
    }

    #[test]
    fn test_money_too_precise_rejected() {
        // 29 fractional digits cannot be stored exactly
        let parsed: Result<Money, _> = "0.00000000000000000000000000001".parse();
        assert!(parsed.is_err());
    }

    #[test]
    fn test_money_checked_add_is_exact() {
        let a: Money = "0.1".parse().unwrap();
        let b: Money = "0.2".parse().unwrap();
        assert_eq!(a.checked_add(&b).unwrap().value(), dec!(0.3));
    }

    #[test]
    fn test_money_checked_add_overflow() {
        let max = Money::new(Decimal::MAX).unwrap();
        assert!(max.checked_add(&Money::from_units(1)).is_none());
    }

    #[test]
    fn test_money_checked_sub() {
        let balance = Money::from_units(100);

        let rest = balance.checked_sub(&Money::from_units(30)).unwrap();
        assert_eq!(rest.value(), dec!(70));

        let empty = balance.checked_sub(&Money::from_units(100)).unwrap();
        assert!(empty.is_zero());

        assert!(balance.checked_sub(&Money::from_units(101)).is_none());
        assert!(!balance.is_sufficient_for(&Money::from_units(101)));
    }

    #[test]
    fn test_money_serde_as_string() {
        let money: Money = "42.10".parse().unwrap();
        let json = serde_json::to_string(&money).unwrap();
        assert_eq!(json, "\"42.10\"");

        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, money);

        let negative: Result<Money, _> = serde_json::from_str("\"-5\"");
        assert!(negative.is_err());
    }
}
