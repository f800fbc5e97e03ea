//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A cart of three $0.10 stickers would total $0.30000000000000004.      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    10 + 10 + 10 = 30 cents, always                                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! The catalog API and the cart snapshot both carry prices as plain JSON
//! numbers in major units (`12`, `12.5`). `Money` converts at the serde
//! boundary: whole amounts serialize as integers, fractional ones as floats,
//! and incoming numbers are rounded to the nearest cent once.
//!
//! JSON numbers are read as `f64`, which holds whole cents exactly only up
//! to 2^53. Amounts above [`MAX_WIRE_CENTS`] are rejected when parsed or
//! deserialized, so a snapshot carrying one fails to load instead of
//! silently changing price.
//!
//! ## Usage
//! ```rust
//! use shopfront_core::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//! let line_total = price.multiply_quantity(2);
//! assert_eq!(line_total.cents(), 2198);
//!
//! let typed: Money = "12.50".parse().unwrap();
//! assert_eq!(typed.cents(), 1250);
//! ```

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use std::str::FromStr;

use crate::error::CoreError;

/// Largest amount, in cents, that survives the `f64` wire format exactly.
pub const MAX_WIRE_CENTS: i64 = 1 << 53;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► CartLine.price ──► CartLine::line_total
///                                            │
///                                            ▼
///                        Cart::total_for_selection ──► "Total: $25.00"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// let price = Money::from_major_minor(10, 99); // $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Converts a wire-format amount (major units) to Money.
    ///
    /// Returns `None` for NaN, infinities, negative amounts, and amounts
    /// above [`MAX_WIRE_CENTS`].
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_units(12.5).unwrap().cents(), 1250);
    /// assert!(Money::from_major_units(-1.0).is_none());
    /// ```
    pub fn from_major_units(amount: f64) -> Option<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return None;
        }

        let cents = (amount * 100.0).round();
        if cents > MAX_WIRE_CENTS as f64 {
            return None;
        }

        Some(Money(cents as i64))
    }

    /// Returns the amount in major units, for the wire format only.
    #[inline]
    pub fn to_major_units(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.cents(), 897); // $8.97
    /// ```
    ///
    /// Quantities written verbatim through `update_quantity` can be zero or
    /// negative; the product follows them.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money as dollars with two decimals.
///
/// ## Note
/// This is for terminal output. A localized UI should format from
/// `cents()` itself.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Parses a typed amount such as `"12"`, `"12.5"` or `"12.50"`.
///
/// Parsing is done on the digits directly so `"0.29"` is exactly 29 cents.
impl FromStr for Money {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let (major, minor) = input.split_once('.').unwrap_or((input, ""));

        if major.is_empty() || !major.chars().all(|c| c.is_ascii_digit()) {
            return Err(CoreError::invalid_amount(
                input,
                "expected a non-negative number like 12.50",
            ));
        }

        if minor.len() > 2 || !minor.chars().all(|c| c.is_ascii_digit()) {
            return Err(CoreError::invalid_amount(
                input,
                "at most two decimal places",
            ));
        }

        let too_large = || CoreError::invalid_amount(input, "amount is too large");

        let major: i64 = major.parse().map_err(|_| too_large())?;
        let minor: i64 = match minor.len() {
            0 => 0,
            1 => minor.parse::<i64>().map_err(|_| too_large())? * 10,
            _ => minor.parse().map_err(|_| too_large())?,
        };

        major
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(minor))
            .filter(|cents| *cents <= MAX_WIRE_CENTS)
            .map(Money)
            .ok_or_else(too_large)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.cents_part() == 0 {
            serializer.serialize_i64(self.dollars())
        } else {
            serializer.serialize_f64(self.to_major_units())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Money::from_major_units(amount).ok_or_else(|| {
            de::Error::custom(format!(
                "invalid amount {amount}: must be a finite, non-negative number"
            ))
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_sum_avoids_float_drift() {
        let total: Money = std::iter::repeat(Money::from_cents(10)).take(3).sum();
        assert_eq!(total.cents(), 30);
    }

    #[test]
    fn test_parse_typed_amounts() {
        assert_eq!("12".parse::<Money>().unwrap().cents(), 1200);
        assert_eq!("12.5".parse::<Money>().unwrap().cents(), 1250);
        assert_eq!("0.29".parse::<Money>().unwrap().cents(), 29);
        assert_eq!(" 7.05 ".parse::<Money>().unwrap().cents(), 705);

        assert!("".parse::<Money>().is_err());
        assert!("-5".parse::<Money>().is_err());
        assert!("9.999".parse::<Money>().is_err());
        assert!("1.2.3".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("99999999999999999999".parse::<Money>().is_err());
    }

    #[test]
    fn test_major_units_conversion() {
        assert_eq!(Money::from_major_units(10.0).unwrap().cents(), 1000);
        assert_eq!(Money::from_major_units(0.1 + 0.2).unwrap().cents(), 30);
        assert!(Money::from_major_units(-0.01).is_none());
        assert!(Money::from_major_units(f64::NAN).is_none());
        assert!(Money::from_major_units(f64::INFINITY).is_none());
    }

    #[test]
    fn test_amounts_beyond_exact_wire_range() {
        assert!(Money::from_major_units(1.0e14).is_none());
        assert!(serde_json::from_str::<Money>("100000000000000").is_err());
        assert!("100000000000000".parse::<Money>().is_err());

        let large = Money::from_cents(9_000_000_000_000_000);
        let json = serde_json::to_string(&large).unwrap();
        assert_eq!(json, "90000000000000");
        assert_eq!(serde_json::from_str::<Money>(&json).unwrap(), large);
        assert_eq!("90000000000000".parse::<Money>().unwrap(), large);
    }

    #[test]
    fn test_wire_format() {
        assert_eq!(serde_json::to_string(&Money::from_cents(1000)).unwrap(), "10");
        assert_eq!(serde_json::to_string(&Money::from_cents(1250)).unwrap(), "12.5");

        let whole: Money = serde_json::from_str("10").unwrap();
        assert_eq!(whole.cents(), 1000);
        let fractional: Money = serde_json::from_str("12.99").unwrap();
        assert_eq!(fractional.cents(), 1299);

        assert!(serde_json::from_str::<Money>("-3").is_err());
        assert!(serde_json::from_str::<Money>("\"10\"").is_err());
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_cents(299);
        assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
        assert_eq!((unit_price * 0).cents(), 0);
        assert!(unit_price.multiply_quantity(-1).is_negative());
    }
}
