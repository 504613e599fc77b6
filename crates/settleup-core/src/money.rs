//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Fixed-Point Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    100,000 / 3 × 3 - 100,000 = 1.4551915228366852e-11  ❌ "debt"!      │
//! │                                                                         │
//! │  A residue like that is neither zero nor a real debt, and it decides    │
//! │  whether someone lands in the creditor or the debtor list.              │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Micro-Units                                      │
//! │    1 unit = 1,000,000 micros                                            │
//! │    100,000 / 3 = 33,333.333333 (rounded to the nearest micro)           │
//! │    Every sum is exact integer math, every run is bit-identical          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use settleup_core::money::Money;
//!
//! let dinner = Money::from_units(300_000);
//! let share = dinner.split(3).unwrap();
//! assert_eq!(share, Money::from_units(100_000));
//!
//! let awkward = Money::from_units(100_000).split(3).unwrap();
//! assert_eq!(awkward.micros(), 33_333_333_333);
//! assert_eq!(awkward.round_to_unit(), Money::from_units(33_333));
//! ```

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use ts_rs::TS;

/// Micro-units per whole currency unit.
pub const MICROS_PER_UNIT: i64 = 1_000_000;

// =============================================================================
// Money Type
// =============================================================================

/// A signed monetary amount stored as integer micro-units.
///
/// ## Design Decisions
/// - **i64 (signed)**: balances go negative for debtors
/// - **Micro-units**: an expense split `n` ways keeps six decimals, so a share
///   is effectively the real-valued quotient while staying integer
/// - **Range**: about ±9.2 trillion whole units, far beyond any event budget
///
/// ## Where Money is Used
/// ```text
/// Expense.amount ──► share = amount / |split| ──► Balance.total_owed
///        │
///        └──► Balance.total_paid ──► Balance.balance ──► Settlement.amount
///                                                         (whole units)
/// ```
///
/// ## Serialization
/// Serialized as a JSON number of whole currency units (`300000`,
/// `33333.333333`). Deserialization accepts integers or decimals and rounds
/// to the nearest micro-unit. Fractional values are exact on a round-trip
/// up to about 10^9 units (see the `Serialize` impl).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, TS)]
#[ts(export)]
pub struct Money(#[ts(type = "number")] i64);

impl Money {
    /// Zero, as a constant.
    pub const ZERO: Money = Money(0);

    /// Creates a Money value from whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use settleup_core::money::Money;
    ///
    /// let amount = Money::from_units(250_000);
    /// assert_eq!(amount.units(), 250_000);
    /// assert_eq!(amount.micros(), 250_000_000_000);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units * MICROS_PER_UNIT)
    }

    /// Creates a Money value from micro-units (1/1,000,000 of a unit).
    #[inline]
    pub const fn from_micros(micros: i64) -> Self {
        Money(micros)
    }

    /// Returns the raw value in micro-units.
    #[inline]
    pub const fn micros(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion, truncated toward zero.
    ///
    /// ## Example
    /// ```rust
    /// use settleup_core::money::Money;
    ///
    /// assert_eq!(Money::from_micros(1_900_000).units(), 1);
    /// assert_eq!(Money::from_micros(-1_900_000).units(), -1);
    /// ```
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / MICROS_PER_UNIT
    }

    /// Returns the fractional portion in micro-units (always 0-999,999).
    #[inline]
    pub const fn fraction_micros(&self) -> i64 {
        (self.0 % MICROS_PER_UNIT).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is exactly zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns true when the value has no fractional part.
    #[inline]
    pub const fn is_whole(&self) -> bool {
        self.0 % MICROS_PER_UNIT == 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Adds, returning `None` on i64 overflow.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(micros) => Some(Money(micros)),
            None => None,
        }
    }

    /// Subtracts, returning `None` on i64 overflow.
    #[inline]
    pub const fn checked_sub(self, other: Money) -> Option<Money> {
        match self.0.checked_sub(other.0) {
            Some(micros) => Some(Money(micros)),
            None => None,
        }
    }

    /// Sums `amounts`, returning `None` as soon as the running total overflows.
    pub fn checked_sum<I: IntoIterator<Item = Money>>(amounts: I) -> Option<Money> {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |total, amount| total.checked_add(amount))
    }

    /// Checks whether the value lies within `tolerance` of zero.
    ///
    /// ## Example
    /// ```rust
    /// use settleup_core::money::Money;
    ///
    /// let tolerance = Money::from_micros(10_000); // 0.01 unit
    /// assert!(Money::from_micros(-3).approx_zero(tolerance));
    /// assert!(!Money::from_units(1).approx_zero(tolerance));
    /// ```
    #[inline]
    pub const fn approx_zero(&self, tolerance: Money) -> bool {
        self.0.abs() <= tolerance.0.abs()
    }

    /// Divides the amount evenly between `parts` participants.
    ///
    /// Rounds half away from zero to the nearest micro-unit. Returns `None`
    /// when `parts` is zero so an empty split can never become a silent
    /// division by zero.
    ///
    /// ## Example
    /// ```rust
    /// use settleup_core::money::Money;
    ///
    /// let share = Money::from_units(10).split(3).unwrap();
    /// assert_eq!(share.micros(), 3_333_333);
    ///
    /// let share = Money::from_units(20).split(3).unwrap();
    /// assert_eq!(share.micros(), 6_666_667);
    ///
    /// assert!(Money::from_units(10).split(0).is_none());
    /// ```
    pub fn split(&self, parts: usize) -> Option<Money> {
        if parts == 0 {
            return None;
        }
        let parts = i128::try_from(parts).ok()?;
        let value = self.0 as i128;
        let half = parts / 2;
        let rounded = if value >= 0 {
            (value + half) / parts
        } else {
            (value - half) / parts
        };
        i64::try_from(rounded).ok().map(Money)
    }

    /// Rounds to the nearest whole currency unit, halves away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use settleup_core::money::Money;
    ///
    /// assert_eq!(Money::from_micros(2_500_000).round_to_unit(), Money::from_units(3));
    /// assert_eq!(Money::from_micros(2_499_999).round_to_unit(), Money::from_units(2));
    /// assert_eq!(Money::from_micros(-2_500_000).round_to_unit(), Money::from_units(-3));
    /// ```
    pub const fn round_to_unit(&self) -> Money {
        let half = MICROS_PER_UNIT / 2;
        let units = if self.0 >= 0 {
            (self.0 + half) / MICROS_PER_UNIT
        } else {
            (self.0 - half) / MICROS_PER_UNIT
        };
        Money::from_units(units)
    }

    /// Converts a decimal number of whole units, rounding to the nearest
    /// micro-unit. Returns `None` for NaN, infinities and out-of-range values.
    pub fn from_unit_f64(units: f64) -> Option<Money> {
        let micros = (units * MICROS_PER_UNIT as f64).round();
        if micros.is_finite() && micros >= i64::MIN as f64 && micros <= i64::MAX as f64 {
            Some(Money(micros as i64))
        } else {
            None
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Whole units with `,` grouping; two decimals only when a fraction exists.
///
/// ## Note
/// This is for logs and the CLI report. Localized formatting belongs to the
/// front end.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.units().unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        if self.is_whole() {
            write!(f, "{}{}", sign, grouped)
        } else {
            let cents = self.fraction_micros() / (MICROS_PER_UNIT / 100);
            write!(f, "{}{}.{:02}", sign, grouped, cents)
        }
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Whole values go out as JSON integers and stay exact over the whole range.
/// Fractional values go out as `f64`, whose 53-bit mantissa holds all six
/// decimals only up to about 10^9 units; larger fractional amounts lose
/// their lowest micro-units on a JSON round-trip. Settlement amounts are
/// always whole, so only balances and shares are affected.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_whole() {
            serializer.serialize_i64(self.units())
        } else {
            serializer.serialize_f64(self.0 as f64 / MICROS_PER_UNIT as f64)
        }
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an amount in currency units")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        v.checked_mul(MICROS_PER_UNIT)
            .map(Money)
            .ok_or_else(|| E::custom(format!("amount {} is out of range", v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        let v = i64::try_from(v).map_err(|_| E::custom(format!("amount {} is out of range", v)))?;
        self.visit_i64(v)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        Money::from_unit_f64(v).ok_or_else(|| E::custom(format!("amount {} is out of range", v)))
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_units() {
        let money = Money::from_units(300_000);
        assert_eq!(money.units(), 300_000);
        assert_eq!(money.micros(), 300_000 * MICROS_PER_UNIT);
        assert!(money.is_whole());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_units(300_000).to_string(), "300,000");
        assert_eq!(Money::from_units(999).to_string(), "999");
        assert_eq!(Money::from_units(1_000).to_string(), "1,000");
        assert_eq!(Money::from_units(-1_234_567).to_string(), "-1,234,567");
        assert_eq!(Money::zero().to_string(), "0");
        assert_eq!(Money::from_micros(-33_333_333_333).to_string(), "-33,333.33");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(1000);
        let b = Money::from_units(400);

        assert_eq!(a + b, Money::from_units(1400));
        assert_eq!(a - b, Money::from_units(600));
        assert_eq!(-a, Money::from_units(-1000));

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total, Money::from_units(1800));
    }

    #[test]
    fn test_split_even() {
        let share = Money::from_units(300_000).split(3).unwrap();
        assert_eq!(share, Money::from_units(100_000));
    }

    #[test]
    fn test_split_rounds_half_away_from_zero() {
        // 5 micros / 2 = 2.5 → 3
        assert_eq!(Money::from_micros(5).split(2).unwrap().micros(), 3);
        assert_eq!(Money::from_micros(-5).split(2).unwrap().micros(), -3);
        // 4 micros / 3 = 1.33 → 1
        assert_eq!(Money::from_micros(4).split(3).unwrap().micros(), 1);
    }

    #[test]
    fn test_split_by_zero_is_none() {
        assert!(Money::from_units(1).split(0).is_none());
    }

    #[test]
    fn test_split_residue_is_bounded() {
        // Three shares of 100,000 differ from the total by at most one micro each.
        let total = Money::from_units(100_000);
        let share = total.split(3).unwrap();
        let reconstructed = Money::from_micros(share.micros() * 3);
        assert!((total - reconstructed).abs().micros() <= 3);
    }

    #[test]
    fn test_round_to_unit() {
        assert_eq!(Money::from_micros(1_499_999).round_to_unit(), Money::from_units(1));
        assert_eq!(Money::from_micros(1_500_000).round_to_unit(), Money::from_units(2));
        assert_eq!(Money::from_micros(-1_500_000).round_to_unit(), Money::from_units(-2));
        assert_eq!(Money::from_micros(400_000).round_to_unit(), Money::zero());
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_units(-1);
        assert!(negative.is_negative());
        assert_eq!(negative.abs(), Money::from_units(1));
    }

    #[test]
    fn test_approx_zero() {
        let tolerance = Money::from_micros(10_000);
        assert!(Money::from_micros(10_000).approx_zero(tolerance));
        assert!(Money::from_micros(-10_000).approx_zero(tolerance));
        assert!(!Money::from_micros(10_001).approx_zero(tolerance));
    }

    #[test]
    fn test_serde_whole_units() {
        let json = serde_json::to_string(&Money::from_units(300_000)).unwrap();
        assert_eq!(json, "300000");

        let parsed: Money = serde_json::from_str("300000").unwrap();
        assert_eq!(parsed, Money::from_units(300_000));
    }

    #[test]
    fn test_serde_fractional_units() {
        let parsed: Money = serde_json::from_str("12.5").unwrap();
        assert_eq!(parsed.micros(), 12_500_000);

        let json = serde_json::to_string(&parsed).unwrap();
        assert_eq!(json, "12.5");

        let negative: Money = serde_json::from_str("-7").unwrap();
        assert_eq!(negative, Money::from_units(-7));
    }

    #[test]
    fn test_serde_rejects_non_numbers() {
        assert!(serde_json::from_str::<Money>("\"100\"").is_err());
        assert!(serde_json::from_str::<Money>("1e300").is_err());
    }

    #[test]
    fn test_from_unit_f64() {
        assert_eq!(Money::from_unit_f64(0.01), Some(Money::from_micros(10_000)));
        assert_eq!(Money::from_unit_f64(-2.5), Some(Money::from_micros(-2_500_000)));
        assert_eq!(Money::from_unit_f64(f64::NAN), None);
        assert_eq!(Money::from_unit_f64(1e300), None);
    }

    #[test]
    fn test_checked_arithmetic() {
        let max = Money::from_micros(i64::MAX);
        assert_eq!(max.checked_add(Money::from_micros(1)), None);
        assert_eq!(Money::from_micros(i64::MIN).checked_sub(Money::from_micros(1)), None);
        assert_eq!(
            Money::from_units(2).checked_sub(Money::from_units(5)),
            Some(Money::from_units(-3))
        );

        let big = Money::from_units(5_000_000_000_000);
        assert_eq!(Money::checked_sum([big, big]), None);
        assert_eq!(
            Money::checked_sum([Money::from_units(1), Money::from_units(2)]),
            Some(Money::from_units(3))
        );
        assert_eq!(Money::checked_sum(Vec::new()), Some(Money::zero()));
    }

    #[test]
    fn test_serde_fraction_exact_below_a_billion_units() {
        let amount = Money::from_micros(999_999_999_123_457);
        let json = serde_json::to_string(&amount).unwrap();
        let parsed: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, amount);
    }
}
