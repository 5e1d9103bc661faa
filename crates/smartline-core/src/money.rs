//! # Money Module
//!
//! Provides the `Money` type for ruble amounts.
//!
//! Arithmetic saturates at the `i64` bounds, so totals over corrupt backend
//! data clamp instead of panicking or wrapping.
//!
//! ## Why Integer Kopecks?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The backend sends prices as JSON numbers in rubles:                   │
//! │    0.1 + 0.2 = 0.30000000000000004                                     │
//! │                                                                         │
//! │  A work order with 40 lines summed as floats can drift by a kopeck,    │
//! │  and the list card, detail view and printout must agree exactly.       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Kopecks                                          │
//! │    Floats are converted ONCE, at the serde boundary, and every sum     │
//! │    after that is exact integer arithmetic.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use smartline_core::money::Money;
//!
//! let price = Money::from_rubles_kopecks(1500, 0);
//! let line = price * 4;
//! assert_eq!(line.kopecks(), 600_000);
//! assert_eq!(line.rubles(), 6000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use ts_rs::TS;

/// Kopecks per ruble.
pub const KOPECKS_PER_RUBLE: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A ruble amount in kopecks.
///
/// Signed so that margins (sale minus purchase) can go negative without a
/// separate type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from kopecks.
    #[inline]
    pub const fn from_kopecks(kopecks: i64) -> Self {
        Money(kopecks)
    }

    /// Creates a Money value from rubles and kopecks.
    ///
    /// ## Example
    /// ```rust
    /// use smartline_core::money::Money;
    ///
    /// assert_eq!(Money::from_rubles_kopecks(1234, 56).kopecks(), 123_456);
    /// assert_eq!(Money::from_rubles_kopecks(-5, 50).kopecks(), -550);
    /// ```
    ///
    /// For negative amounts only the ruble part carries the sign.
    #[inline]
    pub const fn from_rubles_kopecks(rubles: i64, kopecks: i64) -> Self {
        if rubles < 0 {
            Money(rubles * KOPECKS_PER_RUBLE - kopecks)
        } else {
            Money(rubles * KOPECKS_PER_RUBLE + kopecks)
        }
    }

    /// Converts a ruble amount received as a float.
    ///
    /// This is the only place a float becomes money. The amount is rounded
    /// to the nearest kopeck, halves away from zero (`f64::round`), the same
    /// way `Math.round` treats the non-negative amounts the frontend sends.
    ///
    /// Returns `None` for NaN, infinities, and amounts outside the `i64`
    /// kopeck range.
    ///
    /// ## Example
    /// ```rust
    /// use smartline_core::money::Money;
    ///
    /// assert_eq!(Money::from_rubles_f64(1234.56), Some(Money::from_kopecks(123_456)));
    /// assert_eq!(Money::from_rubles_f64(0.125), Some(Money::from_kopecks(13)));
    /// assert_eq!(Money::from_rubles_f64(f64::NAN), None);
    /// ```
    pub fn from_rubles_f64(rubles: f64) -> Option<Self> {
        if !rubles.is_finite() {
            return None;
        }
        let kopecks = (rubles * KOPECKS_PER_RUBLE as f64).round();
        if kopecks < i64::MIN as f64 || kopecks >= i64::MAX as f64 {
            return None;
        }
        Some(Money(kopecks as i64))
    }

    /// Returns the amount as a float number of rubles (wire format only).
    #[inline]
    pub fn to_rubles_f64(&self) -> f64 {
        self.0 as f64 / KOPECKS_PER_RUBLE as f64
    }

    /// Returns the value in kopecks.
    #[inline]
    pub const fn kopecks(&self) -> i64 {
        self.0
    }

    /// Returns the whole-ruble portion (truncated toward zero).
    #[inline]
    pub const fn rubles(&self) -> i64 {
        self.0 / KOPECKS_PER_RUBLE
    }

    /// Returns the kopeck portion (always 0-99).
    ///
    /// ## Example
    /// ```rust
    /// use smartline_core::money::Money;
    ///
    /// assert_eq!(Money::from_kopecks(123_456).kopecks_part(), 56);
    /// assert_eq!(Money::from_kopecks(-550).kopecks_part(), 50);
    /// ```
    #[inline]
    pub const fn kopecks_part(&self) -> i64 {
        (self.0 % KOPECKS_PER_RUBLE).abs()
    }

    /// Rounds to whole rubles, halves away from zero.
    #[inline]
    pub const fn round_to_rubles(&self) -> Self {
        let half = KOPECKS_PER_RUBLE / 2;
        let rubles = if self.0 >= 0 {
            self.0.saturating_add(half) / KOPECKS_PER_RUBLE
        } else {
            self.0.saturating_sub(half) / KOPECKS_PER_RUBLE
        };
        Money(rubles * KOPECKS_PER_RUBLE)
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.saturating_abs())
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use smartline_core::money::Money;
    ///
    /// let unit = Money::from_rubles_kopecks(500, 0);
    /// assert_eq!(unit.multiply_quantity(4), Money::from_rubles_kopecks(2000, 0));
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Multiplies an hourly rate by a (fractional) number of hours,
    /// rounding to the nearest kopeck.
    ///
    /// ## Example
    /// ```rust
    /// use smartline_core::money::Money;
    ///
    /// let rate = Money::from_rubles_kopecks(2000, 0);
    /// assert_eq!(rate.multiply_hours(1.5), Money::from_rubles_kopecks(3000, 0));
    /// ```
    pub fn multiply_hours(&self, hours: f64) -> Self {
        if !hours.is_finite() {
            return Money::zero();
        }
        Money((self.0 as f64 * hours).round() as i64)
    }

    /// Returns the larger of `self` and zero.
    #[inline]
    pub const fn clamp_non_negative(&self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            *self
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-style rendering. Use [`crate::format::format_rub`] for documents.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}.{:02} ₽",
            sign,
            self.rubles().abs(),
            self.kopecks_part()
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

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
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
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Serde Boundary: rubles as JSON numbers
// =============================================================================

/// `#[serde(with = "rubles")]` for fields the backend sends as ruble floats.
///
/// ```rust
/// use serde::Deserialize;
/// use smartline_core::money::{self, Money};
///
/// #[derive(Deserialize)]
/// struct Line {
///     #[serde(with = "money::rubles")]
///     price: Money,
/// }
///
/// let line: Line = serde_json::from_str(r#"{"price": 1499.9}"#).unwrap();
/// assert_eq!(line.price.kopecks(), 149_990);
/// ```
pub mod rubles {
    use super::Money;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(money.to_rubles_f64())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Money::from_rubles_f64(value)
            .ok_or_else(|| de::Error::custom(format!("invalid ruble amount: {value}")))
    }
}

/// Like [`rubles`] for optional fields; JSON `null` maps to `None`.
pub mod rubles_opt {
    use super::Money;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(money: &Option<Money>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match money {
            Some(m) => serializer.serialize_some(&m.to_rubles_f64()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Money>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<f64>::deserialize(deserializer)? {
            Some(value) => Money::from_rubles_f64(value)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid ruble amount: {value}"))),
            None => Ok(None),
        }
    }
}
