//! # Money Module
//!
//! Provides the `Money` type for the monetary fields of a cost breakdown.
//!
//! ## Rounding Boundary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WHERE ROUNDING HAPPENS                                                 │
//! │                                                                         │
//! │  rate tables (f64) ──► component costs (f64, unrounded)                │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                 subtotal, margin, total (f64, unrounded)               │
//! │                              │                                          │
//! │                              ▼                                          │
//! │             Money::from_amount ← THE ONLY ROUNDING POINT               │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                CostBreakdown (integer cents, immutable)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The rate card encodes fractional euro rates (0.0015 per card, 0.01 per
//! impression), so intermediate math stays in `f64`. Rounding to cents happens
//! exactly once, when the breakdown is assembled.
//!
//! ## Usage
//! ```rust
//! use pressquote_core::money::Money;
//!
//! let price = Money::from_amount(1234.567);
//! assert_eq!(price.cents(), 123457);
//! assert_eq!(price.to_string(), "1234.57 €");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in euro cents.
///
/// Serialized as a decimal amount (`12.34`) so that breakdowns read naturally
/// in JSON and in the rendered quote summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "f64", from = "f64")]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from an unrounded euro amount.
    ///
    /// Rounds half away from zero to the nearest cent, which for the
    /// non-negative amounts produced by the calculators is the usual
    /// "round half up".
    ///
    /// ## Example
    /// ```rust
    /// use pressquote_core::money::Money;
    ///
    /// assert_eq!(Money::from_amount(10.004).cents(), 1000);
    /// assert_eq!(Money::from_amount(10.006).cents(), 1001);
    /// ```
    #[inline]
    pub fn from_amount(amount: f64) -> Self {
        Money((amount * 100.0).round() as i64)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value as a euro amount (two decimals).
    #[inline]
    pub fn amount(&self) -> f64 {
        self.0 as f64 / 100.0
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

/// Rounds a non-monetary quantity (weights) to a number of decimals.
///
/// Weight per copy is reported with 3 decimals (kg), total weight with 2.
pub fn round_decimals(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display as a euro amount, e.g. `1234.57 €`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{}{}.{:02} €", sign, abs / 100, abs % 100)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Money> for f64 {
    fn from(money: Money) -> f64 {
        money.amount()
    }
}

impl From<f64> for Money {
    fn from(amount: f64) -> Money {
        Money::from_amount(amount)
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

// =============================================================================
// Unit Tests
// =============================================================================
