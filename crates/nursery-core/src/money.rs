//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Micros?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  THE EARLY ROUNDING PROBLEM                                             │
//! │    Storing $0.005 as "0.01" and summing three of them = $0.03           │
//! │    Summing the exact values and rounding once      = $0.02             │
//! │                                                                         │
//! │  OUR SOLUTION: Integer micro-units (1 unit = 1_000_000 micros)          │
//! │    Costs keep sub-cent precision, sums are exact, and rounding to       │
//! │    cents happens exactly once, when a value is formatted for display.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use nursery_core::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//! let doubled = price * 2;            // $21.98
//! assert_eq!(doubled.to_decimal_string(), "21.98");
//! assert_eq!(format!("{}", price + Money::from_cents(500)), "$15.99");
//! ```
//!
//! All arithmetic saturates instead of overflowing, so no cart operation can
//! panic on an absurd cost.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

/// Micros in one currency unit (one dollar).
pub const MICROS_PER_UNIT: i64 = 1_000_000;

/// Micros in one cent.
pub const MICROS_PER_CENT: i64 = 10_000;

/// Symbol used when a value is displayed with its currency prefix.
pub const CURRENCY_SYMBOL: &str = "$";

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in micro-units of the currency.
///
/// ## Where Money is Used
/// ```text
/// "$5.00" ──► parse_cost ──► LineItem.unit_cost ──► subtotal() ──┐
///                                                                 │
///              CartState::total_cost() ◄── Σ (exact, unrounded) ◄─┘
///                        │
///                        ▼
///              to_decimal_string() ──► "10.00"   (the ONLY rounding step)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Largest representable amount; saturating arithmetic stops here.
    pub const MAX: Money = Money(i64::MAX);

    /// Creates a Money value from micro-units.
    ///
    /// ```rust
    /// use nursery_core::money::Money;
    ///
    /// let half_cent = Money::from_micros(5_000);
    /// assert_eq!(half_cent.micros(), 5_000);
    /// ```
    #[inline]
    pub const fn from_micros(micros: i64) -> Self {
        Money(micros)
    }

    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents.saturating_mul(MICROS_PER_CENT))
    }

    /// Returns the raw value in micro-units.
    #[inline]
    pub const fn micros(&self) -> i64 {
        self.0
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
    /// use nursery_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(333); // $3.33
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.to_decimal_string(), "9.99");
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Rounds to whole cents, half away from zero.
    ///
    /// Uses the same "+half, then divide" integer trick as tax math:
    /// `(micros + 5000) / 10000`.
    ///
    /// ```rust
    /// use nursery_core::money::Money;
    ///
    /// assert_eq!(Money::from_micros(15_000).round_to_cents(), 2);  // 0.015 → 0.02
    /// assert_eq!(Money::from_micros(14_999).round_to_cents(), 1);  // 0.014999 → 0.01
    /// assert_eq!(Money::from_micros(-15_000).round_to_cents(), -2);
    /// ```
    pub const fn round_to_cents(&self) -> i64 {
        let half = MICROS_PER_CENT / 2;
        if self.0 >= 0 {
            self.0.saturating_add(half) / MICROS_PER_CENT
        } else {
            self.0.saturating_sub(half) / MICROS_PER_CENT
        }
    }

    /// Formats the value with exactly two decimals and no currency symbol.
    ///
    /// This is the presentation boundary: the result is never parsed back
    /// into the cart.
    ///
    /// ```rust
    /// use nursery_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1250).to_decimal_string(), "12.50");
    /// assert_eq!(Money::zero().to_decimal_string(), "0.00");
    /// ```
    pub fn to_decimal_string(&self) -> String {
        let cents = self.round_to_cents();
        let sign = if cents < 0 { "-" } else { "" };
        let abs = cents.unsigned_abs();
        format!("{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the currency-prefixed form, e.g. `$12.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.to_decimal_string();
        match text.strip_prefix('-') {
            Some(abs) => write!(f, "-{}{}", CURRENCY_SYMBOL, abs),
            None => write!(f, "{}{}", CURRENCY_SYMBOL, text),
        }
    }
}

/// Default money is zero.
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

/// Multiplication by quantity.
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

// =============================================================================
// Unit Tests
// =============================================================================
