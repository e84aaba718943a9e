//! # Money Module
//!
//! Provides the `Amount` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal                                             │
//! │    180 × 0.18 = 32.4 exactly, every time, on every machine             │
//! │                                                                         │
//! │  Line quantities are decimals too (2.5 hours of labor, 43.7 liters),   │
//! │  so integer cents are not an option here.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding Contract
//! No rounding is applied mid-computation. Totals are carried at full
//! precision; only the presentation layer rounds, through [`Amount::rounded`]
//! (2 decimal places, round half to even).
//!
//! ## Usage
//! ```rust
//! use atelier_core::money::Amount;
//! use rust_decimal_macros::dec;
//!
//! let price = Amount::new(dec!(10.99));
//!
//! // Arithmetic operations
//! let doubled = price * dec!(2);              // 21.98
//! let total = price + Amount::new(dec!(5));   // 15.99
//!
//! assert_eq!(doubled.value(), dec!(21.98));
//! assert_eq!(total.value(), dec!(15.99));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Amount Type
// =============================================================================

/// Represents a monetary value in the document's currency.
///
/// ## Design Decisions
/// - **`rust_decimal::Decimal`**: exact base-10 arithmetic, no binary float drift
/// - **Signed**: negative values are legitimate (amount discounts may exceed
///   the base, credit lines, refunds)
/// - **Single field tuple struct**: zero-cost abstraction over `Decimal`
/// - **Currency-agnostic**: the currency code lives in the document header;
///   this type never formats currency symbols
///
/// ## Where Amount is Used
/// ```text
/// PriceEntry.unit_price ──► LineItem.unit_price ──► LinePricing.line_ht
///                                                          │
/// Totals.total_ht ◄── aggregate() ◄── LinePricing.line_tax ┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Amount(#[ts(as = "String")] Decimal);

impl Amount {
    /// The zero amount.
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Creates an Amount from a decimal value.
    ///
    /// ## Example
    /// ```rust
    /// use atelier_core::money::Amount;
    /// use rust_decimal_macros::dec;
    ///
    /// let price = Amount::new(dec!(10.99));
    /// assert_eq!(price.value(), dec!(10.99));
    /// ```
    #[inline]
    pub const fn new(value: Decimal) -> Self {
        Amount(value)
    }

    /// Returns the underlying decimal value at full precision.
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Returns zero.
    #[inline]
    pub const fn zero() -> Self {
        Amount::ZERO
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is strictly positive.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is strictly negative.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Amount(self.0.abs())
    }

    /// Rounds to 2 decimal places for display. Midpoints round half to even.
    ///
    /// ## Example
    /// ```rust
    /// use atelier_core::money::Amount;
    /// use rust_decimal_macros::dec;
    ///
    /// let tax = Amount::new(dec!(32.4000));
    /// assert_eq!(tax.rounded(), dec!(32.40));
    /// ```
    ///
    /// This is the ONLY place precision is dropped. Internal totals keep the
    /// full value; callers round at the last moment before rendering.
    #[inline]
    pub fn rounded(&self) -> Decimal {
        self.0.round_dp(2)
    }

    /// Calculates the tax on this amount at the given rate.
    ///
    /// The result keeps full precision (no rounding).
    ///
    /// ## Example
    /// ```rust
    /// use atelier_core::money::Amount;
    /// use atelier_core::types::TaxRate;
    /// use rust_decimal_macros::dec;
    ///
    /// let ht = Amount::new(dec!(180));
    /// let rate = TaxRate::from_percent(dec!(18));
    ///
    /// // 180 × 18% = 32.4
    /// assert_eq!(ht.tax_at(rate).value(), dec!(32.40));
    /// ```
    pub fn tax_at(&self, rate: TaxRate) -> Amount {
        Amount(self.0 * rate.as_fraction())
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// ## Arguments
    /// * `percent` - Discount as a percentage (10 = 10%)
    ///
    /// ## Example
    /// ```rust
    /// use atelier_core::money::Amount;
    /// use rust_decimal_macros::dec;
    ///
    /// let base = Amount::new(dec!(200));
    /// let discounted = base.apply_percentage_discount(dec!(10)); // 10% off
    /// assert_eq!(discounted.value(), dec!(180.0));
    /// ```
    pub fn apply_percentage_discount(&self, percent: Decimal) -> Amount {
        Amount(self.0 * (Decimal::ONE - percent / Decimal::ONE_HUNDRED))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows the raw decimal value.
///
/// This is for debugging and logs. Actual UI display goes through a
/// locale-aware currency formatter in the frontend, fed by [`Amount::rounded`].
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Default amount is zero.
impl Default for Amount {
    fn default() -> Self {
        Amount::ZERO
    }
}

/// Addition of two Amount values.
impl Add for Amount {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Amount(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Amount {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Amount values.
impl Sub for Amount {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Amount(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Amount {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a decimal factor (for quantity calculations).
impl Mul<Decimal> for Amount {
    type Output = Self;

    #[inline]
    fn mul(self, factor: Decimal) -> Self {
        Amount(self.0 * factor)
    }
}

/// Summation over iterators of Amount.
impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, |acc, a| acc + a)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_and_value() {
        let amount = Amount::new(dec!(10.99));
        assert_eq!(amount.value(), dec!(10.99));
    }

    #[test]
    fn test_arithmetic() {
        let a = Amount::new(dec!(10));
        let b = Amount::new(dec!(5));

        assert_eq!((a + b).value(), dec!(15));
        assert_eq!((a - b).value(), dec!(5));
        assert_eq!((a * dec!(3)).value(), dec!(30));
    }

    #[test]
    fn test_tax_exact() {
        // 180 at 18% = 32.4, exactly
        let ht = Amount::new(dec!(180));
        let tax = ht.tax_at(TaxRate::from_percent(dec!(18)));
        assert_eq!(tax.value(), dec!(32.40));
    }

    #[test]
    fn test_tax_keeps_full_precision() {
        // 10.99 at 8.25% = 0.906675; nothing is rounded away
        let ht = Amount::new(dec!(10.99));
        let tax = ht.tax_at(TaxRate::from_percent(dec!(8.25)));
        assert_eq!(tax.value(), dec!(0.906675));
        // Presentation rounding happens separately
        assert_eq!(tax.rounded(), dec!(0.91));
    }

    #[test]
    fn test_tax_on_negative_amount() {
        // Negative HT (over-discounted line) produces negative tax
        let ht = Amount::new(dec!(-25));
        let tax = ht.tax_at(TaxRate::from_percent(dec!(20)));
        assert_eq!(tax.value(), dec!(-5.00));
    }

    #[test]
    fn test_percentage_discount() {
        let base = Amount::new(dec!(200));
        let discounted = base.apply_percentage_discount(dec!(10));
        assert_eq!(discounted.value(), dec!(180.0));
    }

    #[test]
    fn test_rounded_uses_half_even() {
        assert_eq!(Amount::new(dec!(0.825)).rounded(), dec!(0.82));
        assert_eq!(Amount::new(dec!(0.835)).rounded(), dec!(0.84));
        assert_eq!(Amount::new(dec!(0.8251)).rounded(), dec!(0.83));
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Amount::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Amount::new(dec!(1));
        assert!(positive.is_positive());

        let negative = Amount::new(dec!(-1));
        assert!(negative.is_negative());
        assert_eq!(negative.abs().value(), dec!(1));
    }

    #[test]
    fn test_sum() {
        let total: Amount = [dec!(1.10), dec!(2.20), dec!(3.30)]
            .into_iter()
            .map(Amount::new)
            .sum();
        assert_eq!(total.value(), dec!(6.60));
    }

    #[test]
    fn test_display_shows_raw_value() {
        assert_eq!(format!("{}", Amount::new(dec!(32.4000))), "32.4000");
    }
}
