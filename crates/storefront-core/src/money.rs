//! # Money Module
//!
//! Provides the `Money` type used for every amount the cart engine touches.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  A browser cart summing float prices:                                   │
//! │    19.99 × 3 = 59.970000000000006                                       │
//! │    and a 10% tax on that drifts again before it is rounded             │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units (cents)                              │
//! │    1999 × 3 = 5997 cents, exactly                                      │
//! │    Rounding happens in exactly two places: percentage discounts        │
//! │    and tax, both half-up to the cent                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Overflow
//! Arithmetic saturates at `i64::MIN` / `i64::MAX` instead of panicking. The
//! ledger accepts replayed events with any quantity, and pricing must never
//! abort on them.
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::from_cents(1000); // $10.00
//! let line = price * 2;                // $20.00
//! assert_eq!(line.cents(), 2000);
//!
//! // 10% of $20.00
//! assert_eq!(line.percentage(1000).cents(), 200);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

/// Basis points in one whole (100%).
const BPS_SCALE: i128 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: a net-negative cart must be representable so checkout
///   can reject it instead of wrapping around
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **No float constructor**: prices enter the engine already in cents
///
/// ## Where Money Flows
/// ```text
/// Product.unit_price ──► CartLine.unit_price ──► CartLine.line_total
///                                                      │
///                                       Σ ─────────────┘
///                                       ▼
///            subtotal ──► discount ──► taxable ──► tax ──► total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -$5.50.
    ///
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
    /// assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Shorthand for whole amounts: `Money::from_major(20)` is $20.00.
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * 100)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion, truncated toward zero.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor-unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Largest representable amount; where saturating arithmetic stops.
    pub const MAX: Money = Money(i64::MAX);

    /// Zero money value.
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

    /// Returns the larger of `self` and zero.
    ///
    /// Used to floor the taxable amount: a discount can never push the cart
    /// below nothing.
    #[inline]
    pub const fn floor_zero(self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            self
        }
    }

    /// Multiplies a unit price by a quantity, saturating on overflow.
    ///
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// assert_eq!(Money::MAX.multiply_quantity(2), Money::MAX);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Returns `bps` basis points of this amount, rounded half-up to the cent.
    ///
    /// Half-up means a value exactly halfway between two cents moves toward
    /// positive infinity, the same way a browser's `Math.round` behaves on
    /// `amount * 100`.
    ///
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// // 30% of $1000.00
    /// assert_eq!(Money::from_major(1000).percentage(3000), Money::from_major(300));
    /// // 10% of $0.05 is half a cent, which rounds up
    /// assert_eq!(Money::from_cents(5).percentage(1000).cents(), 1);
    /// ```
    pub fn percentage(&self, bps: u32) -> Money {
        Money(round_half_up_bps(self.0, bps))
    }

    /// Calculates tax on this amount, rounded half-up to the cent.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    /// use storefront_core::types::TaxRate;
    ///
    /// // $18.00 at 10% = $1.80
    /// let tax = Money::from_cents(1800).calculate_tax(TaxRate::from_bps(1000));
    /// assert_eq!(tax.cents(), 180);
    ///
    /// // $10.00 at 8.25% = $0.825 → $0.83
    /// let tax = Money::from_cents(1000).calculate_tax(TaxRate::from_bps(825));
    /// assert_eq!(tax.cents(), 83);
    /// ```
    ///
    /// ## Pricing Flow
    /// ```text
    /// Taxable: $18.00
    ///      │
    ///      ▼
    /// calculate_tax(10%) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Tax: $1.80 ──► Total: $19.80
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        self.percentage(rate.bps())
    }
}

/// `amount * bps / 10000`, rounded half toward positive infinity.
///
/// i128 keeps large carts (and large rates) from overflowing the product.
/// Rates above 100% can still exceed i64, so the result is clamped.
fn round_half_up_bps(amount: i64, bps: u32) -> i64 {
    let scaled = amount as i128 * bps as i128;
    let rounded = (scaled + BPS_SCALE / 2).div_euclid(BPS_SCALE);
    rounded.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-oriented rendering (`$12.34`, `-$5.50`).
///
/// ## Note
/// Use a [`CurrencyFormatter`](crate::format::CurrencyFormatter) for anything
/// shown to a shopper; it knows about symbols and digit grouping.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.major().abs(), self.minor_part())
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

/// Multiplication by a quantity; see [`Money::multiply_quantity`].
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
// Unit Tests
// =============================================================================
