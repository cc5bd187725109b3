//! # Pricing Calculator
//!
//! Derives every cart total from `(lines, applied discount, tax rate)`.
//!
//! ## Calculation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Totals Derivation                                  │
//! │                                                                         │
//! │  lines ──► subtotal = Σ(unit_price × quantity)                         │
//! │                 │                                                       │
//! │  discount ──────┼──► discount_amount                                   │
//! │                 │      percentage: subtotal × bps / 10000 (half-up)    │
//! │                 │      fixed:      min(amount, subtotal)               │
//! │                 ▼                                                       │
//! │         taxable = max(0, subtotal − discount_amount)                   │
//! │                 │                                                       │
//! │  tax_rate ──────┼──► tax = round_half_up(taxable × rate)               │
//! │                 ▼                                                       │
//! │           total = taxable + tax                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All five values are produced together by [`calculate_totals`]; nothing
//! here is cached, so a stale total cannot exist.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartLine;
use crate::discount::{DiscountKind, DiscountRule};
use crate::money::Money;
use crate::types::TaxRate;

/// Derived cart totals. Never stored on the cart; recomputed per read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Totals {
    pub subtotal: Money,
    pub discount_amount: Money,
    pub taxable_amount: Money,
    pub tax_amount: Money,
    pub total: Money,
}

impl Totals {
    /// All-zero totals (what an empty cart prices to).
    pub const fn zero() -> Self {
        Totals {
            subtotal: Money::zero(),
            discount_amount: Money::zero(),
            taxable_amount: Money::zero(),
            tax_amount: Money::zero(),
            total: Money::zero(),
        }
    }
}

/// `Σ(unit_price × quantity)` over all lines.
pub fn subtotal(lines: &[CartLine]) -> Money {
    lines.iter().map(CartLine::line_total).sum()
}

/// The reduction a rule grants on `subtotal`.
///
/// ## Known Behavior: `max_discount` Is Not Enforced
/// A percentage rule may declare `max_discount`, but the amount is not clamped
/// to it. VIP30 on a $1000 cart takes $300 off even though the rule says $150.
/// This matches what the storefront has always charged; changing it needs a
/// pricing decision, not a code fix.
///
/// ```rust
/// use storefront_core::discount::DiscountRule;
/// use storefront_core::money::Money;
/// use storefront_core::pricing::discount_amount;
///
/// let vip = DiscountRule::percentage("VIP30", 30).with_max_discount(Money::from_major(150));
/// assert_eq!(discount_amount(&vip, Money::from_major(1000)), Money::from_major(300));
///
/// let flat = DiscountRule::fixed("FLAT50", Money::from_major(50));
/// assert_eq!(discount_amount(&flat, Money::from_major(20)), Money::from_major(20));
/// ```
pub fn discount_amount(rule: &DiscountRule, subtotal: Money) -> Money {
    match rule.kind {
        DiscountKind::Percentage { bps } => subtotal.percentage(bps),
        DiscountKind::Fixed { amount } => amount.min(subtotal).floor_zero(),
    }
}

/// Computes all totals at once.
///
/// ```rust
/// use storefront_core::cart::CartLine;
/// use storefront_core::discount::DiscountRule;
/// use storefront_core::money::Money;
/// use storefront_core::pricing::calculate_totals;
/// use storefront_core::types::TaxRate;
///
/// let lines = vec![CartLine {
///     product_id: "1".into(),
///     name: "Product 1".into(),
///     unit_price: Money::from_major(10),
///     quantity: 2,
/// }];
/// let save10 = DiscountRule::percentage("SAVE10", 10);
///
/// let totals = calculate_totals(&lines, Some(&save10), TaxRate::from_bps(1000));
/// assert_eq!(totals.subtotal.cents(), 2000);
/// assert_eq!(totals.discount_amount.cents(), 200);
/// assert_eq!(totals.taxable_amount.cents(), 1800);
/// assert_eq!(totals.tax_amount.cents(), 180);
/// assert_eq!(totals.total.cents(), 1980);
/// ```
pub fn calculate_totals(
    lines: &[CartLine],
    discount: Option<&DiscountRule>,
    tax_rate: TaxRate,
) -> Totals {
    let subtotal = subtotal(lines);
    let discount_amount = discount
        .map(|rule| discount_amount(rule, subtotal))
        .unwrap_or_default();
    let taxable_amount = (subtotal - discount_amount).floor_zero();
    let tax_amount = taxable_amount.calculate_tax(tax_rate);

    Totals {
        subtotal,
        discount_amount,
        taxable_amount,
        tax_amount,
        total: taxable_amount + tax_amount,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
