//! # Checkout Validator
//!
//! Turns a priced cart into an order intent, or explains why it can't.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cart Lifecycle                                  │
//! │                                                                         │
//! │  ┌──────────┐  add_item  ┌──────────┐  apply code  ┌────────────────┐  │
//! │  │  Empty   │───────────►│ HasItems │─────────────►│ HasItems +     │  │
//! │  │          │◄───────────│          │◄─────────────│ Discount       │  │
//! │  └──────────┘ last line  └──────────┘ remove code  └────────────────┘  │
//! │       ▲        removed        │                            │           │
//! │       │                       └──────────┬─────────────────┘           │
//! │       │                                  ▼                              │
//! │       │                           checkout() ok                         │
//! │       └──────────────── cart cleared, OrderIntent emitted              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Clearing Discipline
//! The cart is cleared eagerly, in the same call that emits the intent. The
//! caller owns the hand-off to order submission; a failed hand-off does not
//! bring the lines back, but the intent it holds is a complete snapshot that
//! can be resubmitted.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::{CartLine, CartState};
use crate::error::{CheckoutError, CheckoutResult};
use crate::money::Money;
use crate::pricing::Totals;

/// Smallest total the storefront will charge, in cents.
pub const MIN_CHARGEABLE_CENTS: i64 = 1;

/// Where a cart sits in its lifecycle, derived from its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CheckoutPhase {
    Empty,
    HasItems,
    HasItemsWithDiscount,
}

impl CartState {
    pub fn phase(&self) -> CheckoutPhase {
        match (self.is_empty(), self.applied_discount().is_some()) {
            (true, _) => CheckoutPhase::Empty,
            (false, false) => CheckoutPhase::HasItems,
            (false, true) => CheckoutPhase::HasItemsWithDiscount,
        }
    }
}

/// The finalized payload handed to order submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderIntent {
    /// Snapshot of the lines at checkout time.
    pub lines: Vec<CartLine>,
    pub totals: Totals,
    pub currency_code: String,
    /// Code of the discount that priced this order, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_code: Option<String>,
}

impl OrderIntent {
    /// The amount to charge.
    pub fn total(&self) -> Money {
        self.totals.total
    }
}

/// Checks checkout preconditions without touching the cart.
///
/// ## Rules
/// - At least one line (`EmptyCart` otherwise)
/// - Total of at least [`MIN_CHARGEABLE_CENTS`] (`InvalidTotal` otherwise),
///   which rejects all-free and net-negative carts
pub fn validate(state: &CartState) -> CheckoutResult<Totals> {
    validate_with_minimum(state, Money::from_cents(MIN_CHARGEABLE_CENTS))
}

/// [`validate`] with a configurable minimum chargeable amount.
pub fn validate_with_minimum(state: &CartState, minimum: Money) -> CheckoutResult<Totals> {
    if state.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let totals = state.totals();
    if totals.total < minimum {
        return Err(CheckoutError::InvalidTotal {
            total: totals.total,
            minimum,
        });
    }

    Ok(totals)
}

/// Validates, snapshots the cart into an [`OrderIntent`], then clears it.
///
/// On error the cart is left exactly as it was.
///
/// ```rust
/// use storefront_core::cart::CartState;
/// use storefront_core::checkout::checkout;
/// use storefront_core::error::CheckoutError;
/// use storefront_core::money::Money;
///
/// let mut cart = CartState::default();
/// assert_eq!(checkout(&mut cart), Err(CheckoutError::EmptyCart));
///
/// cart.add_item("2", Money::from_major(20), "Product 2", 1);
/// let intent = checkout(&mut cart).unwrap();
/// assert_eq!(intent.total().cents(), 2200);
/// assert!(cart.is_empty());
/// ```
pub fn checkout(state: &mut CartState) -> CheckoutResult<OrderIntent> {
    checkout_with_minimum(state, Money::from_cents(MIN_CHARGEABLE_CENTS))
}

/// [`checkout`] with a configurable minimum chargeable amount.
pub fn checkout_with_minimum(state: &mut CartState, minimum: Money) -> CheckoutResult<OrderIntent> {
    let totals = validate_with_minimum(state, minimum)?;

    let intent = OrderIntent {
        lines: state.lines().to_vec(),
        totals,
        currency_code: state.currency_code().to_string(),
        discount_code: state.applied_discount().map(|r| r.code.clone()),
    };

    state.clear_cart();
    Ok(intent)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discount::DiscountResolver;
    use crate::types::{Product, TaxRate};

    fn ten_percent_cart() -> CartState {
        CartState::new("USD", TaxRate::from_bps(1000))
    }

    #[test]
    fn test_checkout_empty_cart() {
        let mut cart = ten_percent_cart();
        assert_eq!(checkout(&mut cart), Err(CheckoutError::EmptyCart));
        assert_eq!(cart.phase(), CheckoutPhase::Empty);
    }

    #[test]
    fn test_checkout_zero_total_rejected_without_mutation() {
        let mut cart = ten_percent_cart();
        cart.add_product(&Product::new("1", "Product 1", Money::zero(), 100), 1);
        let before = cart.clone();

        let err = checkout(&mut cart).unwrap_err();

        assert_eq!(
            err,
            CheckoutError::InvalidTotal {
                total: Money::zero(),
                minimum: Money::from_cents(1),
            }
        );
        assert_eq!(cart, before);
    }

    #[test]
    fn test_checkout_fully_discounted_cart_rejected() {
        let resolver = DiscountResolver::standard();
        let mut cart = ten_percent_cart();
        cart.add_item("1", Money::from_major(200), "Product 1", 1);
        resolver.apply(&mut cart, "FLAT50").unwrap();
        // eligibility is only checked at apply time, so the code survives this
        cart.remove_item("1");
        cart.add_item("2", Money::from_major(30), "Product 2", 1);

        assert!(matches!(
            checkout(&mut cart),
            Err(CheckoutError::InvalidTotal { .. })
        ));
        assert_eq!(cart.phase(), CheckoutPhase::HasItemsWithDiscount);
    }

    #[test]
    fn test_checkout_success_emits_snapshot_and_clears() {
        let resolver = DiscountResolver::standard();
        let mut cart = ten_percent_cart();
        cart.add_item("1", Money::from_major(10), "Product 1", 2);
        resolver.apply(&mut cart, "SAVE10").unwrap();
        assert_eq!(cart.phase(), CheckoutPhase::HasItemsWithDiscount);

        let intent = checkout(&mut cart).unwrap();

        assert_eq!(intent.lines.len(), 1);
        assert_eq!(intent.lines[0].quantity, 2);
        assert_eq!(intent.total().cents(), 1980);
        assert_eq!(intent.currency_code, "USD");
        assert_eq!(intent.discount_code.as_deref(), Some("SAVE10"));

        assert!(cart.is_empty());
        assert!(cart.applied_discount().is_none());
        assert_eq!(cart.totals(), Totals::zero());
        assert_eq!(cart.phase(), CheckoutPhase::Empty);
    }

    #[test]
    fn test_validate_does_not_clear() {
        let mut cart = ten_percent_cart();
        cart.add_item("2", Money::from_major(20), "Product 2", 1);

        let totals = validate(&cart).unwrap();

        assert_eq!(totals.total.cents(), 2200);
        assert_eq!(cart.phase(), CheckoutPhase::HasItems);
    }

    #[test]
    fn test_checkout_with_custom_minimum() {
        let mut cart = ten_percent_cart();
        cart.add_item("1", Money::from_cents(50), "Sticker", 1);

        let err = checkout_with_minimum(&mut cart, Money::from_major(1)).unwrap_err();
        assert!(matches!(err, CheckoutError::InvalidTotal { .. }));
        assert!(!cart.is_empty());

        let intent = checkout_with_minimum(&mut cart, Money::from_cents(50)).unwrap();
        assert_eq!(intent.total().cents(), 55);
    }
}
