//! # Cart Ledger
//!
//! The shopping cart's line items and the single place they change.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Ledger Operations                               │
//! │                                                                         │
//! │  UI Action              Ledger Operation        State Change            │
//! │  ─────────              ────────────────        ────────────            │
//! │                                                                         │
//! │  Add to cart ─────────► add_item() ───────────► merge or push line     │
//! │                                                                         │
//! │  +/- buttons ─────────► set_quantity() ───────► lines[i].qty = n       │
//! │                          (n <= 0 removes)                               │
//! │                                                                         │
//! │  Remove ──────────────► remove_item() ────────► lines.retain(..)       │
//! │                                                                         │
//! │  Clear cart ──────────► clear_cart() ─────────► lines + discount reset │
//! │                                                                         │
//! │  Badge ───────────────► item_count() ─────────► (read only)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Reducer Form
//! Every mutation is also expressible as a [`CartEvent`], and [`reduce`]
//! folds an event into a state by value. A controller can therefore keep the
//! live cart as a plain value and log, replay or snapshot the events that
//! produced it.
//!
//! ```rust
//! use storefront_core::cart::{reduce, CartEvent, CartState};
//! use storefront_core::money::Money;
//!
//! let state = reduce(
//!     CartState::default(),
//!     CartEvent::ItemAdded {
//!         product_id: "1".into(),
//!         name: "Product 1".into(),
//!         unit_price: Money::from_major(10),
//!         quantity: 2,
//!     },
//! );
//! assert_eq!(state.item_count(), 2);
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::discount::DiscountRule;
use crate::money::Money;
use crate::pricing::{calculate_totals, Totals};
use crate::types::{Product, TaxRate};

// =============================================================================
// Cart Line
// =============================================================================

/// One product's presence in the cart.
///
/// ## Invariants
/// - `quantity >= 1`; a line that would drop to zero is removed instead
/// - `unit_price` is frozen at add time and never changes afterwards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
}

impl CartLine {
    /// `unit_price × quantity`.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart State
// =============================================================================

/// The whole cart as one serializable value.
///
/// ## Invariants
/// - Lines are unique by `product_id` (adding the same product merges)
/// - Lines keep insertion order; new products are appended
/// - At most one discount is applied at a time
/// - Currency and tax rate survive `clear_cart`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartState {
    lines: Vec<CartLine>,
    applied_discount: Option<DiscountRule>,
    currency_code: String,
    tax_rate: TaxRate,
}

impl CartState {
    /// Creates an empty cart priced in `currency_code` at `tax_rate`.
    pub fn new(currency_code: impl Into<String>, tax_rate: TaxRate) -> Self {
        CartState {
            lines: Vec::new(),
            applied_discount: None,
            currency_code: currency_code.into(),
            tax_rate,
        }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    pub fn applied_discount(&self) -> Option<&DiscountRule> {
        self.applied_discount.as_ref()
    }

    pub fn currency_code(&self) -> &str {
        &self.currency_code
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Adds `quantity` of a product, merging into an existing line.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity increases, price stays as first captured
    /// - Product not in cart: new line appended at the end
    /// - `quantity <= 0` never creates a line; merged into an existing line it
    ///   can only shrink it, and removes it once it reaches zero
    /// - The merged quantity saturates at `i64::MAX`
    pub fn add_item(&mut self, product_id: &str, unit_price: Money, name: &str, quantity: i64) {
        if let Some(idx) = self.position(product_id) {
            let merged = self.lines[idx].quantity.saturating_add(quantity);
            if merged <= 0 {
                self.lines.remove(idx);
            } else {
                self.lines[idx].quantity = merged;
            }
            return;
        }

        if quantity <= 0 {
            return;
        }

        self.lines.push(CartLine {
            product_id: product_id.to_string(),
            name: name.to_string(),
            unit_price,
            quantity,
        });
    }

    /// Adds a catalog product, capturing its current price.
    pub fn add_product(&mut self, product: &Product, quantity: i64) {
        self.add_item(&product.id, product.unit_price, &product.name, quantity);
    }

    /// Deletes the line for `product_id`. Returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() != before
    }

    /// Replaces a line's quantity in place; `quantity <= 0` removes the line.
    ///
    /// Unknown products are ignored.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }

        if let Some(idx) = self.position(product_id) {
            self.lines[idx].quantity = quantity;
        }
    }

    /// Empties all lines and drops any applied discount.
    pub fn clear_cart(&mut self) {
        self.lines.clear();
        self.applied_discount = None;
    }

    /// Sum of all line quantities (the badge number).
    pub fn item_count(&self) -> i64 {
        self.lines
            .iter()
            .fold(0i64, |count, l| count.saturating_add(l.quantity))
    }

    /// Number of distinct products.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Clears the applied discount without touching lines.
    pub fn remove_discount(&mut self) {
        self.applied_discount = None;
    }

    /// Installs an already-resolved rule, replacing any previous one.
    ///
    /// Eligibility is the resolver's job; see
    /// [`DiscountResolver::apply`](crate::discount::DiscountResolver::apply).
    pub(crate) fn set_discount(&mut self, rule: DiscountRule) {
        self.applied_discount = Some(rule);
    }

    /// Derives subtotal, discount, taxable amount, tax and total.
    ///
    /// Recomputed on every call; totals are never cached on the state.
    pub fn totals(&self) -> Totals {
        calculate_totals(&self.lines, self.applied_discount.as_ref(), self.tax_rate)
    }

    /// Applies one event in place.
    pub fn apply(&mut self, event: &CartEvent) {
        match event {
            CartEvent::ItemAdded {
                product_id,
                name,
                unit_price,
                quantity,
            } => self.add_item(product_id, *unit_price, name, *quantity),
            CartEvent::ItemRemoved { product_id } => {
                self.remove_item(product_id);
            }
            CartEvent::QuantitySet {
                product_id,
                quantity,
            } => self.set_quantity(product_id, *quantity),
            CartEvent::CartCleared => self.clear_cart(),
            CartEvent::DiscountApplied { rule } => self.set_discount(rule.clone()),
            CartEvent::DiscountRemoved => self.remove_discount(),
        }
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.lines.iter().position(|l| l.product_id == product_id)
    }
}

impl Default for CartState {
    /// Empty USD cart at the default tax rate.
    fn default() -> Self {
        CartState::new(crate::DEFAULT_CURRENCY_CODE, TaxRate::default())
    }
}

// =============================================================================
// Cart Events
// =============================================================================

/// A single cart mutation, as data.
///
/// `DiscountApplied` carries a rule that has already passed eligibility; the
/// reducer installs it as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum CartEvent {
    #[serde(rename_all = "camelCase")]
    ItemAdded {
        product_id: String,
        name: String,
        unit_price: Money,
        quantity: i64,
    },
    #[serde(rename_all = "camelCase")]
    ItemRemoved { product_id: String },
    #[serde(rename_all = "camelCase")]
    QuantitySet { product_id: String, quantity: i64 },
    CartCleared,
    DiscountApplied { rule: DiscountRule },
    DiscountRemoved,
}

/// Folds one event into a cart state: `(state, event) -> state`.
pub fn reduce(mut state: CartState, event: CartEvent) -> CartState {
    state.apply(&event);
    state
}

// =============================================================================
// Unit Tests
// =============================================================================
