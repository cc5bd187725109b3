//! # Cart Session
//!
//! The controller the storefront UI talks to. Owns the single live cart.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Session Commands                                │
//! │                                                                         │
//! │  UI Action               Command                   Cart Change          │
//! │  ─────────               ───────                   ───────────          │
//! │                                                                         │
//! │  Add to cart ──────────► add_to_cart() ──────────► line added/merged   │
//! │  Change quantity ──────► set_quantity() ─────────► qty replaced        │
//! │  Remove ───────────────► remove_from_cart() ─────► line removed        │
//! │  Clear ────────────────► clear_cart() ───────────► lines + code gone   │
//! │  Apply code ───────────► apply_discount_code() ──► rule replaced       │
//! │  Remove code ──────────► remove_discount() ──────► rule cleared        │
//! │  View ─────────────────► get_cart() / get_totals()  (read only)        │
//! │  Pay ──────────────────► checkout() ─────────────► cleared, submitted  │
//! │                                                                         │
//! │  Every command either fully applies or leaves the cart untouched.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! One session per shopper. Commands take `&mut self`, so access is already
//! serialized by the borrow checker and nothing here locks. Only the order
//! hand-off awaits, and the cart has been settled before it does.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use storefront_core::checkout::checkout_with_minimum;
use storefront_core::quote::{installment_payment, shipping_cost};
use storefront_core::validation::{
    validate_discount_code, validate_product_id, validate_quantity, validate_unit_price,
};
use storefront_core::{
    CartLine, CartState, CheckoutPhase, CurrencyFormatter, DiscountResolver, DiscountRule, Money,
    StandardFormatter, Totals, ValidationError, MAX_ITEM_QUANTITY,
};
use tracing::{debug, info, warn};

use crate::catalog::ProductCatalog;
use crate::config::StorefrontConfig;
use crate::error::{ApiError, ApiResult};
use crate::submission::{OrderEnvelope, OrderReceipt, OrderSubmission};

/// Cart response including lines, totals and the applied code.
///
/// What every mutating command returns, so the UI can re-render from one
/// payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    pub totals: Totals,
    pub item_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_discount: Option<DiscountRule>,
    pub phase: CheckoutPhase,
    pub currency_code: String,
}

impl From<&CartState> for CartResponse {
    fn from(cart: &CartState) -> Self {
        CartResponse {
            lines: cart.lines().to_vec(),
            totals: cart.totals(),
            item_count: cart.item_count(),
            applied_discount: cart.applied_discount().cloned(),
            phase: cart.phase(),
            currency_code: cart.currency_code().to_string(),
        }
    }
}

/// A shopper's cart plus the collaborators it needs.
pub struct CartSession {
    cart: CartState,
    resolver: DiscountResolver,
    catalog: Arc<dyn ProductCatalog>,
    submission: Arc<dyn OrderSubmission>,
    formatter: Arc<dyn CurrencyFormatter>,
    min_chargeable: Money,
}

impl CartSession {
    /// Creates an empty session priced per `config`.
    pub fn new(
        config: &StorefrontConfig,
        catalog: Arc<dyn ProductCatalog>,
        submission: Arc<dyn OrderSubmission>,
    ) -> Self {
        CartSession {
            cart: CartState::new(config.currency_code(), config.tax_rate()),
            resolver: DiscountResolver::new(Arc::new(config.discount_catalog())),
            catalog,
            submission,
            formatter: Arc::new(StandardFormatter),
            min_chargeable: config.min_chargeable(),
        }
    }

    /// Swaps the currency formatter used by [`format_amount`](Self::format_amount).
    pub fn with_formatter(mut self, formatter: Arc<dyn CurrencyFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Swaps the discount resolver (e.g. one backed by a remote code service).
    pub fn with_resolver(mut self, resolver: DiscountResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// The live cart, read-only.
    pub fn cart(&self) -> &CartState {
        &self.cart
    }

    // =========================================================================
    // Cart Commands
    // =========================================================================

    /// Adds a catalog product to the cart.
    ///
    /// ## Behavior
    /// - `quantity` defaults to 1 and must be within 1..=999
    /// - Product already in cart: quantity increases, first price is kept
    /// - The merged quantity may not exceed 999 either
    /// - A catalog product with a negative price is refused
    /// - Price is captured from the catalog now and never re-read
    pub fn add_to_cart(&mut self, product_id: &str, quantity: Option<i64>) -> ApiResult<CartResponse> {
        let quantity = quantity.unwrap_or(1);
        debug!(product_id = %product_id, quantity = %quantity, "add_to_cart command");

        validate_product_id(product_id)?;
        validate_quantity(quantity)?;

        let product = self
            .catalog
            .product(product_id)
            .ok_or_else(|| ApiError::not_found("Product", product_id))?;
        validate_unit_price(product.unit_price.cents())?;

        let existing = self.cart.line(product_id).map(|l| l.quantity).unwrap_or(0);
        if existing + quantity > MAX_ITEM_QUANTITY {
            return Err(ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 1,
                max: MAX_ITEM_QUANTITY,
            }
            .into());
        }

        self.cart.add_product(&product, quantity);
        Ok(self.get_cart())
    }

    /// Removes a product's line. Unknown products are a no-op.
    pub fn remove_from_cart(&mut self, product_id: &str) -> CartResponse {
        debug!(product_id = %product_id, "remove_from_cart command");

        if !self.cart.remove_item(product_id) {
            debug!(product_id = %product_id, "Product was not in cart");
        }
        self.get_cart()
    }

    /// Replaces a line's quantity; zero or less removes the line.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> ApiResult<CartResponse> {
        debug!(product_id = %product_id, quantity = %quantity, "set_quantity command");

        if quantity > MAX_ITEM_QUANTITY {
            return Err(ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 0,
                max: MAX_ITEM_QUANTITY,
            }
            .into());
        }

        self.cart.set_quantity(product_id, quantity);
        Ok(self.get_cart())
    }

    /// Empties the cart and drops the applied code.
    pub fn clear_cart(&mut self) -> CartResponse {
        debug!("clear_cart command");
        self.cart.clear_cart();
        self.get_cart()
    }

    // =========================================================================
    // Discount Commands
    // =========================================================================

    /// Applies a shopper-entered code.
    ///
    /// Unknown codes and codes whose minimum purchase the cart doesn't meet
    /// both fail with `INVALID_DISCOUNT_CODE`; the previously applied code, if
    /// any, stays.
    pub fn apply_discount_code(&mut self, code: &str) -> ApiResult<CartResponse> {
        debug!(code = %code, "apply_discount_code command");

        validate_discount_code(code)?;

        match self.resolver.apply(&mut self.cart, code) {
            Some(rule) => {
                debug!(code = %rule.code, "Discount applied");
                Ok(self.get_cart())
            }
            None => {
                warn!(
                    code = %code,
                    subtotal = %self.cart.totals().subtotal,
                    "Discount code rejected"
                );
                Err(ApiError::invalid_discount_code(code.trim()))
            }
        }
    }

    pub fn remove_discount(&mut self) -> CartResponse {
        debug!("remove_discount command");
        self.resolver.remove_discount(&mut self.cart);
        self.get_cart()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn get_cart(&self) -> CartResponse {
        CartResponse::from(&self.cart)
    }

    pub fn get_totals(&self) -> Totals {
        self.cart.totals()
    }

    /// Total units in the cart (the badge number).
    pub fn item_count(&self) -> i64 {
        self.cart.item_count()
    }

    pub fn phase(&self) -> CheckoutPhase {
        self.cart.phase()
    }

    /// Renders `amount` in the cart's currency.
    pub fn format_amount(&self, amount: Money) -> String {
        self.formatter.format(amount, self.cart.currency_code())
    }

    /// Shipping estimate for the current order. Doesn't change totals.
    pub fn shipping_quote(&self, weight: f64, distance: f64, express: bool) -> ApiResult<Money> {
        Ok(shipping_cost(weight, distance, express)?)
    }

    /// Monthly installment for the current cart total.
    pub fn installment_quote(&self, annual_rate_pct: f64, months: u32) -> ApiResult<Money> {
        Ok(installment_payment(self.cart.totals().total, annual_rate_pct, months)?)
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Finalizes the cart and hands the order to the submission service.
    ///
    /// ## Sequence
    /// 1. Validate (empty cart / total below minimum fail here, cart untouched)
    /// 2. Snapshot into an intent and clear the cart
    /// 3. Submit the stamped envelope
    ///
    /// If step 3 fails the cart stays empty and the error carries the intent
    /// so the caller can resubmit it.
    pub async fn checkout(&mut self) -> ApiResult<OrderReceipt> {
        debug!("checkout command");

        let intent = checkout_with_minimum(&mut self.cart, self.min_chargeable).map_err(|e| {
            info!(reason = %e, "Checkout blocked");
            ApiError::from(e)
        })?;

        let envelope = OrderEnvelope::new(intent);
        info!(
            intent_id = %envelope.intent_id,
            total = %envelope.intent.total(),
            lines = envelope.intent.lines.len(),
            discount = ?envelope.intent.discount_code,
            "Cart checked out"
        );

        match self.submission.submit(&envelope).await {
            Ok(receipt) => {
                info!(
                    intent_id = %receipt.intent_id,
                    order_number = %receipt.order_number,
                    "Order submitted"
                );
                Ok(receipt)
            }
            Err(e) => {
                warn!(intent_id = %envelope.intent_id, error = %e, "Order submission failed");
                Err(ApiError::submission_failed(&e, envelope.intent))
            }
        }
    }
}

impl std::fmt::Debug for CartSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartSession")
            .field("cart", &self.cart)
            .field("min_chargeable", &self.min_chargeable)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
