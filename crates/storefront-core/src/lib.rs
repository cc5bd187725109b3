//! # storefront-core: Cart Pricing for the Storefront
//!
//! Pure cart, discount and pricing logic. No I/O, no clock, no logging:
//! everything here is a function of its inputs.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Storefront Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront UI                                │   │
//! │  │    Product grid ──► Cart drawer ──► Discount field ──► Pay     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 storefront-session                              │   │
//! │  │    add_to_cart, apply_discount_code, checkout, config, logs    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────┐       │   │
//! │  │   │   cart   │  │ discount │  │ pricing  │  │ checkout │       │   │
//! │  │   │ CartState│  │ Resolver │  │  Totals  │  │  Intent  │       │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────┘       │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────┐       │   │
//! │  │   │  money   │  │  quote   │  │  format  │  │validation│       │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────┘       │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO LOGGING • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cart`] - Cart ledger (`CartState`) and its event reducer
//! - [`discount`] - Discount rules, code lookup and application
//! - [`pricing`] - Subtotal, discount, tax and total derivation
//! - [`checkout`] - Checkout validation and order intents
//! - [`money`] - Integer money (cents)
//! - [`types`] - Tax rate and product types
//! - [`quote`] - Shipping, bulk and installment estimates
//! - [`format`] - Currency display
//! - [`validation`] - Boundary input checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{checkout, CartState, DiscountResolver, Money, TaxRate};
//!
//! let resolver = DiscountResolver::standard();
//! let mut cart = CartState::new("USD", TaxRate::from_bps(1000));
//!
//! cart.add_item("1", Money::from_major(10), "Product 1", 2);
//! resolver.apply(&mut cart, "save10");
//!
//! let totals = cart.totals();
//! assert_eq!(totals.discount_amount.cents(), 200);
//! assert_eq!(totals.total.cents(), 1980);
//!
//! let intent = checkout::checkout(&mut cart).unwrap();
//! assert_eq!(intent.total().cents(), 1980);
//! assert!(cart.is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod discount;
pub mod error;
pub mod format;
pub mod money;
pub mod pricing;
pub mod quote;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports
// =============================================================================

pub use cart::{reduce, CartEvent, CartLine, CartState};
pub use checkout::{CheckoutPhase, OrderIntent, MIN_CHARGEABLE_CENTS};
pub use discount::{
    DiscountCatalog, DiscountCodeProvider, DiscountKind, DiscountResolver, DiscountRule,
};
pub use error::{CheckoutError, CheckoutResult, QuoteError, ValidationError};
pub use format::{CurrencyFormatter, StandardFormatter};
pub use money::Money;
pub use pricing::Totals;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency a cart uses when none is configured.
pub const DEFAULT_CURRENCY_CODE: &str = "USD";

/// Tax rate a cart uses when none is configured: 10%.
pub const DEFAULT_TAX_RATE_BPS: u32 = 1000;

/// Maximum quantity of a single product per command.
///
/// Guards against typos like 1000 for 10.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Longest discount code accepted from a shopper.
pub const MAX_DISCOUNT_CODE_LEN: usize = 32;
