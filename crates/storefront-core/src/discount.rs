//! # Discount Resolver
//!
//! Maps shopper-entered codes to discount rules and enforces eligibility.
//!
//! ## Resolution Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Shopper types " save10 " and presses Apply                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  normalize_code() ──► "SAVE10"                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DiscountCodeProvider::lookup("SAVE10")                                │
//! │       │                                                                 │
//! │       ├── unknown? ──────────────────────────► None                    │
//! │       │                                                                 │
//! │       ├── subtotal < min_purchase? ──────────► None (ineligible)       │
//! │       │                                                                 │
//! │       └── Some(rule) ──► replaces the applied rule on the cart         │
//! │                                                                         │
//! │  None leaves whatever was applied before untouched.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Swappable Catalog
//! The resolver never embeds the rule set; it asks an injected
//! [`DiscountCodeProvider`]. [`DiscountCatalog`] is the in-memory provider,
//! with [`DiscountCatalog::standard`] carrying the storefront's stock codes.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::{CartEvent, CartState};
use crate::money::Money;
use crate::pricing::subtotal;

// =============================================================================
// Discount Rule
// =============================================================================

/// How a rule reduces the subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum DiscountKind {
    /// Percentage of the subtotal, in basis points (1000 = 10%).
    Percentage { bps: u32 },
    /// Flat amount off, capped at the subtotal.
    Fixed { amount: Money },
}

/// A named, immutable discount.
///
/// `max_discount` is carried for display and for providers that want it, but
/// percentage discounts are not clamped to it; see
/// [`discount_amount`](crate::pricing::discount_amount).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DiscountRule {
    pub code: String,
    pub kind: DiscountKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_purchase: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_discount: Option<Money>,
}

impl DiscountRule {
    /// Whole-percent rule: `DiscountRule::percentage("SAVE10", 10)`.
    ///
    /// Percentages above 100 are clamped to 100.
    pub fn percentage(code: &str, percent: u32) -> Self {
        Self::percentage_bps(code, percent.min(100) * 100)
    }

    pub fn percentage_bps(code: &str, bps: u32) -> Self {
        DiscountRule {
            code: normalize_code(code),
            kind: DiscountKind::Percentage { bps },
            min_purchase: None,
            max_discount: None,
        }
    }

    pub fn fixed(code: &str, amount: Money) -> Self {
        DiscountRule {
            code: normalize_code(code),
            kind: DiscountKind::Fixed { amount },
            min_purchase: None,
            max_discount: None,
        }
    }

    pub fn with_min_purchase(mut self, min_purchase: Money) -> Self {
        self.min_purchase = Some(min_purchase);
        self
    }

    pub fn with_max_discount(mut self, max_discount: Money) -> Self {
        self.max_discount = Some(max_discount);
        self
    }

    /// Whether a cart with this subtotal may use the rule.
    pub fn is_eligible(&self, subtotal: Money) -> bool {
        match self.min_purchase {
            Some(min) => subtotal >= min,
            None => true,
        }
    }
}

/// Canonical form of a shopper-entered code: trimmed and uppercased.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

// =============================================================================
// Provider
// =============================================================================

/// Source of discount rules.
///
/// `lookup` receives an already-normalized code and must not apply
/// eligibility rules itself; the resolver does that.
pub trait DiscountCodeProvider: Send + Sync {
    fn lookup(&self, code: &str) -> Option<DiscountRule>;
}

/// Fixed in-memory rule set keyed by normalized code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscountCatalog {
    rules: BTreeMap<String, DiscountRule>,
}

impl DiscountCatalog {
    /// Builds a catalog; later rules with the same code win.
    pub fn new(rules: impl IntoIterator<Item = DiscountRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|mut rule| {
                rule.code = normalize_code(&rule.code);
                (rule.code.clone(), rule)
            })
            .collect();
        DiscountCatalog { rules }
    }

    /// The storefront's stock codes.
    ///
    /// | Code   | Kind       | Value | Min purchase | Max discount |
    /// |--------|------------|-------|--------------|--------------|
    /// | SAVE10 | percentage | 10%   |              |              |
    /// | SAVE20 | percentage | 20%   | $100         |              |
    /// | FLAT50 | fixed      | $50   | $200         |              |
    /// | VIP30  | percentage | 30%   | $500         | $150         |
    pub fn standard() -> Self {
        DiscountCatalog::new([
            DiscountRule::percentage("SAVE10", 10),
            DiscountRule::percentage("SAVE20", 20).with_min_purchase(Money::from_major(100)),
            DiscountRule::fixed("FLAT50", Money::from_major(50))
                .with_min_purchase(Money::from_major(200)),
            DiscountRule::percentage("VIP30", 30)
                .with_min_purchase(Money::from_major(500))
                .with_max_discount(Money::from_major(150)),
        ])
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Codes in sorted order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }
}

impl DiscountCodeProvider for DiscountCatalog {
    fn lookup(&self, code: &str) -> Option<DiscountRule> {
        self.rules.get(code).cloned()
    }
}

// =============================================================================
// Resolver
// =============================================================================

/// Resolves codes against a provider and installs them on a cart.
#[derive(Clone)]
pub struct DiscountResolver {
    provider: Arc<dyn DiscountCodeProvider>,
}

impl DiscountResolver {
    pub fn new(provider: Arc<dyn DiscountCodeProvider>) -> Self {
        DiscountResolver { provider }
    }

    /// Resolver over [`DiscountCatalog::standard`].
    pub fn standard() -> Self {
        Self::new(Arc::new(DiscountCatalog::standard()))
    }

    /// Looks up `code` and checks it against `subtotal`.
    ///
    /// Returns `None` for empty, unknown or ineligible codes. Never fails.
    ///
    /// ```rust
    /// use storefront_core::discount::DiscountResolver;
    /// use storefront_core::money::Money;
    ///
    /// let resolver = DiscountResolver::standard();
    /// assert!(resolver.resolve("save10", Money::from_major(20)).is_some());
    /// assert!(resolver.resolve("FLAT50", Money::from_major(100)).is_none());
    /// assert!(resolver.resolve("UNKNOWN", Money::from_major(1000)).is_none());
    /// ```
    pub fn resolve(&self, code: &str, subtotal: Money) -> Option<DiscountRule> {
        let code = normalize_code(code);
        if code.is_empty() {
            return None;
        }

        self.provider
            .lookup(&code)
            .filter(|rule| rule.is_eligible(subtotal))
    }

    /// Resolves `code` against the cart's current subtotal and, on success,
    /// replaces the applied rule. On `None` the cart is untouched.
    pub fn apply(&self, state: &mut CartState, code: &str) -> Option<DiscountRule> {
        let event = self.apply_event(state, code)?;
        state.apply(&event);
        state.applied_discount().cloned()
    }

    /// Reducer form of [`apply`](Self::apply): the event to fold into the
    /// cart, if the code resolves.
    pub fn apply_event(&self, state: &CartState, code: &str) -> Option<CartEvent> {
        self.resolve(code, subtotal(state.lines()))
            .map(|rule| CartEvent::DiscountApplied { rule })
    }

    /// Clears the applied rule without touching lines.
    pub fn remove_discount(&self, state: &mut CartState) {
        state.remove_discount();
    }
}

impl std::fmt::Debug for DiscountResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscountResolver").finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;

    fn cart_with_subtotal(cents: i64) -> CartState {
        let mut cart = CartState::default();
        cart.add_product(&Product::new("1", "Product 1", Money::from_cents(cents), 10), 1);
        cart
    }

    #[test]
    fn test_resolve_known_code() {
        let resolver = DiscountResolver::standard();
        let rule = resolver.resolve("SAVE10", Money::from_major(100)).unwrap();

        assert_eq!(rule.code, "SAVE10");
        assert_eq!(rule.kind, DiscountKind::Percentage { bps: 1000 });
        assert_eq!(rule.min_purchase, None);
        assert_eq!(rule.max_discount, None);
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let resolver = DiscountResolver::standard();
        assert!(resolver.resolve("save10", Money::zero()).is_some());
        assert!(resolver.resolve("  Save10 ", Money::zero()).is_some());
    }

    #[test]
    fn test_resolve_unknown_is_none_for_any_subtotal() {
        let resolver = DiscountResolver::standard();
        for cents in [0, 1, 10_000, 1_000_000_000] {
            assert!(resolver.resolve("UNKNOWN", Money::from_cents(cents)).is_none());
        }
        assert!(resolver.resolve("", Money::from_major(100)).is_none());
        assert!(resolver.resolve("   ", Money::from_major(100)).is_none());
    }

    #[test]
    fn test_resolve_enforces_min_purchase() {
        let resolver = DiscountResolver::standard();

        assert!(resolver.resolve("SAVE20", Money::from_major(50)).is_none());
        // boundary: exactly the minimum is eligible
        assert!(resolver.resolve("SAVE20", Money::from_major(100)).is_some());
        assert!(resolver.resolve("FLAT50", Money::from_cents(19_999)).is_none());
        assert!(resolver.resolve("FLAT50", Money::from_major(200)).is_some());
    }

    #[test]
    fn test_apply_replaces_previous_rule() {
        let resolver = DiscountResolver::standard();
        let mut cart = cart_with_subtotal(20_000);

        resolver.apply(&mut cart, "SAVE10").unwrap();
        let applied = resolver.apply(&mut cart, "FLAT50").unwrap();

        assert_eq!(applied.code, "FLAT50");
        assert_eq!(cart.applied_discount().map(|r| r.code.as_str()), Some("FLAT50"));
    }

    #[test]
    fn test_failed_apply_leaves_previous_rule() {
        let resolver = DiscountResolver::standard();
        let mut cart = cart_with_subtotal(10_000);

        resolver.apply(&mut cart, "SAVE10").unwrap();
        let before = cart.clone();

        assert!(resolver.apply(&mut cart, "FLAT50").is_none());
        assert!(resolver.apply(&mut cart, "NOPE").is_none());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_failed_apply_on_cart_without_discount() {
        let resolver = DiscountResolver::standard();
        let mut cart = cart_with_subtotal(10_000);

        assert!(resolver.apply(&mut cart, "FLAT50").is_none());
        assert!(cart.applied_discount().is_none());
    }

    #[test]
    fn test_apply_event_matches_apply() {
        let resolver = DiscountResolver::standard();
        let cart = cart_with_subtotal(60_000);

        let event = resolver.apply_event(&cart, "vip30").unwrap();
        let reduced = crate::cart::reduce(cart.clone(), event);

        let mut applied = cart;
        resolver.apply(&mut applied, "vip30");
        assert_eq!(reduced, applied);
    }

    #[test]
    fn test_remove_discount() {
        let resolver = DiscountResolver::standard();
        let mut cart = cart_with_subtotal(1_000);
        resolver.apply(&mut cart, "SAVE10");

        resolver.remove_discount(&mut cart);

        assert!(cart.applied_discount().is_none());
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_custom_provider_is_swappable() {
        struct OnlyWelcome;
        impl DiscountCodeProvider for OnlyWelcome {
            fn lookup(&self, code: &str) -> Option<DiscountRule> {
                (code == "WELCOME").then(|| DiscountRule::fixed("WELCOME", Money::from_major(5)))
            }
        }

        let resolver = DiscountResolver::new(Arc::new(OnlyWelcome));
        assert!(resolver.resolve("welcome", Money::zero()).is_some());
        assert!(resolver.resolve("SAVE10", Money::from_major(100)).is_none());
    }

    #[test]
    fn test_catalog_normalizes_codes() {
        let catalog = DiscountCatalog::new([DiscountRule {
            code: " spring ".to_string(),
            kind: DiscountKind::Percentage { bps: 500 },
            min_purchase: None,
            max_discount: None,
        }]);

        assert_eq!(catalog.codes().collect::<Vec<_>>(), vec!["SPRING"]);
        assert!(catalog.lookup("SPRING").is_some());
    }

    #[test]
    fn test_standard_catalog_contents() {
        let catalog = DiscountCatalog::standard();
        assert_eq!(catalog.len(), 4);
        assert_eq!(
            catalog.codes().collect::<Vec<_>>(),
            vec!["FLAT50", "SAVE10", "SAVE20", "VIP30"]
        );

        let vip = catalog.lookup("VIP30").unwrap();
        assert_eq!(vip.min_purchase, Some(Money::from_major(500)));
        assert_eq!(vip.max_discount, Some(Money::from_major(150)));
    }

    #[test]
    fn test_percentage_clamps_to_whole() {
        let rule = DiscountRule::percentage("ALL", 250);
        assert_eq!(rule.kind, DiscountKind::Percentage { bps: 10_000 });

        let rule = DiscountRule::percentage("HUGE", u32::MAX);
        assert_eq!(rule.kind, DiscountKind::Percentage { bps: 10_000 });
    }

    #[test]
    fn test_rule_wire_format() {
        let rule = DiscountRule::fixed("FLAT50", Money::from_major(50))
            .with_min_purchase(Money::from_major(200));
        let json = serde_json::to_value(&rule).unwrap();

        assert_eq!(json["code"], "FLAT50");
        assert_eq!(json["kind"]["type"], "fixed");
        assert_eq!(json["kind"]["amount"], 5000);
        assert_eq!(json["minPurchase"], 20000);
        assert!(json.get("maxDiscount").is_none());
    }
}
