//! # Domain Types
//!
//! Shared value types for the storefront cart engine.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    Product      │   │    TaxRate      │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  id             │   │  bps (u32)      │                             │
//! │  │  name           │   │  1000 = 10%     │                             │
//! │  │  unit_price     │   └─────────────────┘                             │
//! │  │  stock          │                                                    │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  Product is what the catalog hands over; the cart copies what it       │
//! │  needs (id, name, price) into a CartLine at add time.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1000 bps = 10% (the storefront's default rate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (e.g. `8.25`).
    ///
    /// Negative inputs saturate to zero.
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round().max(0.0) as u32)
    }

    /// Creates a tax rate from a fraction (e.g. `0.1` for 10%).
    pub fn from_fraction(fraction: f64) -> Self {
        Self::from_percentage(fraction * 100.0)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    /// 10%, the rate the storefront prices with unless configured otherwise.
    fn default() -> Self {
        TaxRate(crate::DEFAULT_TAX_RATE_BPS)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product as handed to the cart.
///
/// The catalog owns this record; the engine never re-validates `stock` and
/// never reads the price again after the product is added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Current catalog price in cents.
    pub unit_price: Money,
    pub stock: i64,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, unit_price: Money, stock: i64) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            unit_price,
            stock,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
