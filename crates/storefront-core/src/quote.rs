//! # Quotes
//!
//! Estimates shown next to the cart that never feed into its totals:
//! shipping cost, bulk per-unit pricing and installment payments.
//!
//! ## Note
//! These inputs (weight, distance, interest rates) are measurements, not
//! money, so they arrive as `f64`. Each result is rounded to the cent exactly
//! once, on the way out.

use crate::error::QuoteError;
use crate::money::Money;

/// Flat part of every shipment, in cents.
const SHIPPING_BASE_CENTS: f64 = 500.0;
/// Per weight unit, in cents.
const SHIPPING_WEIGHT_CENTS: f64 = 50.0;
/// Per distance unit, in cents.
const SHIPPING_DISTANCE_CENTS: f64 = 1.0;
const EXPRESS_MULTIPLIER: f64 = 2.0;

/// Bulk tiers as (minimum quantity, price in bps of the unit price).
/// Checked top-down; first match wins.
const BULK_TIERS: [(i64, u32); 3] = [(100, 8_500), (50, 9_000), (20, 9_500)];

fn non_negative(field: &'static str, value: f64) -> Result<f64, QuoteError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(QuoteError::Negative { field, value })
    }
}

fn cents_from_f64(cents: f64) -> Money {
    Money::from_cents(cents.round() as i64)
}

/// Shipping estimate: $5.00 + $0.50 per weight unit + $0.01 per distance
/// unit, doubled for express.
///
/// ```rust
/// use storefront_core::quote::shipping_cost;
///
/// // 5 + 10 × 0.5 + 100 × 0.01 = $11.00
/// assert_eq!(shipping_cost(10.0, 100.0, false).unwrap().cents(), 1100);
/// assert_eq!(shipping_cost(10.0, 100.0, true).unwrap().cents(), 2200);
/// ```
pub fn shipping_cost(weight: f64, distance: f64, express: bool) -> Result<Money, QuoteError> {
    let weight = non_negative("weight", weight)?;
    let distance = non_negative("distance", distance)?;

    let mut cost =
        SHIPPING_BASE_CENTS + weight * SHIPPING_WEIGHT_CENTS + distance * SHIPPING_DISTANCE_CENTS;
    if express {
        cost *= EXPRESS_MULTIPLIER;
    }

    Ok(cents_from_f64(cost))
}

/// Per-unit price after the bulk tier for `quantity`.
///
/// | Quantity | Price  |
/// |----------|--------|
/// | 100+     | 85%    |
/// | 50-99    | 90%    |
/// | 20-49    | 95%    |
/// | < 20     | 100%   |
pub fn bulk_unit_price(quantity: i64, unit_price: Money) -> Money {
    BULK_TIERS
        .iter()
        .find(|(min_qty, _)| quantity >= *min_qty)
        .map(|(_, bps)| unit_price.percentage(*bps))
        .unwrap_or(unit_price)
}

/// Monthly payment for `principal` repaid over `months` at `annual_rate_pct`
/// (e.g. `12.0` for 12% a year), using standard amortization.
///
/// A zero rate splits the principal evenly.
///
/// ```rust
/// use storefront_core::money::Money;
/// use storefront_core::quote::installment_payment;
///
/// let payment = installment_payment(Money::from_major(1200), 0.0, 12).unwrap();
/// assert_eq!(payment.cents(), 10_000);
///
/// assert!(installment_payment(Money::from_major(1200), 5.0, 0).is_err());
/// ```
pub fn installment_payment(
    principal: Money,
    annual_rate_pct: f64,
    months: u32,
) -> Result<Money, QuoteError> {
    if months == 0 {
        return Err(QuoteError::ZeroMonths);
    }
    let annual_rate_pct = non_negative("annual rate", annual_rate_pct)?;

    let principal = principal.cents() as f64;
    let n = months as f64;

    if annual_rate_pct == 0.0 {
        return Ok(cents_from_f64(principal / n));
    }

    let r = annual_rate_pct / 12.0 / 100.0;
    let growth = (1.0 + r).powf(n);
    Ok(cents_from_f64(principal * (r * growth) / (growth - 1.0)))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipping_basic() {
        let cost = shipping_cost(10.0, 100.0, false).unwrap();
        assert!(cost.is_positive());
        assert_eq!(cost.cents(), 1100);
    }

    #[test]
    fn test_shipping_express_doubles() {
        let regular = shipping_cost(2.5, 333.0, false).unwrap();
        let express = shipping_cost(2.5, 333.0, true).unwrap();
        assert!(express > regular);
        assert_eq!(express.cents(), regular.cents() * 2);
    }

    #[test]
    fn test_shipping_rounds_to_cent() {
        // 500 + 0.01 × 50 + 0.5 × 1 = 501.0
        assert_eq!(shipping_cost(0.01, 0.5, false).unwrap().cents(), 501);
        // 500 + 0 + 0.4 = 500.4 → 500
        assert_eq!(shipping_cost(0.0, 0.4, false).unwrap().cents(), 500);
    }

    #[test]
    fn test_shipping_rejects_negative_inputs() {
        assert_eq!(
            shipping_cost(-1.0, 10.0, false),
            Err(QuoteError::Negative {
                field: "weight",
                value: -1.0
            })
        );
        assert!(shipping_cost(1.0, f64::NAN, false).is_err());
    }

    #[test]
    fn test_bulk_tiers() {
        let ten = Money::from_major(10);
        assert_eq!(bulk_unit_price(100, ten).cents(), 850);
        assert_eq!(bulk_unit_price(250, ten).cents(), 850);
        assert_eq!(bulk_unit_price(50, ten).cents(), 900);
        assert_eq!(bulk_unit_price(20, ten).cents(), 950);
        assert_eq!(bulk_unit_price(19, ten), ten);
        assert_eq!(bulk_unit_price(10, ten), ten);
    }

    #[test]
    fn test_installment_zero_rate() {
        let payment = installment_payment(Money::from_major(1000), 0.0, 3).unwrap();
        // 100000 / 3 = 33333.33 → 33333
        assert_eq!(payment.cents(), 33_333);
    }

    #[test]
    fn test_installment_amortized() {
        // $10,000 at 12%/yr over 12 months ≈ $888.49
        let payment = installment_payment(Money::from_major(10_000), 12.0, 12).unwrap();
        assert_eq!(payment.cents(), 88_849);
    }

    #[test]
    fn test_installment_rejects_zero_months() {
        assert_eq!(
            installment_payment(Money::from_major(100), 5.0, 0),
            Err(QuoteError::ZeroMonths)
        );
    }
}
