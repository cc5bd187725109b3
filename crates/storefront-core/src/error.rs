//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CheckoutError    - Checkout preconditions not met                 │
//! │  ├── QuoteError       - Shipping/installment quote inputs rejected     │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  storefront-session errors (separate crate)                            │
//! │  └── ApiError         - What the UI layer sees (serialized)            │
//! │                                                                         │
//! │  Flow: CheckoutError / QuoteError / ValidationError → ApiError → UI    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! An unknown or ineligible discount code is a `None` resolution, not an
//! error value. Pricing never fails.

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Checkout Error
// =============================================================================

/// Reasons a cart cannot be checked out.
///
/// Both are recoverable: the shopper adds items (or paid items) and retries.
/// A failed checkout never mutates the cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// Checkout attempted with no lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// The computed total is below the minimum chargeable amount.
    ///
    /// ## When This Occurs
    /// ```text
    /// Cart: 1 × free sample ($0.00)
    ///      │
    ///      ▼
    /// total = $0.00 < $0.01
    ///      │
    ///      ▼
    /// InvalidTotal { total: $0.00, minimum: $0.01 }
    /// ```
    #[error("Invalid total amount: {total} is below the minimum of {minimum}")]
    InvalidTotal { total: Money, minimum: Money },
}

// =============================================================================
// Quote Error
// =============================================================================

/// Rejected inputs to the quote helpers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuoteError {
    #[error("Months must be greater than 0")]
    ZeroMonths,

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised at the boundary (the session layer) before anything reaches the
/// ledger, which itself accepts any input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. a currency code that is not three letters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

/// Convenience alias for checkout results.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_error_messages() {
        assert_eq!(CheckoutError::EmptyCart.to_string(), "Cart is empty");

        let err = CheckoutError::InvalidTotal {
            total: Money::zero(),
            minimum: Money::from_cents(1),
        };
        assert_eq!(
            err.to_string(),
            "Invalid total amount: $0.00 is below the minimum of $0.01"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "discount code".to_string(),
        };
        assert_eq!(err.to_string(), "discount code is required");

        let err = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: 999,
        };
        assert_eq!(err.to_string(), "quantity must be between 1 and 999");
    }
}
