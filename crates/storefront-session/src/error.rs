//! # API Error Type
//!
//! Unified error type for cart session commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  UI                          Cart session                               │
//! │  ──                          ────────────                               │
//! │                                                                         │
//! │  session.apply_discount_code("FLAT50")                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command                                                         │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │  Bad input? ───── ValidationError ─────────────┐                │  │
//! │  │         │                                      ▼                │  │
//! │  │  Code not usable? ── resolver → None ──────► ApiError ─────────►│  │
//! │  │         │                                      ▲                │  │
//! │  │  Checkout blocked? ── CheckoutError ───────────┘                │  │
//! │  │         │                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "INVALID_DISCOUNT_CODE",                                     │
//! │    "message": "Discount code FLAT50 is invalid or not applicable" }     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No `ApiError` is fatal. Every command that fails leaves the cart as it was,
//! except a failed order submission, which happens after the cart was cleared.

use std::path::PathBuf;

use serde::Serialize;
use storefront_core::{CheckoutError, OrderIntent, QuoteError, ValidationError};
use thiserror::Error;

use crate::submission::SubmissionError;

/// API error returned from session commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "EMPTY_CART",
///   "message": "Cart is empty"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// The order that could not be handed off. Only set for
    /// `SUBMISSION_FAILED`; resubmit it instead of rebuilding the cart.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<Box<OrderIntent>>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product not in the catalog
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Unknown code, or the cart does not meet its minimum purchase
    InvalidDiscountCode,

    /// Checkout with no lines
    EmptyCart,

    /// Checkout total below the minimum chargeable amount
    InvalidTotal,

    /// Order submission service rejected or failed the hand-off
    SubmissionFailed,

    /// Quote inputs rejected
    InvalidQuote,

    /// Configuration could not be loaded
    ConfigError,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            intent: None,
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an invalid discount code error.
    pub fn invalid_discount_code(code: &str) -> Self {
        ApiError::new(
            ErrorCode::InvalidDiscountCode,
            format!("Discount code {} is invalid or not applicable", code),
        )
    }

    /// Creates a submission failure carrying the order that was not delivered.
    pub fn submission_failed(err: &SubmissionError, intent: OrderIntent) -> Self {
        ApiError {
            code: ErrorCode::SubmissionFailed,
            message: format!("Order submission failed: {}", err),
            intent: Some(Box::new(intent)),
        }
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        let code = match err {
            CheckoutError::EmptyCart => ErrorCode::EmptyCart,
            CheckoutError::InvalidTotal { .. } => ErrorCode::InvalidTotal,
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<QuoteError> for ApiError {
    fn from(err: QuoteError) -> Self {
        ApiError::new(ErrorCode::InvalidQuote, err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        tracing::error!("Configuration error: {}", err);
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Convenience alias for session command results.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Config Error
// =============================================================================

/// Failures while loading `storefront.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ValidationError> for ConfigError {
    fn from(err: ValidationError) -> Self {
        ConfigError::Invalid(err.to_string())
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::Money;

    #[test]
    fn test_checkout_errors_map_to_codes() {
        let err: ApiError = CheckoutError::EmptyCart.into();
        assert_eq!(err.code, ErrorCode::EmptyCart);
        assert_eq!(err.message, "Cart is empty");

        let err: ApiError = CheckoutError::InvalidTotal {
            total: Money::zero(),
            minimum: Money::from_cents(1),
        }
        .into();
        assert_eq!(err.code, ErrorCode::InvalidTotal);
    }

    #[test]
    fn test_validation_and_quote_errors_map_to_codes() {
        let err: ApiError = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "quantity must be positive");

        let err: ApiError = QuoteError::ZeroMonths.into();
        assert_eq!(err.code, ErrorCode::InvalidQuote);
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::invalid_discount_code("FLAT50");
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["code"], "INVALID_DISCOUNT_CODE");
        assert_eq!(
            json["message"],
            "Discount code FLAT50 is invalid or not applicable"
        );
        assert!(json.get("intent").is_none());
    }

    #[test]
    fn test_display() {
        let err = ApiError::not_found("Product", "42");
        assert_eq!(err.to_string(), "[NotFound] Product not found: 42");
    }

    #[test]
    fn test_config_error_from_validation() {
        let err: ConfigError = ValidationError::InvalidFormat {
            field: "currency code".to_string(),
            reason: "must be three uppercase letters".to_string(),
        }
        .into();
        assert!(err.to_string().starts_with("Invalid configuration:"));
    }
}
