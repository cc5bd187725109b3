//! # storefront-session: Cart Controller for the Storefront
//!
//! Owns the live cart for one shopper and exposes the operations the UI
//! calls. Pricing lives in `storefront-core`; this crate adds configuration,
//! logging, boundary validation, error mapping and the order hand-off.
//!
//! ## Module Organization
//! ```text
//! storefront_session/
//! ├── lib.rs          ◄─── You are here (tracing setup & exports)
//! ├── session.rs      ◄─── CartSession: the commands
//! ├── config.rs       ◄─── StorefrontConfig (TOML + env)
//! ├── catalog.rs      ◄─── ProductCatalog trait + in-memory impl
//! ├── submission.rs   ◄─── OrderSubmission trait, envelopes, receipts
//! └── error.rs        ◄─── ApiError / ConfigError
//! ```
//!
//! ## Wiring
//! ```rust,no_run
//! use std::sync::Arc;
//! use storefront_session::{
//!     init_tracing, CartSession, InMemoryCatalog, InMemorySubmission, StorefrontConfig,
//! };
//!
//! # async fn run() -> Result<(), storefront_session::ApiError> {
//! init_tracing();
//!
//! let config = StorefrontConfig::load_or_default(None);
//! let catalog = Arc::new(InMemoryCatalog::default());
//! let orders = Arc::new(InMemorySubmission::new());
//!
//! let mut session = CartSession::new(&config, catalog, orders);
//! session.add_to_cart("1", Some(2))?;
//! session.apply_discount_code("SAVE10")?;
//! let _receipt = session.checkout().await?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod session;
pub mod submission;

use tracing_subscriber::EnvFilter;

pub use catalog::{InMemoryCatalog, ProductCatalog};
pub use config::StorefrontConfig;
pub use error::{ApiError, ApiResult, ConfigError, ErrorCode};
pub use session::{CartResponse, CartSession};
pub use submission::{
    InMemorySubmission, OrderEnvelope, OrderReceipt, OrderSubmission, SubmissionError,
};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,storefront=debug";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages everywhere
/// - `RUST_LOG=storefront=trace` - Trace for storefront crates only
/// - Default: [`DEFAULT_LOG_FILTER`]
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_err()
    {
        tracing::debug!("Tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_is_idempotent() {
        init_tracing();
        init_tracing();
    }
}
