//! # Order Submission
//!
//! Hand-off of finalized orders to whatever takes payment and fulfils them.
//!
//! ## Hand-off
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  checkout()                                                             │
//! │     │                                                                   │
//! │     ├── core checkout: validate, snapshot, clear cart                   │
//! │     │                                                                   │
//! │     ├── wrap: OrderEnvelope { intent_id (v4), created_at, intent }      │
//! │     │                                                                   │
//! │     └── OrderSubmission::submit(&envelope).await                        │
//! │             │                                                           │
//! │             ├── Ok(receipt)  → returned to the UI                       │
//! │             └── Err(e)       → ApiError SUBMISSION_FAILED + intent      │
//! │                                (cart stays cleared)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `intent_id` is stable for one envelope, so an implementation can use it as
//! an idempotency key when the caller resubmits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storefront_core::OrderIntent;
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

/// An order intent stamped for delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderEnvelope {
    pub intent_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub intent: OrderIntent,
}

impl OrderEnvelope {
    pub fn new(intent: OrderIntent) -> Self {
        OrderEnvelope {
            intent_id: Uuid::new_v4(),
            created_at: Utc::now(),
            intent,
        }
    }
}

/// Proof that the order service accepted an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub intent_id: Uuid,
    /// Order number assigned by the order service.
    pub order_number: String,
    pub accepted_at: DateTime<Utc>,
}

/// Transport or service failures. The session reports these verbatim and
/// never retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("Order service unavailable: {0}")]
    Unavailable(String),

    #[error("Order rejected: {0}")]
    Rejected(String),
}

/// Accepts finalized orders.
#[async_trait]
pub trait OrderSubmission: Send + Sync {
    async fn submit(&self, envelope: &OrderEnvelope) -> Result<OrderReceipt, SubmissionError>;
}

/// Keeps every accepted envelope in memory. Used for wiring and tests.
#[derive(Debug, Default)]
pub struct InMemorySubmission {
    accepted: Mutex<Vec<OrderEnvelope>>,
}

impl InMemorySubmission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Envelopes accepted so far, oldest first.
    pub async fn accepted(&self) -> Vec<OrderEnvelope> {
        self.accepted.lock().await.clone()
    }
}

#[async_trait]
impl OrderSubmission for InMemorySubmission {
    async fn submit(&self, envelope: &OrderEnvelope) -> Result<OrderReceipt, SubmissionError> {
        let mut accepted = self.accepted.lock().await;
        accepted.push(envelope.clone());

        Ok(OrderReceipt {
            intent_id: envelope.intent_id,
            order_number: format!("ORD-{:06}", accepted.len()),
            accepted_at: Utc::now(),
        })
    }
}
