//! Payment gateway integration.
//!
//! `PaymentGateway` is the seam between the enrollment lifecycle and the third-party payment
//! provider. `PaystackGateway` talks to the Paystack REST API; tests substitute `FakeGateway`.

pub mod paystack;


use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::server::error::payment::PaymentError;

/// Parameters for opening a checkout session.
#[derive(Debug, Clone)]
pub struct InitializeRequest {
    /// Amount in major currency units. Converted to minor units by the gateway adapter.
    pub amount: i64,
    pub email: String,
    pub currency: String,
    /// Opaque metadata echoed back on verification and webhooks, carries `course_id`.
    pub metadata: Value,
}

/// Checkout session returned by the gateway.
#[derive(Debug, Clone)]
pub struct Checkout {
    pub authorization_url: String,
    pub reference: String,
    pub access_code: Option<String>,
    /// Full gateway response for auditing.
    pub raw: Value,
}

/// Gateway view of a transaction, collapsed to what the enrollment state machine needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayStatus {
    Success,
    /// Still in flight (`ongoing`, `pending`, `processing`, `queued`).
    Pending,
    /// Any terminal non-success (`failed`, `abandoned`, `reversed`, ...).
    Failed,
}

impl GatewayStatus {
    pub fn from_gateway(status: &str) -> Self {
        match status {
            "success" => Self::Success,
            "ongoing" | "pending" | "processing" | "queued" => Self::Pending,
            _ => Self::Failed,
        }
    }
}

/// Result of verifying a transaction reference.
#[derive(Debug, Clone)]
pub struct Verification {
    pub reference: String,
    pub status: GatewayStatus,
    /// Payment channel reported by the gateway (`card`, `bank`, ...).
    pub channel: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub metadata: Option<Value>,
    pub raw: Value,
}

impl Verification {
    /// Builds a verification from a transaction object as found in verify responses. A
    /// missing `status` reads as failed.
    pub fn from_transaction(reference: &str, data: &Value, raw: Value) -> Self {
        Self::parse(reference, data, raw, GatewayStatus::Failed)
    }

    /// Builds a verification from the `data` of a `charge.success` webhook event. The event
    /// type already reports success, so a missing `status` reads as success.
    pub fn from_charge_success(reference: &str, data: &Value, raw: Value) -> Self {
        Self::parse(reference, data, raw, GatewayStatus::Success)
    }

    fn parse(reference: &str, data: &Value, raw: Value, missing_status: GatewayStatus) -> Self {
        let status = data
            .get("status")
            .and_then(Value::as_str)
            .map(GatewayStatus::from_gateway)
            .unwrap_or(missing_status);
        let channel = data
            .get("channel")
            .and_then(Value::as_str)
            .map(str::to_string);
        let paid_at = data
            .get("paid_at")
            .or_else(|| data.get("paidAt"))
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc));
        let metadata = data
            .get("metadata")
            .filter(|m| m.is_object())
            .cloned();

        Self {
            reference: reference.to_string(),
            status,
            channel,
            paid_at,
            metadata,
            raw,
        }
    }
}

/// Third-party payment provider.
///
/// Implementations map transport failures to `PaymentError::GatewayUnavailable` and explicit
/// refusals to `PaymentError::GatewayRejected`.
#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Opens a checkout session and returns the URL the payer is redirected to.
    async fn initialize(&self, request: InitializeRequest) -> Result<Checkout, PaymentError>;

    /// Looks up the current status of a transaction.
    async fn verify(&self, reference: &str) -> Result<Verification, PaymentError>;
}
