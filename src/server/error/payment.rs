use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum PaymentError {
    /// Gateway answered but refused the request (4xx or `status: false`).
    ///
    /// Results in a 502 Bad Gateway response carrying the gateway's message.
    #[error("Payment gateway rejected the request: {0}")]
    GatewayRejected(String),

    /// Gateway could not be reached, timed out or kept failing with 5xx after retries.
    ///
    /// Results in a 503 Service Unavailable response.
    #[error("Payment gateway unavailable: {0}")]
    GatewayUnavailable(String),

    /// Webhook body did not match its `x-paystack-signature` header.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("Invalid webhook signature")]
    InvalidSignature,
}

/// Converts payment errors into HTTP responses.
///
/// # Returns
/// - 401 Unauthorized - For webhook signature mismatches
/// - 502 Bad Gateway - When the gateway rejected the request
/// - 503 Service Unavailable - When the gateway could not be reached
impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        tracing::warn!("{}", self);

        let (status, message) = match self {
            Self::GatewayRejected(msg) => (StatusCode::BAD_GATEWAY, msg),
            Self::GatewayUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Payment provider is temporarily unavailable, please try again".to_string(),
            ),
            Self::InvalidSignature => (StatusCode::UNAUTHORIZED, "Invalid signature".to_string()),
        };

        (status, Json(ErrorDto::new(message))).into_response()
    }
}
