use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{model::enrollment::EnrollmentDto, server::util::validate::CURRENCY_RE};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct InitializePaymentDto {
    /// Amount in major currency units, at least 100.
    #[validate(range(min = 100, message = "must be at least 100"))]
    pub amount: i64,
    /// Defaults to the signed in user's email.
    #[validate(length(min = 5, max = 60), email(message = "must be a valid email address"))]
    pub email: Option<String>,
    #[validate(regex(path = *CURRENCY_RE, message = "must be a three letter code"))]
    pub currency: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutDto {
    pub authorization_url: String,
    pub reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDto {
    pub id: i32,
    /// Null once the paying account has been deleted.
    pub user_id: Option<i32>,
    pub reference: String,
    pub amount: i64,
    pub currency: String,
    /// `pending`, `success` or `failed`
    pub status: String,
    pub payment_method: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentVerificationDto {
    pub payment: PaymentDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment: Option<EnrollmentDto>,
}
