//! Payment domain models and parameters.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::PaymentStatus;
use sea_orm::ActiveEnum;
use serde_json::Value;
use validator::Validate;

use crate::{
    model::payment::{CheckoutDto, InitializePaymentDto, PaymentDto},
    server::{
        error::{internal::InternalError, AppError},
        gateway::{Checkout, GatewayStatus, Verification},
        util::validate,
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: i32,
    /// `None` once the paying account has been deleted.
    pub user_id: Option<i32>,
    pub reference: String,
    pub amount: i64,
    pub currency: String,
    pub status: PaymentStatus,
    pub payment_method: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    /// Converts an entity, parsing the stored metadata JSON.
    ///
    /// # Returns
    /// - `Ok(Payment)` - Converted payment
    /// - `Err(AppError::InternalErr(StoredJson))` - Stored metadata is not valid JSON
    pub fn from_entity(entity: entity::payment::Model) -> Result<Self, AppError> {
        let metadata = entity
            .metadata
            .as_deref()
            .map(serde_json::from_str::<Value>)
            .transpose()
            .map_err(|source| InternalError::StoredJson {
                context: format!("payment {} metadata", entity.id),
                source,
            })?;

        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            reference: entity.reference,
            amount: entity.amount,
            currency: entity.currency,
            status: entity.status,
            payment_method: entity.payment_method,
            paid_at: entity.paid_at,
            metadata,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self) -> PaymentDto {
        PaymentDto {
            id: self.id,
            user_id: self.user_id,
            reference: self.reference,
            amount: self.amount,
            currency: self.currency,
            status: self.status.to_value(),
            payment_method: self.payment_method,
            paid_at: self.paid_at,
            metadata: self.metadata,
            created_at: self.created_at,
        }
    }
}

/// Validated standalone checkout request.
#[derive(Debug, Clone)]
pub struct InitializePaymentParam {
    pub amount: i64,
    pub email: Option<String>,
    pub currency: Option<String>,
    pub metadata: Value,
}

impl InitializePaymentParam {
    pub fn from_dto(dto: InitializePaymentDto) -> Result<Self, AppError> {
        dto.validate()?;

        let metadata = dto.metadata.unwrap_or(Value::Null);
        if !(metadata.is_object() || metadata.is_null()) {
            return Err(AppError::BadRequest("metadata must be an object".to_string()));
        }

        Ok(Self {
            amount: dto.amount,
            email: dto.email.map(|e| validate::email(&e)).transpose()?,
            currency: dto.currency.map(|c| c.trim().to_ascii_uppercase()),
            metadata,
        })
    }
}

/// Row values for a freshly opened checkout.
#[derive(Debug, Clone)]
pub struct CreatePaymentParam {
    pub user_id: i32,
    pub reference: String,
    pub amount: i64,
    pub currency: String,
    pub metadata: Value,
    pub raw_response: Value,
}

/// Terminal values written when a payment leaves `pending`.
#[derive(Debug, Clone)]
pub struct SettlePaymentParam {
    pub status: PaymentStatus,
    pub payment_method: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub metadata: Option<Value>,
    pub raw_response: Value,
}

impl SettlePaymentParam {
    /// Maps a verification to payment columns. `None` while the gateway is still pending.
    pub fn from_verification(verification: &Verification) -> Option<Self> {
        let status = match verification.status {
            GatewayStatus::Success => PaymentStatus::Success,
            GatewayStatus::Failed => PaymentStatus::Failed,
            GatewayStatus::Pending => return None,
        };

        Some(Self {
            status,
            payment_method: verification.channel.clone(),
            paid_at: verification.paid_at,
            metadata: verification.metadata.clone(),
            raw_response: verification.raw.clone(),
        })
    }
}

impl From<Checkout> for CheckoutDto {
    fn from(checkout: Checkout) -> Self {
        CheckoutDto {
            authorization_url: checkout.authorization_url,
            reference: checkout.reference,
            access_code: checkout.access_code,
        }
    }
}
