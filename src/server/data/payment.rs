//! Payment data repository.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::PaymentStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::{
    error::AppError,
    model::payment::{CreatePaymentParam, Payment, SettlePaymentParam},
};

pub struct PaymentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PaymentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Records a freshly opened checkout as a pending payment.
    ///
    /// # Returns
    /// - `Ok(Payment)` - The created payment
    /// - `Err(AppError)` - Insert failed or stored JSON could not be read back
    pub async fn create(&self, param: CreatePaymentParam) -> Result<Payment, AppError> {
        let now = Utc::now();
        let metadata = (!param.metadata.is_null()).then(|| param.metadata.to_string());

        let entity = entity::payment::ActiveModel {
            user_id: ActiveValue::Set(Some(param.user_id)),
            reference: ActiveValue::Set(param.reference),
            amount: ActiveValue::Set(param.amount),
            currency: ActiveValue::Set(param.currency),
            status: ActiveValue::Set(PaymentStatus::Pending),
            payment_method: ActiveValue::Set(None),
            paid_at: ActiveValue::Set(None),
            raw_response: ActiveValue::Set(Some(param.raw_response.to_string())),
            metadata: ActiveValue::Set(metadata),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Payment::from_entity(entity)
    }

    pub async fn find_by_reference(&self, reference: &str) -> Result<Option<Payment>, AppError> {
        let entity = entity::prelude::Payment::find()
            .filter(entity::payment::Column::Reference.eq(reference))
            .one(self.db)
            .await?;

        entity.map(Payment::from_entity).transpose()
    }

    /// Writes the terminal state of a pending payment.
    ///
    /// Metadata from the gateway replaces the stored metadata only when present.
    ///
    /// # Returns
    /// - `Ok(true)` - This call settled the payment
    /// - `Ok(false)` - The payment was already settled (or does not exist)
    pub async fn settle(&self, reference: &str, param: SettlePaymentParam) -> Result<bool, DbErr> {
        let mut changes = entity::payment::ActiveModel {
            status: ActiveValue::Set(param.status),
            payment_method: ActiveValue::Set(param.payment_method),
            paid_at: ActiveValue::Set(param.paid_at),
            raw_response: ActiveValue::Set(Some(param.raw_response.to_string())),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        };
        if let Some(metadata) = param.metadata {
            changes.metadata = ActiveValue::Set(Some(metadata.to_string()));
        }

        let result = entity::prelude::Payment::update_many()
            .set(changes)
            .filter(entity::payment::Column::Reference.eq(reference))
            .filter(entity::payment::Column::Status.eq(PaymentStatus::Pending))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Gets a user's payments, newest first.
    pub async fn get_by_user(&self, user_id: i32) -> Result<Vec<Payment>, AppError> {
        let entities = entity::prelude::Payment::find()
            .filter(entity::payment::Column::UserId.eq(user_id))
            .order_by_desc(entity::payment::Column::CreatedAt)
            .order_by_desc(entity::payment::Column::Id)
            .all(self.db)
            .await?;

        entities.into_iter().map(Payment::from_entity).collect()
    }

    /// Pending payments last touched before `cutoff`.
    pub async fn get_stale_pending(&self, cutoff: DateTime<Utc>) -> Result<Vec<Payment>, AppError> {
        let entities = entity::prelude::Payment::find()
            .filter(entity::payment::Column::Status.eq(PaymentStatus::Pending))
            .filter(entity::payment::Column::UpdatedAt.lt(cutoff))
            .order_by_asc(entity::payment::Column::UpdatedAt)
            .all(self.db)
            .await?;

        entities.into_iter().map(Payment::from_entity).collect()
    }

    /// Unlinks a user's payments ahead of deleting the account. The payments stay.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of payments unlinked
    pub async fn detach_user(&self, user_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Payment::update_many()
            .set(entity::payment::ActiveModel {
                user_id: ActiveValue::Set(None),
                updated_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            })
            .filter(entity::payment::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
