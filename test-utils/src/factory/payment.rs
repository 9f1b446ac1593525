//! Payment factory for creating test payment entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use entity::sea_orm_active_enums::PaymentStatus;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test payments.
pub struct PaymentFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    reference: String,
    amount: i64,
    status: PaymentStatus,
    course_id: Option<i32>,
}

impl<'a> PaymentFactory<'a> {
    /// Creates a new PaymentFactory with default values.
    ///
    /// Defaults:
    /// - reference: `"ref_{id}"`
    /// - amount: `5000`
    /// - status: `pending`
    /// - metadata: none
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            user_id,
            reference: format!("ref_{}", id),
            amount: 5000,
            status: PaymentStatus::Pending,
            course_id: None,
        }
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    pub fn amount(mut self, amount: i64) -> Self {
        self.amount = amount;
        self
    }

    pub fn status(mut self, status: PaymentStatus) -> Self {
        self.status = status;
        self
    }

    /// Records the course in the payment metadata, as a course checkout does.
    pub fn course(mut self, course_id: i32) -> Self {
        self.course_id = Some(course_id);
        self
    }

    /// Builds and inserts the payment entity into the database.
    pub async fn build(self) -> Result<entity::payment::Model, DbErr> {
        let now = Utc::now();
        let metadata = self
            .course_id
            .map(|course_id| serde_json::json!({ "course_id": course_id }).to_string());

        entity::payment::ActiveModel {
            user_id: ActiveValue::Set(Some(self.user_id)),
            reference: ActiveValue::Set(self.reference),
            amount: ActiveValue::Set(self.amount),
            currency: ActiveValue::Set("NGN".to_string()),
            status: ActiveValue::Set(self.status),
            payment_method: ActiveValue::Set(None),
            paid_at: ActiveValue::Set(None),
            raw_response: ActiveValue::Set(None),
            metadata: ActiveValue::Set(metadata),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending payment for `user_id`.
pub async fn create_payment(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<entity::payment::Model, DbErr> {
    PaymentFactory::new(db, user_id).build().await
}
