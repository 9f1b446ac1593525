//! Enrollment factory for creating test enrollment entities.
//!
//! Defaults to a completed enrollment, which is what progress and dashboard tests
//! need. Use `pending(reference)` to model an unpaid checkout.

use chrono::Utc;
use entity::sea_orm_active_enums::EnrollmentStatus;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test enrollments.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::enrollment::EnrollmentFactory;
///
/// let enrollment = EnrollmentFactory::new(&db, user.id, course.id)
///     .pending("ref_123")
///     .build()
///     .await?;
/// ```
pub struct EnrollmentFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    course_id: i32,
    status: EnrollmentStatus,
    reference: Option<String>,
}

impl<'a> EnrollmentFactory<'a> {
    /// Creates a new EnrollmentFactory for a completed enrollment without a reference.
    pub fn new(db: &'a DatabaseConnection, user_id: i32, course_id: i32) -> Self {
        Self {
            db,
            user_id,
            course_id,
            status: EnrollmentStatus::Completed,
            reference: None,
        }
    }

    /// Makes the enrollment a pending checkout awaiting `reference`.
    pub fn pending(mut self, reference: impl Into<String>) -> Self {
        self.status = EnrollmentStatus::Pending;
        self.reference = Some(reference.into());
        self
    }

    pub fn status(mut self, status: EnrollmentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Builds and inserts the enrollment entity into the database.
    ///
    /// `enrolled_at` is set only for completed enrollments.
    pub async fn build(self) -> Result<entity::enrollment::Model, DbErr> {
        let now = Utc::now();
        let enrolled_at = (self.status == EnrollmentStatus::Completed).then_some(now);

        entity::enrollment::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            course_id: ActiveValue::Set(self.course_id),
            payment_status: ActiveValue::Set(self.status),
            payment_reference: ActiveValue::Set(self.reference),
            enrolled_at: ActiveValue::Set(enrolled_at),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a completed enrollment of `user_id` in `course_id`.
pub async fn create_enrollment(
    db: &DatabaseConnection,
    user_id: i32,
    course_id: i32,
) -> Result<entity::enrollment::Model, DbErr> {
    EnrollmentFactory::new(db, user_id, course_id).build().await
}

/// Records `module_id` as completed within `enrollment_id`.
pub async fn complete_module(
    db: &DatabaseConnection,
    enrollment_id: i32,
    module_id: i32,
) -> Result<entity::enrollment_module::Model, DbErr> {
    entity::enrollment_module::ActiveModel {
        enrollment_id: ActiveValue::Set(enrollment_id),
        module_id: ActiveValue::Set(module_id),
        completed_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
