//! Enrollment data repository.
//!
//! Status transitions out of `pending` are conditional updates (`... WHERE payment_status =
//! 'pending'`). Callers inspect the affected row count to learn whether they performed the
//! transition or another writer got there first.

use chrono::Utc;
use entity::sea_orm_active_enums::EnrollmentStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::{data::catalog::delete_enrollments, model::enrollment::Enrollment};

pub struct EnrollmentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> EnrollmentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an enrollment. Completed enrollments get `enrolled_at = now`.
    ///
    /// # Arguments
    /// - `user_id` - Enrolling learner
    /// - `course_id` - Target course
    /// - `status` - `Completed` for free courses, `Pending` for a fresh checkout
    /// - `reference` - Gateway reference of the checkout, if any
    ///
    /// # Returns
    /// - `Ok(Enrollment)` - The created enrollment
    /// - `Err(DbErr)` - Insert failed, including the `(user_id, course_id)` unique violation
    pub async fn create(
        &self,
        user_id: i32,
        course_id: i32,
        status: EnrollmentStatus,
        reference: Option<String>,
    ) -> Result<Enrollment, DbErr> {
        let now = Utc::now();
        let enrolled_at = (status == EnrollmentStatus::Completed).then_some(now);

        let entity = entity::enrollment::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            course_id: ActiveValue::Set(course_id),
            payment_status: ActiveValue::Set(status),
            payment_reference: ActiveValue::Set(reference),
            enrolled_at: ActiveValue::Set(enrolled_at),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Enrollment::from_entity(entity))
    }

    pub async fn find_by_id(&self, enrollment_id: i32) -> Result<Option<Enrollment>, DbErr> {
        let entity = entity::prelude::Enrollment::find_by_id(enrollment_id)
            .one(self.db)
            .await?;

        Ok(entity.map(Enrollment::from_entity))
    }

    pub async fn find_by_user_and_course(
        &self,
        user_id: i32,
        course_id: i32,
    ) -> Result<Option<Enrollment>, DbErr> {
        let entity = entity::prelude::Enrollment::find()
            .filter(entity::enrollment::Column::UserId.eq(user_id))
            .filter(entity::enrollment::Column::CourseId.eq(course_id))
            .one(self.db)
            .await?;

        Ok(entity.map(Enrollment::from_entity))
    }

    /// Finds the enrollment created by checkout `reference` for `user_id`.
    pub async fn find_by_reference_for_user(
        &self,
        reference: &str,
        user_id: i32,
    ) -> Result<Option<Enrollment>, DbErr> {
        let entity = entity::prelude::Enrollment::find()
            .filter(entity::enrollment::Column::PaymentReference.eq(reference))
            .filter(entity::enrollment::Column::UserId.eq(user_id))
            .one(self.db)
            .await?;

        Ok(entity.map(Enrollment::from_entity))
    }

    /// Moves a pending enrollment to `status`.
    ///
    /// Reaching `Completed` stamps `enrolled_at`.
    ///
    /// # Returns
    /// - `Ok(true)` - This call performed the transition
    /// - `Ok(false)` - The enrollment was no longer pending (or does not exist)
    pub async fn settle(&self, enrollment_id: i32, status: EnrollmentStatus) -> Result<bool, DbErr> {
        let now = Utc::now();
        let mut changes = entity::enrollment::ActiveModel {
            payment_status: ActiveValue::Set(status),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };
        if status == EnrollmentStatus::Completed {
            changes.enrolled_at = ActiveValue::Set(Some(now));
        }

        let result = entity::prelude::Enrollment::update_many()
            .set(changes)
            .filter(entity::enrollment::Column::Id.eq(enrollment_id))
            .filter(entity::enrollment::Column::PaymentStatus.eq(EnrollmentStatus::Pending))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Puts a failed enrollment back to pending under a new checkout reference.
    ///
    /// # Returns
    /// - `Ok(true)` - Enrollment re-opened
    /// - `Ok(false)` - Enrollment was not in `failed` state
    pub async fn reopen(&self, enrollment_id: i32, reference: String) -> Result<bool, DbErr> {
        let result = entity::prelude::Enrollment::update_many()
            .set(entity::enrollment::ActiveModel {
                payment_status: ActiveValue::Set(EnrollmentStatus::Pending),
                payment_reference: ActiveValue::Set(Some(reference)),
                enrolled_at: ActiveValue::Set(None),
                updated_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            })
            .filter(entity::enrollment::Column::Id.eq(enrollment_id))
            .filter(entity::enrollment::Column::PaymentStatus.eq(EnrollmentStatus::Failed))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Gets a learner's enrollments, newest first.
    pub async fn get_by_user(&self, user_id: i32) -> Result<Vec<Enrollment>, DbErr> {
        let entities = entity::prelude::Enrollment::find()
            .filter(entity::enrollment::Column::UserId.eq(user_id))
            .order_by_desc(entity::enrollment::Column::CreatedAt)
            .order_by_desc(entity::enrollment::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Enrollment::from_entity).collect())
    }

    /// Gets enrollments in any of `course_ids`, newest first, optionally capped at `limit`.
    pub async fn get_by_courses(
        &self,
        course_ids: &[i32],
        limit: Option<u64>,
    ) -> Result<Vec<Enrollment>, DbErr> {
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::Enrollment::find()
            .filter(entity::enrollment::Column::CourseId.is_in(course_ids.to_vec()))
            .order_by_desc(entity::enrollment::Column::CreatedAt)
            .order_by_desc(entity::enrollment::Column::Id)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Enrollment::from_entity).collect())
    }

    /// User ids holding a completed enrollment in `course_id`.
    pub async fn get_completed_user_ids(&self, course_id: i32) -> Result<Vec<i32>, DbErr> {
        entity::prelude::Enrollment::find()
            .select_only()
            .column(entity::enrollment::Column::UserId)
            .filter(entity::enrollment::Column::CourseId.eq(course_id))
            .filter(entity::enrollment::Column::PaymentStatus.eq(EnrollmentStatus::Completed))
            .into_tuple()
            .all(self.db)
            .await
    }

    pub async fn count_by_user(&self, user_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Enrollment::find()
            .filter(entity::enrollment::Column::UserId.eq(user_id))
            .count(self.db)
            .await
    }

    /// Deletes an enrollment and its completed-module rows.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of enrollment rows deleted (0 or 1)
    pub async fn delete(&self, enrollment_id: i32) -> Result<u64, DbErr> {
        delete_enrollments(self.db, &[enrollment_id]).await
    }

    /// Deletes all of a learner's enrollments and their completed-module rows.
    pub async fn delete_by_user(&self, user_id: i32) -> Result<u64, DbErr> {
        let ids: Vec<i32> = entity::prelude::Enrollment::find()
            .select_only()
            .column(entity::enrollment::Column::Id)
            .filter(entity::enrollment::Column::UserId.eq(user_id))
            .into_tuple()
            .all(self.db)
            .await?;

        delete_enrollments(self.db, &ids).await
    }
}
