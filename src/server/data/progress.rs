//! Completed-module rows of enrollments.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter,
};

use crate::server::model::progress::ModuleCompletion;

pub struct ProgressRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ProgressRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Records `module_id` as completed for an enrollment.
    ///
    /// # Returns
    /// - `Ok(ModuleCompletion)` - Completion recorded
    /// - `Err(DbErr)` - Insert failed; the pair already existing surfaces as a unique
    ///   constraint violation on the composite primary key
    pub async fn complete(&self, enrollment_id: i32, module_id: i32) -> Result<ModuleCompletion, DbErr> {
        let entity = entity::enrollment_module::ActiveModel {
            enrollment_id: ActiveValue::Set(enrollment_id),
            module_id: ActiveValue::Set(module_id),
            completed_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ok(ModuleCompletion::from_entity(entity))
    }

    pub async fn is_completed(&self, enrollment_id: i32, module_id: i32) -> Result<bool, DbErr> {
        let entity = entity::prelude::EnrollmentModule::find_by_id((enrollment_id, module_id))
            .one(self.db)
            .await?;

        Ok(entity.is_some())
    }

    /// Number of modules completed under an enrollment.
    pub async fn count_completed(&self, enrollment_id: i32) -> Result<u64, DbErr> {
        entity::prelude::EnrollmentModule::find()
            .filter(entity::enrollment_module::Column::EnrollmentId.eq(enrollment_id))
            .count(self.db)
            .await
    }
}
