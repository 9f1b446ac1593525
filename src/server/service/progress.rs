use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        course::CourseRepository, enrollment::EnrollmentRepository, module::ModuleRepository,
        progress::ProgressRepository,
    },
    error::{auth::AuthError, AppError},
    model::{
        progress::{CourseProgress, ModuleCompletion},
        user::User,
    },
};

const MODULE_ALREADY_COMPLETED: &str = "Module already marked as completed";

pub struct ProgressService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ProgressService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a module as completed for the caller.
    ///
    /// Requires a completed (paid or free) enrollment in the module's course.
    ///
    /// # Returns
    /// - `Ok(ModuleCompletion)` - Newly recorded completion
    /// - `Err(AppError::NotFound)` - Module does not exist
    /// - `Err(AppError::AuthErr(AccessDenied))` - No completed enrollment in the course
    /// - `Err(AppError::Conflict)` - Module was already completed
    pub async fn mark_module_complete(
        &self,
        user: &User,
        module_id: i32,
    ) -> Result<ModuleCompletion, AppError> {
        let module = ModuleRepository::new(self.db)
            .find_by_id(module_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Module not found".to_string()))?;

        let enrollment = EnrollmentRepository::new(self.db)
            .find_by_user_and_course(user.id, module.course_id)
            .await?
            .filter(|enrollment| enrollment.is_completed())
            .ok_or_else(|| {
                AuthError::AccessDenied(
                    user.id,
                    "Not enrolled in this course or payment not completed".to_string(),
                )
            })?;

        let progress_repo = ProgressRepository::new(self.db);
        if progress_repo.is_completed(enrollment.id, module.id).await? {
            return Err(AppError::Conflict(MODULE_ALREADY_COMPLETED.to_string()));
        }

        progress_repo
            .complete(enrollment.id, module.id)
            .await
            .map_err(|e| AppError::conflict_on_unique(e, MODULE_ALREADY_COMPLETED))
    }

    /// Computes the caller's progress through a course.
    ///
    /// # Returns
    /// - `Ok(CourseProgress)` - Completed and total module counts
    /// - `Err(AppError::NotFound)` - Course does not exist
    /// - `Err(AppError::AuthErr(AccessDenied))` - Caller is not enrolled in the course
    pub async fn course_progress(
        &self,
        user: &User,
        course_id: i32,
    ) -> Result<CourseProgress, AppError> {
        let course = CourseRepository::new(self.db)
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

        let enrollment = EnrollmentRepository::new(self.db)
            .find_by_user_and_course(user.id, course.id)
            .await?
            .ok_or_else(|| {
                AuthError::AccessDenied(user.id, "Not enrolled in this course".to_string())
            })?;

        progress_for(self.db, enrollment.id, course.id).await
    }
}

/// Progress of one enrollment through its course.
pub(crate) async fn progress_for(
    db: &DatabaseConnection,
    enrollment_id: i32,
    course_id: i32,
) -> Result<CourseProgress, AppError> {
    let total = ModuleRepository::new(db).count_by_course(course_id).await?;
    let completed = ProgressRepository::new(db)
        .count_completed(enrollment_id)
        .await?;

    Ok(CourseProgress {
        course_id,
        completed,
        total,
    })
}
