//! User profile and account management.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        catalog::CatalogRepository, comment::CommentRepository, course::CourseRepository,
        enrollment::EnrollmentRepository, payment::PaymentRepository, user::UserRepository,
    },
    error::AppError,
    middleware::policy::{authorize, Action, Resource},
    model::{
        pagination::{Page, PageParam},
        user::{UpdateProfileParam, User},
    },
};

/// Service providing business logic for user management.
pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Updates the caller's profile.
    ///
    /// # Returns
    /// - `Ok(User)` - Updated profile
    /// - `Err(AppError::BadRequest)` - Nothing to update
    /// - `Err(AppError::Conflict)` - New email or phone number belongs to another account
    pub async fn update_profile(
        &self,
        user: &User,
        param: UpdateProfileParam,
    ) -> Result<User, AppError> {
        if param.is_empty() {
            return Err(AppError::BadRequest("No fields to update".to_string()));
        }

        let user_repo = UserRepository::new(self.db);
        if let Some(email) = &param.email {
            if user_repo.email_taken(email, Some(user.id)).await? {
                return Err(AppError::Conflict("Email already exists".to_string()));
            }
        }
        if let Some(phone_number) = &param.phone_number {
            if user_repo.phone_taken(phone_number, Some(user.id)).await? {
                return Err(AppError::Conflict("Phone number already exists".to_string()));
            }
        }

        user_repo
            .update_profile(user.id, param)
            .await
            .map_err(|e| AppError::conflict_on_unique(e, "Email or phone number already exists"))?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Gets a page of users, newest first. Admin only.
    pub async fn get_all_users(&self, actor: &User, page: PageParam) -> Result<Page<User>, AppError> {
        authorize(actor, Resource::Platform, Action::Read)?;

        let (users, total) = UserRepository::new(self.db).get_all_paginated(page).await?;

        Ok(Page::new(users, total, page))
    }

    /// Gets one user. Admins may read any account, users their own.
    pub async fn get_user(&self, actor: &User, user_id: i32) -> Result<User, AppError> {
        authorize(actor, Resource::Account { user_id }, Action::Read)?;

        UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Marks an account as verified without a code. Admin only.
    pub async fn force_verify(&self, actor: &User, user_id: i32) -> Result<User, AppError> {
        authorize(actor, Resource::Platform, Action::Update)?;

        let user = UserRepository::new(self.db)
            .mark_verified(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        tracing::info!("Admin {} verified user {}", actor.id, user.id);

        Ok(user)
    }

    /// Deletes an account and everything hanging off it.
    ///
    /// Removes the user's comments (with replies and likes), likes, enrollments and, for admins,
    /// the courses they created with their whole subtree. Payments are kept with their user
    /// link cleared. Runs in one transaction.
    ///
    /// # Returns
    /// - `Ok(())` - Account deleted
    /// - `Err(AppError::NotFound)` - No such user
    /// - `Err(AppError::AuthErr(AccessDenied))` - Caller is neither the user nor an admin
    pub async fn delete_user(&self, actor: &User, user_id: i32) -> Result<(), AppError> {
        authorize(actor, Resource::Account { user_id }, Action::Delete)?;

        UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let txn = self.db.begin().await?;

        let owned_courses = CourseRepository::new(&txn).get_ids_by_owner(user_id).await?;
        CatalogRepository::new(&txn)
            .delete_courses(&owned_courses)
            .await?;
        CommentRepository::new(&txn).delete_by_user(user_id).await?;
        EnrollmentRepository::new(&txn).delete_by_user(user_id).await?;
        PaymentRepository::new(&txn).detach_user(user_id).await?;
        UserRepository::new(&txn).delete(user_id).await?;

        txn.commit().await?;

        tracing::info!(
            "User {} deleted by {} along with {} course(s)",
            user_id,
            actor.id,
            owned_courses.len()
        );

        Ok(())
    }
}
