//! Admin bootstrap.
//!
//! Promotes a user to admin when they present the one-time code generated at startup.

pub mod code;

use entity::sea_orm_active_enums::Role;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::User,
    service::admin::code::AdminCodeService,
};

pub struct AdminService<'a> {
    db: &'a DatabaseConnection,
    codes: &'a AdminCodeService,
}

impl<'a> AdminService<'a> {
    pub fn new(db: &'a DatabaseConnection, codes: &'a AdminCodeService) -> Self {
        Self { db, codes }
    }

    /// Redeems the bootstrap code and grants the caller the admin role.
    ///
    /// # Arguments
    /// - `user` - Authenticated, verified caller
    /// - `code` - Code printed to the server log at startup
    ///
    /// # Returns
    /// - `Ok(User)` - Caller with the admin role
    /// - `Err(AppError::AuthErr(AccessDenied))` - Code missing, wrong or expired
    pub async fn claim(&self, user: &User, code: &str) -> Result<User, AppError> {
        if user.is_admin() {
            return Ok(user.clone());
        }

        if !self.codes.validate_and_consume(code.trim()).await {
            return Err(AuthError::AccessDenied(
                user.id,
                "Invalid or expired admin code".to_string(),
            )
            .into());
        }

        let user_repo = UserRepository::new(self.db);
        let promoted = user_repo
            .set_role(user.id, Role::Admin)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        tracing::info!("User {} claimed the admin role", promoted.id);

        Ok(promoted)
    }
}
