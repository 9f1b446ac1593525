//! Authentication models and parameters.

use validator::Validate;

use crate::{
    model::auth::{AuthTokenDto, ChangePasswordDto, ResetPasswordDto},
    server::{error::AppError, model::user::User, util::validate},
};

/// Bearer token issued at sign in or after a password change.
#[derive(Debug, Clone)]
pub struct AuthToken {
    pub token: String,
    /// Lifetime in seconds.
    pub expires_in: i64,
    pub user: User,
}

impl AuthToken {
    pub fn into_dto(self) -> AuthTokenDto {
        AuthTokenDto {
            token: self.token,
            token_type: "Bearer".to_string(),
            expires_in: self.expires_in,
            user: self.user.into_dto(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChangePasswordParam {
    pub old_password: String,
    pub new_password: String,
}

impl ChangePasswordParam {
    pub fn from_dto(dto: ChangePasswordDto) -> Result<Self, AppError> {
        dto.validate()?;

        Ok(Self {
            old_password: dto.old_password,
            new_password: dto.new_password,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ResetPasswordParam {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

impl ResetPasswordParam {
    pub fn from_dto(dto: ResetPasswordDto) -> Result<Self, AppError> {
        dto.validate()?;

        Ok(Self {
            email: validate::email(&dto.email)?,
            code: dto.code.trim().to_ascii_lowercase(),
            new_password: dto.new_password,
        })
    }
}
