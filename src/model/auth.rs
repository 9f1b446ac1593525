use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{model::user::UserDto, server::util::validate::PHONE_RE};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupDto {
    #[validate(
        length(min = 2, max = 20, message = "must be between 2 and 20 characters"),
        custom(function = "crate::server::util::validate::not_blank")
    )]
    pub first_name: String,
    #[validate(
        length(min = 2, max = 20, message = "must be between 2 and 20 characters"),
        custom(function = "crate::server::util::validate::not_blank")
    )]
    pub last_name: String,
    #[validate(length(min = 5, max = 60), email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(regex(path = *PHONE_RE, message = "must be exactly 11 digits"))]
    pub phone_number: String,
    /// `self` or `parent`
    pub registrant_type: String,
    #[validate(
        custom(function = "crate::server::util::validate::password_strength"),
        must_match(other = "confirm_password", message = "Passwords do not match")
    )]
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SigninDto {
    pub email: String,
    pub password: String,
}

/// Bearer token issued on sign in and password change.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokenDto {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerificationCodeDto {
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmailDto {
    pub email: String,
}

/// Query string carried by the emailed verification link.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct VerifyEmailQuery {
    pub token: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordDto {
    #[validate(length(min = 1, message = "is required"))]
    pub old_password: String,
    #[validate(
        custom(function = "crate::server::util::validate::password_strength"),
        must_match(other = "confirm_password", message = "Passwords do not match")
    )]
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordDto {
    pub email: String,
    #[validate(custom(function = "crate::server::util::validate::not_blank"))]
    pub code: String,
    #[validate(
        custom(function = "crate::server::util::validate::password_strength"),
        must_match(other = "confirm_password", message = "Passwords do not match")
    )]
    pub new_password: String,
    pub confirm_password: String,
}
