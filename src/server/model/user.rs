//! User domain models and parameters.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::{RegistrantType, Role};
use sea_orm::ActiveEnum;
use validator::Validate;

use crate::{
    model::{
        auth::SignupDto,
        user::{UpdateProfileDto, UserDto, UserSummaryDto},
    },
    server::{
        error::AppError,
        util::{
            parse::{parse_registrant_type, registrant_type_label},
            validate,
        },
    },
};

/// Account without credential material.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub registrant_type: RegistrantType,
    pub role: Role,
    pub verified: bool,
    /// Tokens carrying an older version are rejected.
    pub token_version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            first_name: entity.first_name,
            last_name: entity.last_name,
            email: entity.email,
            phone_number: entity.phone_number,
            registrant_type: entity.registrant_type,
            role: entity.role,
            verified: entity.verified,
            token_version: entity.token_version,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone_number: self.phone_number,
            registrant_type: registrant_type_label(self.registrant_type).to_string(),
            role: self.role.to_value(),
            verified: self.verified,
            created_at: self.created_at,
        }
    }

    /// Name-only reference, as shown next to comments.
    pub fn summary(&self) -> UserSummaryDto {
        UserSummaryDto {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: None,
        }
    }

    /// Reference including the email, as shown on admin screens.
    pub fn contact_summary(&self) -> UserSummaryDto {
        UserSummaryDto {
            email: Some(self.email.clone()),
            ..self.summary()
        }
    }
}

/// A user together with the hashed secrets stored for them.
///
/// Only the auth service reads this; everything else works with `User`.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
    pub verification_code_hash: Option<String>,
    pub verification_code_issued_at: Option<DateTime<Utc>>,
    pub forgot_password_code_hash: Option<String>,
    pub forgot_password_code_issued_at: Option<DateTime<Utc>>,
}

impl UserCredentials {
    pub fn from_entity(entity: entity::user::Model) -> Self {
        let password_hash = entity.password_hash.clone();
        let verification_code_hash = entity.verification_code_hash.clone();
        let verification_code_issued_at = entity.verification_code_issued_at;
        let forgot_password_code_hash = entity.forgot_password_code_hash.clone();
        let forgot_password_code_issued_at = entity.forgot_password_code_issued_at;

        Self {
            user: User::from_entity(entity),
            password_hash,
            verification_code_hash,
            verification_code_issued_at,
            forgot_password_code_hash,
            forgot_password_code_issued_at,
        }
    }
}

/// Validated signup request. The password is still plain text here.
#[derive(Debug, Clone)]
pub struct SignupParam {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub registrant_type: RegistrantType,
    pub password: String,
}

impl SignupParam {
    /// Validates and normalizes a signup request.
    ///
    /// # Returns
    /// - `Ok(SignupParam)` - All fields valid, email lowercased, names trimmed
    /// - `Err(AppError::BadRequest)` - First failing field
    pub fn from_dto(dto: SignupDto) -> Result<Self, AppError> {
        dto.validate()?;

        Ok(Self {
            first_name: dto.first_name.trim().to_string(),
            last_name: dto.last_name.trim().to_string(),
            email: validate::email(&dto.email)?,
            phone_number: dto.phone_number,
            registrant_type: parse_registrant_type(&dto.registrant_type)?,
            password: dto.password,
        })
    }
}

/// Row values for a new account.
#[derive(Debug, Clone)]
pub struct CreateUserParam {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub registrant_type: RegistrantType,
    pub password_hash: String,
    pub verification_code_hash: Option<String>,
}

/// Validated profile update; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateProfileParam {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub registrant_type: Option<RegistrantType>,
}

impl UpdateProfileParam {
    pub fn from_dto(dto: UpdateProfileDto) -> Result<Self, AppError> {
        dto.validate()?;

        Ok(Self {
            first_name: dto.first_name.map(|v| v.trim().to_string()),
            last_name: dto.last_name.map(|v| v.trim().to_string()),
            email: dto.email.map(|v| validate::email(&v)).transpose()?,
            phone_number: dto.phone_number,
            registrant_type: dto
                .registrant_type
                .map(|v| parse_registrant_type(&v))
                .transpose()?,
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
