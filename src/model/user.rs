use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::server::util::validate::PHONE_RE;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub registrant_type: String,
    pub role: String,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Short user reference embedded in enrollment and comment listings.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummaryDto {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Profile update. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileDto {
    #[validate(
        length(min = 2, max = 20, message = "must be between 2 and 20 characters"),
        custom(function = "crate::server::util::validate::not_blank")
    )]
    pub first_name: Option<String>,
    #[validate(
        length(min = 2, max = 20, message = "must be between 2 and 20 characters"),
        custom(function = "crate::server::util::validate::not_blank")
    )]
    pub last_name: Option<String>,
    #[validate(length(min = 5, max = 60), email(message = "must be a valid email address"))]
    pub email: Option<String>,
    #[validate(regex(path = *PHONE_RE, message = "must be exactly 11 digits"))]
    pub phone_number: Option<String>,
    pub registrant_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClaimAdminDto {
    pub code: String,
}
