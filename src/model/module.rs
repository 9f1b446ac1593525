use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDto {
    pub id: i32,
    pub course_id: i32,
    pub title: String,
    pub description: String,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateModuleDto {
    pub course_id: i32,
    #[validate(
        length(min = 3, max = 100, message = "must be between 3 and 100 characters"),
        custom(function = "crate::server::util::validate::not_blank")
    )]
    pub title: String,
    #[validate(length(min = 10, message = "must be at least 10 characters"))]
    pub description: String,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub order: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateModuleDto {
    #[validate(
        length(min = 3, max = 100, message = "must be between 3 and 100 characters"),
        custom(function = "crate::server::util::validate::not_blank")
    )]
    pub title: Option<String>,
    #[validate(length(min = 10, message = "must be at least 10 characters"))]
    pub description: Option<String>,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub order: Option<i32>,
}
