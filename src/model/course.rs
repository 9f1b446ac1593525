use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::model::module::ModuleDto;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseDto {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub category: String,
    pub price: i64,
    pub duration: String,
    pub level: String,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Course reference embedded in enrollment listings.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummaryDto {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub category: String,
    pub level: String,
    pub price: i64,
    pub duration: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetailDto {
    #[serde(flatten)]
    pub course: CourseDto,
    pub modules: Vec<ModuleDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseDto {
    #[validate(
        length(min = 3, max = 100, message = "must be between 3 and 100 characters"),
        custom(function = "crate::server::util::validate::not_blank")
    )]
    pub title: String,
    #[validate(length(min = 10, message = "must be at least 10 characters"))]
    pub description: String,
    pub category: Option<String>,
    #[validate(range(min = 0, message = "cannot be negative"))]
    pub price: Option<i64>,
    #[validate(custom(function = "crate::server::util::validate::not_blank"))]
    pub duration: String,
    /// `beginner`, `intermediate` or `advanced`
    pub level: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseDto {
    #[validate(
        length(min = 3, max = 100, message = "must be between 3 and 100 characters"),
        custom(function = "crate::server::util::validate::not_blank")
    )]
    pub title: Option<String>,
    #[validate(length(min = 10, message = "must be at least 10 characters"))]
    pub description: Option<String>,
    pub category: Option<String>,
    #[validate(range(min = 0, message = "cannot be negative"))]
    pub price: Option<i64>,
    #[validate(custom(function = "crate::server::util::validate::not_blank"))]
    pub duration: Option<String>,
    pub level: Option<String>,
}

/// Courses sharing a category or level.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CourseGroupDto {
    pub key: String,
    pub courses: Vec<CourseDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CoursePriceGroupsDto {
    pub free: Vec<CourseDto>,
    pub paid: Vec<CourseDto>,
}
