use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::model::{course::CourseSummaryDto, user::UserSummaryDto};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentDto {
    pub id: i32,
    pub user_id: i32,
    pub course_id: i32,
    /// `pending`, `completed` or `failed`
    pub payment_status: String,
    pub payment_reference: Option<String>,
    pub enrolled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Result of `POST /enroll/{course_id}`.
///
/// Free courses return a completed enrollment and no checkout fields; paid courses
/// return a pending enrollment plus the gateway checkout URL and reference.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollResultDto {
    pub enrollment: EnrollmentDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentWithCourseDto {
    #[serde(flatten)]
    pub enrollment: EnrollmentDto,
    pub course: CourseSummaryDto,
}

/// Enrollment row as shown on admin screens.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminEnrollmentDto {
    pub id: i32,
    pub payment_status: String,
    pub enrolled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub user: UserSummaryDto,
    pub course: CourseSummaryDto,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PaymentCallbackQuery {
    pub reference: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct NotifyCourseDto {
    #[validate(custom(function = "crate::server::util::validate::not_blank"))]
    pub subject: String,
    #[validate(custom(function = "crate::server::util::validate::not_blank"))]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotifyResultDto {
    pub recipients: u64,
    pub delivered: u64,
}
