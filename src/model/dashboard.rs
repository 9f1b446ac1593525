use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{
    course::CourseDto,
    enrollment::{AdminEnrollmentDto, EnrollmentWithCourseDto},
    user::{UserDto, UserSummaryDto},
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LearnerStatsDto {
    pub courses_enrolled: u64,
    pub comments_posted: u64,
    pub likes_received: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDashboardDto {
    pub profile: UserDto,
    pub enrollments: Vec<EnrollmentWithCourseDto>,
    pub analytics: LearnerStatsDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgressSummaryDto {
    pub course_id: i32,
    pub course: String,
    pub payment_status: String,
    pub progress: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserAnalyticsDto {
    pub progress: Vec<CourseProgressSummaryDto>,
    pub comments_posted: u64,
    pub likes_received: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserStatsDto {
    pub total_users: u64,
    pub verified_users: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentCommentDto {
    pub id: i32,
    pub text: String,
    pub author: UserSummaryDto,
    pub content_id: i32,
    pub content_title: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseAnalyticsDto {
    pub total_enrollments: u64,
    /// Mean progress percentage over enrollments, two decimals.
    pub average_completion_rate: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboardDto {
    pub courses: Vec<CourseDto>,
    pub enrollments: Vec<AdminEnrollmentDto>,
    pub user_stats: UserStatsDto,
    pub comments: Vec<RecentCommentDto>,
    pub analytics: CourseAnalyticsDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminAnalyticsDto {
    pub total_enrollments: u64,
    pub average_completion_rate: String,
    pub total_users: u64,
    pub verified_users: u64,
    pub total_comments: u64,
}
