//! Read-only aggregates behind the learner and admin dashboards.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::EnrollmentStatus;
use sea_orm::ActiveEnum;

use crate::{
    model::dashboard::{
        AdminAnalyticsDto, AdminDashboardDto, CourseAnalyticsDto, CourseProgressSummaryDto,
        LearnerStatsDto, RecentCommentDto, UserAnalyticsDto, UserDashboardDto, UserStatsDto,
    },
    server::model::{
        course::Course,
        enrollment::{EnrollmentDetail, EnrollmentWithCourse},
        user::User,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LearnerStats {
    pub courses_enrolled: u64,
    pub comments_posted: u64,
    pub likes_received: u64,
}

impl LearnerStats {
    fn into_dto(self) -> LearnerStatsDto {
        LearnerStatsDto {
            courses_enrolled: self.courses_enrolled,
            comments_posted: self.comments_posted,
            likes_received: self.likes_received,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UserDashboard {
    pub profile: User,
    pub enrollments: Vec<EnrollmentWithCourse>,
    pub stats: LearnerStats,
}

impl UserDashboard {
    pub fn into_dto(self) -> UserDashboardDto {
        UserDashboardDto {
            profile: self.profile.into_dto(),
            enrollments: self
                .enrollments
                .into_iter()
                .map(EnrollmentWithCourse::into_dto)
                .collect(),
            analytics: self.stats.into_dto(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CourseProgressSummary {
    pub course_id: i32,
    pub course_title: String,
    pub payment_status: EnrollmentStatus,
    pub progress: u8,
}

#[derive(Debug, Clone)]
pub struct UserAnalytics {
    pub progress: Vec<CourseProgressSummary>,
    pub comments_posted: u64,
    pub likes_received: u64,
}

impl UserAnalytics {
    pub fn into_dto(self) -> UserAnalyticsDto {
        UserAnalyticsDto {
            progress: self
                .progress
                .into_iter()
                .map(|p| CourseProgressSummaryDto {
                    course_id: p.course_id,
                    course: p.course_title,
                    payment_status: p.payment_status.to_value(),
                    progress: p.progress,
                })
                .collect(),
            comments_posted: self.comments_posted,
            likes_received: self.likes_received,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecentComment {
    pub id: i32,
    pub text: String,
    pub author: User,
    pub content_id: i32,
    pub content_title: String,
    pub created_at: DateTime<Utc>,
}

impl RecentComment {
    fn into_dto(self) -> RecentCommentDto {
        RecentCommentDto {
            id: self.id,
            text: self.text,
            author: self.author.summary(),
            content_id: self.content_id,
            content_title: self.content_title,
            created_at: self.created_at,
        }
    }
}

/// Enrollment count and mean progress over an admin's courses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourseAnalytics {
    pub total_enrollments: u64,
    pub average_completion_rate: f64,
}

impl CourseAnalytics {
    /// Mean of the given per-enrollment percentages; 0 when there are none.
    pub fn from_percentages(percentages: &[u8]) -> Self {
        let total = percentages.len() as u64;
        let average_completion_rate = if total == 0 {
            0.0
        } else {
            percentages.iter().map(|p| f64::from(*p)).sum::<f64>() / total as f64
        };

        Self {
            total_enrollments: total,
            average_completion_rate,
        }
    }

    /// Rate rendered with two decimals, e.g. `"41.67"`.
    pub fn formatted_rate(&self) -> String {
        format!("{:.2}", self.average_completion_rate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserStats {
    pub total_users: u64,
    pub verified_users: u64,
}

#[derive(Debug, Clone)]
pub struct AdminDashboard {
    pub courses: Vec<Course>,
    pub recent_enrollments: Vec<EnrollmentDetail>,
    pub user_stats: UserStats,
    pub recent_comments: Vec<RecentComment>,
    pub analytics: CourseAnalytics,
}

impl AdminDashboard {
    pub fn into_dto(self) -> AdminDashboardDto {
        AdminDashboardDto {
            courses: self.courses.into_iter().map(Course::into_dto).collect(),
            enrollments: self
                .recent_enrollments
                .into_iter()
                .map(EnrollmentDetail::into_dto)
                .collect(),
            user_stats: UserStatsDto {
                total_users: self.user_stats.total_users,
                verified_users: self.user_stats.verified_users,
            },
            comments: self
                .recent_comments
                .into_iter()
                .map(RecentComment::into_dto)
                .collect(),
            analytics: CourseAnalyticsDto {
                total_enrollments: self.analytics.total_enrollments,
                average_completion_rate: self.analytics.formatted_rate(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AdminAnalytics {
    pub courses: CourseAnalytics,
    pub users: UserStats,
    pub total_comments: u64,
}

impl AdminAnalytics {
    pub fn into_dto(self) -> AdminAnalyticsDto {
        AdminAnalyticsDto {
            total_enrollments: self.courses.total_enrollments,
            average_completion_rate: self.courses.formatted_rate(),
            total_users: self.users.total_users,
            verified_users: self.users.verified_users,
            total_comments: self.total_comments,
        }
    }
}
