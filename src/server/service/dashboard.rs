//! Read-only aggregates for the learner and admin dashboards.

use std::collections::HashMap;

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        comment::CommentRepository, content::ContentRepository, course::CourseRepository,
        enrollment::EnrollmentRepository, user::UserRepository,
    },
    error::AppError,
    middleware::policy::{authorize, Action, Resource},
    model::{
        dashboard::{
            AdminAnalytics, AdminDashboard, CourseAnalytics, CourseProgressSummary,
            LearnerStats, RecentComment, UserAnalytics, UserDashboard, UserStats,
        },
        enrollment::Enrollment,
        user::User,
    },
    service::{
        enrollment::{with_courses, with_details},
        progress::progress_for,
    },
};

const RECENT_LIMIT: u64 = 10;

pub struct DashboardService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DashboardService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Profile, enrollments and activity counts for the caller.
    pub async fn user_dashboard(&self, user: &User) -> Result<UserDashboard, AppError> {
        let enrollments = EnrollmentRepository::new(self.db)
            .get_by_user(user.id)
            .await?;
        let stats = self.learner_stats(user.id).await?;

        Ok(UserDashboard {
            profile: user.clone(),
            enrollments: with_courses(self.db, enrollments).await?,
            stats,
        })
    }

    /// Per-course progress of every enrollment the caller holds.
    pub async fn user_analytics(&self, user: &User) -> Result<UserAnalytics, AppError> {
        let enrollments = EnrollmentRepository::new(self.db)
            .get_by_user(user.id)
            .await?;

        let mut progress = Vec::with_capacity(enrollments.len());
        for item in with_courses(self.db, enrollments).await? {
            let course_progress =
                progress_for(self.db, item.enrollment.id, item.course.id).await?;
            progress.push(CourseProgressSummary {
                course_id: item.course.id,
                course_title: item.course.title,
                payment_status: item.enrollment.payment_status,
                progress: course_progress.percentage(),
            });
        }

        let stats = self.learner_stats(user.id).await?;

        Ok(UserAnalytics {
            progress,
            comments_posted: stats.comments_posted,
            likes_received: stats.likes_received,
        })
    }

    /// Courses the admin owns with their recent enrollments, platform user counts, latest
    /// comments and completion analytics.
    pub async fn admin_dashboard(&self, actor: &User) -> Result<AdminDashboard, AppError> {
        authorize(actor, Resource::Platform, Action::Read)?;

        let courses = CourseRepository::new(self.db)
            .get_by_owner(actor.id)
            .await?;
        let course_ids: Vec<i32> = courses.iter().map(|c| c.id).collect();

        let enrollment_repo = EnrollmentRepository::new(self.db);
        let recent = enrollment_repo
            .get_by_courses(&course_ids, Some(RECENT_LIMIT))
            .await?;
        let all = enrollment_repo.get_by_courses(&course_ids, None).await?;

        Ok(AdminDashboard {
            courses,
            recent_enrollments: with_details(self.db, recent).await?,
            user_stats: self.user_stats().await?,
            recent_comments: self.recent_comments().await?,
            analytics: self.course_analytics(&all).await?,
        })
    }

    /// Platform-wide counters plus completion analytics over the admin's courses.
    pub async fn admin_analytics(&self, actor: &User) -> Result<AdminAnalytics, AppError> {
        authorize(actor, Resource::Platform, Action::Read)?;

        let course_ids = CourseRepository::new(self.db)
            .get_ids_by_owner(actor.id)
            .await?;
        let enrollments = EnrollmentRepository::new(self.db)
            .get_by_courses(&course_ids, None)
            .await?;

        Ok(AdminAnalytics {
            courses: self.course_analytics(&enrollments).await?,
            users: self.user_stats().await?,
            total_comments: CommentRepository::new(self.db).count().await?,
        })
    }

    async fn learner_stats(&self, user_id: i32) -> Result<LearnerStats, AppError> {
        let comment_repo = CommentRepository::new(self.db);

        Ok(LearnerStats {
            courses_enrolled: EnrollmentRepository::new(self.db)
                .count_by_user(user_id)
                .await?,
            comments_posted: comment_repo.count_by_user(user_id).await?,
            likes_received: comment_repo.count_likes_received(user_id).await?,
        })
    }

    async fn user_stats(&self) -> Result<UserStats, AppError> {
        let user_repo = UserRepository::new(self.db);

        Ok(UserStats {
            total_users: user_repo.count().await?,
            verified_users: user_repo.count_verified().await?,
        })
    }

    /// Mean progress over `enrollments`; every enrollment counts, pending ones included.
    async fn course_analytics(&self, enrollments: &[Enrollment]) -> Result<CourseAnalytics, AppError> {
        let mut percentages = Vec::with_capacity(enrollments.len());
        for enrollment in enrollments {
            let progress = progress_for(self.db, enrollment.id, enrollment.course_id).await?;
            percentages.push(progress.percentage());
        }

        Ok(CourseAnalytics::from_percentages(&percentages))
    }

    async fn recent_comments(&self) -> Result<Vec<RecentComment>, AppError> {
        let comments = CommentRepository::new(self.db)
            .get_recent(RECENT_LIMIT)
            .await?;

        let user_ids: Vec<i32> = comments.iter().map(|c| c.user_id).collect();
        let content_ids: Vec<i32> = comments.iter().map(|c| c.content_id).collect();

        let authors: HashMap<i32, User> = UserRepository::new(self.db)
            .find_by_ids(&user_ids)
            .await?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();
        let titles: HashMap<i32, String> = ContentRepository::new(self.db)
            .find_by_ids(&content_ids)
            .await?
            .into_iter()
            .map(|content| (content.id, content.title))
            .collect();

        Ok(comments
            .into_iter()
            .filter_map(|comment| {
                let author = authors.get(&comment.user_id)?.clone();
                let content_title = titles.get(&comment.content_id)?.clone();
                Some(RecentComment {
                    id: comment.id,
                    text: comment.text,
                    author,
                    content_id: comment.content_id,
                    content_title,
                    created_at: comment.created_at,
                })
            })
            .collect())
    }
}
