//! Enrollment domain models.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::EnrollmentStatus;
use sea_orm::ActiveEnum;

use crate::{
    model::enrollment::{
        AdminEnrollmentDto, EnrollResultDto, EnrollmentDto, EnrollmentWithCourseDto,
    },
    server::{
        gateway::Checkout,
        model::{course::Course, user::User},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct Enrollment {
    pub id: i32,
    pub user_id: i32,
    pub course_id: i32,
    pub payment_status: EnrollmentStatus,
    /// Gateway reference of the checkout that created or re-opened this enrollment.
    pub payment_reference: Option<String>,
    pub enrolled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Enrollment {
    pub fn is_completed(&self) -> bool {
        self.payment_status == EnrollmentStatus::Completed
    }

    pub fn from_entity(entity: entity::enrollment::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            course_id: entity.course_id,
            payment_status: entity.payment_status,
            payment_reference: entity.payment_reference,
            enrolled_at: entity.enrolled_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> EnrollmentDto {
        EnrollmentDto {
            id: self.id,
            user_id: self.user_id,
            course_id: self.course_id,
            payment_status: self.payment_status.to_value(),
            payment_reference: self.payment_reference,
            enrolled_at: self.enrolled_at,
            created_at: self.created_at,
        }
    }
}

/// Result of `enroll`: the enrollment plus a checkout session for paid courses.
#[derive(Debug, Clone)]
pub struct EnrollOutcome {
    pub enrollment: Enrollment,
    pub checkout: Option<Checkout>,
}

impl EnrollOutcome {
    pub fn into_dto(self) -> EnrollResultDto {
        let (checkout_url, reference) = match self.checkout {
            Some(checkout) => (Some(checkout.authorization_url), Some(checkout.reference)),
            None => (None, None),
        };

        EnrollResultDto {
            enrollment: self.enrollment.into_dto(),
            checkout_url,
            reference,
        }
    }
}

/// Where a payment verification left the enrollment.
#[derive(Debug, Clone)]
pub struct Settlement {
    /// Persisted status after the call; `Pending` when the gateway has not settled yet.
    pub status: EnrollmentStatus,
    pub enrollment: Enrollment,
    /// True only for the caller whose conditional update moved the enrollment out of
    /// `pending`. Side effects (confirmation email) belong to that caller.
    pub newly_settled: bool,
}

#[derive(Debug, Clone)]
pub struct EnrollmentWithCourse {
    pub enrollment: Enrollment,
    pub course: Course,
}

impl EnrollmentWithCourse {
    pub fn into_dto(self) -> EnrollmentWithCourseDto {
        EnrollmentWithCourseDto {
            course: self.course.summary(),
            enrollment: self.enrollment.into_dto(),
        }
    }
}

/// Enrollment joined with its learner and course for admin listings.
#[derive(Debug, Clone)]
pub struct EnrollmentDetail {
    pub enrollment: Enrollment,
    pub user: User,
    pub course: Course,
}

impl EnrollmentDetail {
    pub fn into_dto(self) -> AdminEnrollmentDto {
        AdminEnrollmentDto {
            id: self.enrollment.id,
            payment_status: self.enrollment.payment_status.to_value(),
            enrolled_at: self.enrollment.enrolled_at,
            created_at: self.enrollment.created_at,
            user: self.user.contact_summary(),
            course: self.course.summary(),
        }
    }
}
