//! Enrollment lifecycle.
//!
//! Free courses complete immediately. Paid courses open a gateway checkout and stay `pending`
//! until a verification (synchronous, webhook or reconciliation job) settles them. Every
//! transition out of `pending` is a conditional update, so concurrent settlements agree on a
//! single winner and only the winner sends the confirmation email.

use std::collections::HashMap;

use entity::sea_orm_active_enums::{EnrollmentStatus, PaymentStatus};
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde_json::json;

use crate::server::{
    data::{
        course::CourseRepository, enrollment::EnrollmentRepository,
        payment::PaymentRepository, user::UserRepository,
    },
    error::{auth::AuthError, internal::InternalError, AppError},
    gateway::{InitializeRequest, PaymentGateway, Verification},
    mailer::Mailer,
    middleware::policy::{authorize, Action, Resource},
    model::{
        course::Course,
        enrollment::{EnrollOutcome, Enrollment, EnrollmentDetail, EnrollmentWithCourse, Settlement},
        payment::{CreatePaymentParam, SettlePaymentParam},
        user::User,
    },
    service::notification::NotificationService,
};

const ALREADY_ENROLLED: &str = "You are already enrolled in this course";

pub struct EnrollmentService<'a> {
    db: &'a DatabaseConnection,
    gateway: &'a dyn PaymentGateway,
    mailer: &'a dyn Mailer,
    currency: &'a str,
}

impl<'a> EnrollmentService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        gateway: &'a dyn PaymentGateway,
        mailer: &'a dyn Mailer,
        currency: &'a str,
    ) -> Self {
        Self {
            db,
            gateway,
            mailer,
            currency,
        }
    }

    /// Enrolls `user` in a course.
    ///
    /// An existing `failed` enrollment is reused: the checkout is restarted on the same row.
    /// Pending or completed enrollments conflict.
    ///
    /// # Returns
    /// - `Ok(EnrollOutcome)` - Completed enrollment (free) or pending enrollment with checkout
    /// - `Err(AuthError::EmailNotVerified)` - User has not verified their email
    /// - `Err(AppError::NotFound)` - Course does not exist
    /// - `Err(AppError::Conflict)` - User already holds a pending or completed enrollment
    /// - `Err(AppError::PaymentErr)` - Gateway refused or is unreachable; nothing was persisted
    pub async fn enroll(&self, user: &User, course_id: i32) -> Result<EnrollOutcome, AppError> {
        if !user.verified {
            return Err(AuthError::EmailNotVerified(user.id).into());
        }

        let course = CourseRepository::new(self.db)
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

        let existing = EnrollmentRepository::new(self.db)
            .find_by_user_and_course(user.id, course.id)
            .await?;
        let failed_id = match existing {
            Some(enrollment) if enrollment.payment_status == EnrollmentStatus::Failed => {
                Some(enrollment.id)
            }
            Some(_) => return Err(AppError::Conflict(ALREADY_ENROLLED.to_string())),
            None => None,
        };

        if course.is_free() {
            let enrollment = self.enroll_free(user, &course, failed_id).await?;
            tracing::info!("User {} enrolled in free course {}", user.id, course.id);

            NotificationService::new(self.mailer)
                .enrollment_confirmed(user, &course)
                .await;

            return Ok(EnrollOutcome {
                enrollment,
                checkout: None,
            });
        }

        let metadata = json!({ "course_id": course.id, "user_id": user.id });
        let checkout = self
            .gateway
            .initialize(InitializeRequest {
                amount: course.price,
                email: user.email.clone(),
                currency: self.currency.to_string(),
                metadata: metadata.clone(),
            })
            .await?;

        let txn = self.db.begin().await?;

        PaymentRepository::new(&txn)
            .create(CreatePaymentParam {
                user_id: user.id,
                reference: checkout.reference.clone(),
                amount: course.price,
                currency: self.currency.to_string(),
                metadata,
                raw_response: checkout.raw.clone(),
            })
            .await?;

        let enrollment_repo = EnrollmentRepository::new(&txn);
        let enrollment = match failed_id {
            None => enrollment_repo
                .create(
                    user.id,
                    course.id,
                    EnrollmentStatus::Pending,
                    Some(checkout.reference.clone()),
                )
                .await
                .map_err(|e| AppError::conflict_on_unique(e, ALREADY_ENROLLED))?,
            Some(enrollment_id) => {
                if !enrollment_repo
                    .reopen(enrollment_id, checkout.reference.clone())
                    .await?
                {
                    return Err(AppError::Conflict(ALREADY_ENROLLED.to_string()));
                }
                enrollment_repo.find_by_id(enrollment_id).await?.ok_or(
                    InternalError::MissingAfterWrite {
                        entity: "enrollment",
                        id: enrollment_id,
                    },
                )?
            }
        };

        txn.commit().await?;

        tracing::info!(
            "User {} started checkout {} for course {}",
            user.id,
            checkout.reference,
            course.id
        );

        Ok(EnrollOutcome {
            enrollment,
            checkout: Some(checkout),
        })
    }

    async fn enroll_free(
        &self,
        user: &User,
        course: &Course,
        failed_id: Option<i32>,
    ) -> Result<Enrollment, AppError> {
        let txn = self.db.begin().await?;

        if let Some(enrollment_id) = failed_id {
            EnrollmentRepository::new(&txn).delete(enrollment_id).await?;
        }

        let enrollment = EnrollmentRepository::new(&txn)
            .create(user.id, course.id, EnrollmentStatus::Completed, None)
            .await
            .map_err(|e| AppError::conflict_on_unique(e, ALREADY_ENROLLED))?;

        txn.commit().await?;

        Ok(enrollment)
    }

    /// Finalizes the enrollment paid for under `reference`.
    ///
    /// Already settled enrollments are returned as they are, without contacting the gateway.
    ///
    /// # Returns
    /// - `Ok(Settlement)` - Persisted status after the call
    /// - `Err(AppError::NotFound)` - No enrollment of `user_id` carries this reference
    /// - `Err(AppError::PaymentErr)` - Gateway verification failed
    pub async fn complete_after_payment(
        &self,
        user_id: i32,
        reference: &str,
    ) -> Result<Settlement, AppError> {
        let enrollment = EnrollmentRepository::new(self.db)
            .find_by_reference_for_user(reference, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Enrollment not found".to_string()))?;

        if enrollment.payment_status != EnrollmentStatus::Pending {
            return Ok(Settlement {
                status: enrollment.payment_status,
                enrollment,
                newly_settled: false,
            });
        }

        let verification = self.gateway.verify(reference).await?;

        self.apply_verification(user_id, &verification)
            .await?
            .ok_or_else(|| AppError::NotFound("Enrollment not found".to_string()))
    }

    /// Applies a gateway verification to the payment and to the enrollment of `user_id`
    /// linked by the same reference.
    ///
    /// Both rows move out of `pending` only through conditional updates in one transaction.
    /// A still-in-flight verification changes nothing.
    ///
    /// # Returns
    /// - `Ok(Some(Settlement))` - An enrollment is linked to the reference
    /// - `Ok(None)` - Standalone payment; only the payment row was settled
    pub async fn apply_verification(
        &self,
        user_id: i32,
        verification: &Verification,
    ) -> Result<Option<Settlement>, AppError> {
        let reference = verification.reference.as_str();

        let Some(settle) = SettlePaymentParam::from_verification(verification) else {
            let enrollment = EnrollmentRepository::new(self.db)
                .find_by_reference_for_user(reference, user_id)
                .await?;
            return Ok(enrollment.map(|enrollment| Settlement {
                status: enrollment.payment_status,
                enrollment,
                newly_settled: false,
            }));
        };

        let target = if settle.status == PaymentStatus::Success {
            EnrollmentStatus::Completed
        } else {
            EnrollmentStatus::Failed
        };

        let txn = self.db.begin().await?;

        if !PaymentRepository::new(&txn).settle(reference, settle).await? {
            tracing::debug!("Payment {} was already settled", reference);
        }

        let enrollment_repo = EnrollmentRepository::new(&txn);
        let Some(enrollment) = enrollment_repo
            .find_by_reference_for_user(reference, user_id)
            .await?
        else {
            txn.commit().await?;
            return Ok(None);
        };

        let newly_settled = enrollment_repo.settle(enrollment.id, target).await?;
        let enrollment = enrollment_repo.find_by_id(enrollment.id).await?.ok_or(
            InternalError::MissingAfterWrite {
                entity: "enrollment",
                id: enrollment.id,
            },
        )?;

        txn.commit().await?;

        if newly_settled {
            tracing::info!(
                "Enrollment {} settled as {:?} by payment {}",
                enrollment.id,
                enrollment.payment_status,
                reference
            );

            if enrollment.is_completed() {
                self.send_confirmation(&enrollment).await?;
            }
        }

        Ok(Some(Settlement {
            status: enrollment.payment_status,
            enrollment,
            newly_settled,
        }))
    }

    async fn send_confirmation(&self, enrollment: &Enrollment) -> Result<(), AppError> {
        let user = UserRepository::new(self.db)
            .find_by_id(enrollment.user_id)
            .await?;
        let course = CourseRepository::new(self.db)
            .find_by_id(enrollment.course_id)
            .await?;

        if let (Some(user), Some(course)) = (user, course) {
            NotificationService::new(self.mailer)
                .enrollment_confirmed(&user, &course)
                .await;
        }

        Ok(())
    }

    /// Removes the caller's enrollment in a course together with its progress. No refund.
    ///
    /// # Returns
    /// - `Ok(())` - Enrollment deleted
    /// - `Err(AppError::NotFound)` - Caller is not enrolled in the course
    pub async fn unenroll(&self, user: &User, course_id: i32) -> Result<(), AppError> {
        let enrollment = EnrollmentRepository::new(self.db)
            .find_by_user_and_course(user.id, course_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Enrollment not found".to_string()))?;

        let txn = self.db.begin().await?;
        EnrollmentRepository::new(&txn).delete(enrollment.id).await?;
        txn.commit().await?;

        tracing::info!("User {} unenrolled from course {}", user.id, course_id);

        Ok(())
    }

    /// Gets the caller's enrollments with course summaries, newest first.
    pub async fn my_enrollments(&self, user: &User) -> Result<Vec<EnrollmentWithCourse>, AppError> {
        let enrollments = EnrollmentRepository::new(self.db)
            .get_by_user(user.id)
            .await?;

        with_courses(self.db, enrollments).await
    }

    /// Gets every enrollment in the courses owned by `actor`.
    pub async fn admin_enrollments(&self, actor: &User) -> Result<Vec<EnrollmentDetail>, AppError> {
        authorize(actor, Resource::Platform, Action::Read)?;

        let course_ids = CourseRepository::new(self.db)
            .get_ids_by_owner(actor.id)
            .await?;
        let enrollments = EnrollmentRepository::new(self.db)
            .get_by_courses(&course_ids, None)
            .await?;

        with_details(self.db, enrollments).await
    }

    /// Gets the enrollments of one course. Only the course owner may list them.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - Course does not exist
    /// - `Err(AppError::AuthErr(AccessDenied))` - Caller does not own the course
    pub async fn course_enrollments(
        &self,
        actor: &User,
        course_id: i32,
    ) -> Result<Vec<EnrollmentDetail>, AppError> {
        let course = CourseRepository::new(self.db)
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

        authorize(
            actor,
            Resource::CourseRoster {
                owner_id: course.created_by,
            },
            Action::Read,
        )?;

        let enrollments = EnrollmentRepository::new(self.db)
            .get_by_courses(&[course.id], None)
            .await?;

        with_details(self.db, enrollments).await
    }

    /// Gets all enrollments of one learner.
    pub async fn user_enrollments(
        &self,
        actor: &User,
        user_id: i32,
    ) -> Result<Vec<EnrollmentWithCourse>, AppError> {
        authorize(actor, Resource::Platform, Action::Read)?;

        UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let enrollments = EnrollmentRepository::new(self.db)
            .get_by_user(user_id)
            .await?;

        with_courses(self.db, enrollments).await
    }

    /// Deletes an enrollment in a course owned by `actor`.
    pub async fn delete_enrollment(&self, actor: &User, enrollment_id: i32) -> Result<(), AppError> {
        let enrollment = EnrollmentRepository::new(self.db)
            .find_by_id(enrollment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Enrollment not found".to_string()))?;
        let course = CourseRepository::new(self.db)
            .find_by_id(enrollment.course_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

        authorize(
            actor,
            Resource::CourseRoster {
                owner_id: course.created_by,
            },
            Action::Delete,
        )?;

        let txn = self.db.begin().await?;
        EnrollmentRepository::new(&txn).delete(enrollment.id).await?;
        txn.commit().await?;

        tracing::info!(
            "Admin {} deleted enrollment {} of user {}",
            actor.id,
            enrollment.id,
            enrollment.user_id
        );

        Ok(())
    }

    /// Emails an announcement to every learner with a completed enrollment in the course.
    ///
    /// # Returns
    /// - `Ok((recipients, delivered))` - Number of learners addressed and accepted deliveries
    pub async fn notify_course(
        &self,
        actor: &User,
        course_id: i32,
        subject: &str,
        message: &str,
    ) -> Result<(usize, usize), AppError> {
        let course = CourseRepository::new(self.db)
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

        authorize(
            actor,
            Resource::CourseRoster {
                owner_id: course.created_by,
            },
            Action::Create,
        )?;

        let user_ids = EnrollmentRepository::new(self.db)
            .get_completed_user_ids(course.id)
            .await?;
        let recipients = UserRepository::new(self.db).find_by_ids(&user_ids).await?;

        let delivered = NotificationService::new(self.mailer)
            .course_announcement(&course, &recipients, subject, message)
            .await;

        tracing::info!(
            "Announcement for course {} delivered to {}/{} learners",
            course.id,
            delivered,
            recipients.len()
        );

        Ok((recipients.len(), delivered))
    }
}

pub(crate) async fn with_courses(
    db: &DatabaseConnection,
    enrollments: Vec<Enrollment>,
) -> Result<Vec<EnrollmentWithCourse>, AppError> {
    let course_ids: Vec<i32> = enrollments.iter().map(|e| e.course_id).collect();
    let courses: HashMap<i32, Course> = CourseRepository::new(db)
        .find_by_ids(&course_ids)
        .await?
        .into_iter()
        .map(|course| (course.id, course))
        .collect();

    Ok(enrollments
        .into_iter()
        .filter_map(|enrollment| {
            let course = courses.get(&enrollment.course_id)?.clone();
            Some(EnrollmentWithCourse { enrollment, course })
        })
        .collect())
}

pub(crate) async fn with_details(
    db: &DatabaseConnection,
    enrollments: Vec<Enrollment>,
) -> Result<Vec<EnrollmentDetail>, AppError> {
    let user_ids: Vec<i32> = enrollments.iter().map(|e| e.user_id).collect();
    let course_ids: Vec<i32> = enrollments.iter().map(|e| e.course_id).collect();

    let users: HashMap<i32, User> = UserRepository::new(db)
        .find_by_ids(&user_ids)
        .await?
        .into_iter()
        .map(|user| (user.id, user))
        .collect();
    let courses: HashMap<i32, Course> = CourseRepository::new(db)
        .find_by_ids(&course_ids)
        .await?
        .into_iter()
        .map(|course| (course.id, course))
        .collect();

    Ok(enrollments
        .into_iter()
        .filter_map(|enrollment| {
            let user = users.get(&enrollment.user_id)?.clone();
            let course = courses.get(&enrollment.course_id)?.clone();
            Some(EnrollmentDetail {
                enrollment,
                user,
                course,
            })
        })
        .collect())
}
