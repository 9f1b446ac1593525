use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect},
    Json,
};
use url::Url;
use validator::Validate;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, MessageDto},
        enrollment::{
            AdminEnrollmentDto, EnrollResultDto, EnrollmentWithCourseDto, NotifyCourseDto,
            NotifyResultDto, PaymentCallbackQuery,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::enrollment::{EnrollmentDetail, EnrollmentWithCourse},
        service::enrollment::EnrollmentService,
        state::AppState,
    },
};

/// Tag for grouping enrollment endpoints in OpenAPI documentation
pub static ENROLLMENT_TAG: &str = "enrollment";

fn enrollment_service(state: &AppState) -> EnrollmentService<'_> {
    EnrollmentService::new(
        &state.db,
        state.gateway.as_ref(),
        state.mailer.as_ref(),
        &state.payment_currency,
    )
}

/// Enroll the caller in a course.
///
/// Free courses complete immediately. Paid courses return a pending enrollment together with
/// the checkout URL the learner must visit; the enrollment completes once the payment is
/// confirmed by the webhook, verification endpoint or reconciliation job. A previously failed
/// enrollment is re-opened with a fresh checkout.
///
/// # Access Control
/// - `Verified` - Only learners with a verified email can enroll
///
/// # Returns
/// - `201 Created` - Enrollment created (completed or pending with checkout)
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - Email not verified
/// - `404 Not Found` - Course does not exist
/// - `409 Conflict` - Already enrolled, or a checkout is already pending
/// - `502 Bad Gateway` / `503 Service Unavailable` - Checkout could not be opened
#[utoipa::path(
    post,
    path = "/api/enroll/{course_id}",
    tag = ENROLLMENT_TAG,
    security(("bearer" = [])),
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 201, description = "Enrollment created", body = ApiResponse<EnrollResultDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Email not verified", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto),
        (status = 409, description = "Already enrolled", body = ErrorDto),
        (status = 502, description = "Payment gateway rejected the checkout", body = ErrorDto),
        (status = 503, description = "Payment gateway unavailable", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn enroll(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(course_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Verified])
        .await?;

    let outcome = enrollment_service(&state).enroll(&user, course_id).await?;

    let message = if outcome.checkout.is_some() {
        "Complete the payment to finish enrolling"
    } else {
        "Enrolled"
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(message, outcome.into_dto())),
    ))
}

/// The caller's enrollments with course summaries, newest first.
#[utoipa::path(
    get,
    path = "/api/my-enrollments",
    tag = ENROLLMENT_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Enrollments of the caller", body = ApiResponse<Vec<EnrollmentWithCourseDto>>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn my_enrollments(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let enrollments = enrollment_service(&state).my_enrollments(&user).await?;

    let dto: Vec<EnrollmentWithCourseDto> = enrollments
        .into_iter()
        .map(EnrollmentWithCourse::into_dto)
        .collect();
    Ok((StatusCode::OK, Json(ApiResponse::data(dto))))
}

/// Leave a course. Module progress in the course is discarded.
#[utoipa::path(
    delete,
    path = "/api/unenroll/{course_id}",
    tag = ENROLLMENT_TAG,
    security(("bearer" = [])),
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Unenrolled", body = MessageDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 404, description = "Not enrolled in the course", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn unenroll(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(course_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    enrollment_service(&state).unenroll(&user, course_id).await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Unenrolled"))))
}

/// Return point of the hosted checkout.
///
/// Does not settle anything itself; it forwards the payer to the web client's verification
/// page, which calls `GET /api/verify/{reference}`.
///
/// # Returns
/// - `303 See Other` - Redirect to `{FRONTEND_URL}/verify-payment?reference=...`
#[utoipa::path(
    get,
    path = "/api/payments/callback",
    tag = ENROLLMENT_TAG,
    params(PaymentCallbackQuery),
    responses(
        (status = 303, description = "Redirect to the payment verification page"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn payment_callback(
    State(state): State<AppState>,
    Query(query): Query<PaymentCallbackQuery>,
) -> Result<impl IntoResponse, AppError> {
    let base = format!("{}/verify-payment", state.frontend_url.trim_end_matches('/'));
    let target = Url::parse_with_params(&base, &[("reference", query.reference.as_str())])
        .map_err(|e| AppError::InternalError(format!("Invalid frontend URL {}: {}", base, e)))?;

    Ok(Redirect::to(target.as_str()))
}

/// All enrollments in courses created by the caller, newest first.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    get,
    path = "/api/admin/enrollments",
    tag = ENROLLMENT_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Enrollments in the caller's courses", body = ApiResponse<Vec<AdminEnrollmentDto>>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn admin_enrollments(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Admin])
        .await?;

    let enrollments = enrollment_service(&state).admin_enrollments(&user).await?;

    Ok((StatusCode::OK, Json(ApiResponse::data(details_into_dto(enrollments)))))
}

/// Roster of one course.
///
/// # Access Control
/// - `Admin` - Only the admin who created the course
#[utoipa::path(
    get,
    path = "/api/admin/enrollments/{id}",
    tag = ENROLLMENT_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Enrollments in the course", body = ApiResponse<Vec<AdminEnrollmentDto>>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller does not own the course", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn course_enrollments(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(course_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Admin])
        .await?;

    let enrollments = enrollment_service(&state)
        .course_enrollments(&user, course_id)
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::data(details_into_dto(enrollments)))))
}

/// Enrollments of one learner.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    get,
    path = "/api/admin/enrollments/user/{user_id}",
    tag = ENROLLMENT_TAG,
    security(("bearer" = [])),
    params(("user_id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Enrollments of the learner", body = ApiResponse<Vec<EnrollmentWithCourseDto>>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn user_enrollments(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Admin])
        .await?;

    let enrollments = enrollment_service(&state)
        .user_enrollments(&user, user_id)
        .await?;

    let dto: Vec<EnrollmentWithCourseDto> = enrollments
        .into_iter()
        .map(EnrollmentWithCourse::into_dto)
        .collect();
    Ok((StatusCode::OK, Json(ApiResponse::data(dto))))
}

/// Remove a learner's enrollment from a course.
///
/// # Access Control
/// - `Admin` - Only the admin who created the course
#[utoipa::path(
    delete,
    path = "/api/admin/enrollments/{id}",
    tag = ENROLLMENT_TAG,
    security(("bearer" = [])),
    params(("id" = i32, Path, description = "Enrollment ID")),
    responses(
        (status = 200, description = "Enrollment deleted", body = MessageDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller does not own the course", body = ErrorDto),
        (status = 404, description = "Enrollment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_enrollment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(enrollment_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Admin])
        .await?;

    enrollment_service(&state)
        .delete_enrollment(&user, enrollment_id)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Enrollment deleted"))))
}

/// Email an announcement to every learner with a completed enrollment in the course.
///
/// Delivery failures for individual recipients are logged and counted, not returned as
/// errors.
///
/// # Access Control
/// - `Admin` - Only the admin who created the course
#[utoipa::path(
    post,
    path = "/api/admin/courses/{course_id}/notify",
    tag = ENROLLMENT_TAG,
    security(("bearer" = [])),
    params(("course_id" = i32, Path, description = "Course ID")),
    request_body = NotifyCourseDto,
    responses(
        (status = 200, description = "Announcement sent", body = ApiResponse<NotifyResultDto>),
        (status = 400, description = "Empty subject or message", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Caller does not own the course", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn notify_course(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(course_id): Path<i32>,
    Json(payload): Json<NotifyCourseDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Admin])
        .await?;
    payload.validate()?;

    let (recipients, delivered) = enrollment_service(&state)
        .notify_course(&user, course_id, &payload.subject, &payload.message)
        .await?;

    let dto = NotifyResultDto {
        recipients: recipients as u64,
        delivered: delivered as u64,
    };
    Ok((StatusCode::OK, Json(ApiResponse::data(dto))))
}

fn details_into_dto(enrollments: Vec<EnrollmentDetail>) -> Vec<AdminEnrollmentDto> {
    enrollments
        .into_iter()
        .map(EnrollmentDetail::into_dto)
        .collect()
}
