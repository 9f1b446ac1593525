use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        progress::{CourseProgressDto, ModuleCompletionDto},
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, service::progress::ProgressService,
        state::AppState,
    },
};

/// Tag for grouping progress endpoints in OpenAPI documentation
pub static PROGRESS_TAG: &str = "progress";

/// Mark a module complete for the caller.
///
/// Requires a completed enrollment in the module's course.
///
/// # Returns
/// - `201 Created` - Completion recorded
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - Not enrolled, or enrollment not yet paid
/// - `404 Not Found` - Module does not exist
/// - `409 Conflict` - Module already completed
#[utoipa::path(
    post,
    path = "/api/progress/complete/{module_id}",
    tag = PROGRESS_TAG,
    security(("bearer" = [])),
    params(("module_id" = i32, Path, description = "Module ID")),
    responses(
        (status = 201, description = "Module marked complete", body = ApiResponse<ModuleCompletionDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "No completed enrollment in the course", body = ErrorDto),
        (status = 404, description = "Module not found", body = ErrorDto),
        (status = 409, description = "Module already completed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn complete_module(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(module_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let completion = ProgressService::new(&state.db)
        .mark_module_complete(&user, module_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Module marked as complete",
            completion.into_dto(),
        )),
    ))
}

/// Caller's progress through a course as a rounded percentage of completed modules.
#[utoipa::path(
    get,
    path = "/api/progress/course/{course_id}",
    tag = PROGRESS_TAG,
    security(("bearer" = [])),
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course progress", body = ApiResponse<CourseProgressDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not enrolled in the course", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn course_progress(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(course_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let progress = ProgressService::new(&state.db)
        .course_progress(&user, course_id)
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::data(progress.into_dto()))))
}
