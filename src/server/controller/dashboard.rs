use axum::{extract::State, http::HeaderMap, response::IntoResponse, Json};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        dashboard::{AdminAnalyticsDto, AdminDashboardDto, UserAnalyticsDto, UserDashboardDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::dashboard::DashboardService,
        state::AppState,
    },
};

/// Tag for grouping dashboard endpoints in OpenAPI documentation
pub static DASHBOARD_TAG: &str = "dashboard";

/// Learner dashboard: profile, enrollments with course summaries and engagement stats.
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = DASHBOARD_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Learner dashboard", body = ApiResponse<UserDashboardDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn user_dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let dashboard = DashboardService::new(&state.db).user_dashboard(&user).await?;

    Ok(Json(ApiResponse::data(dashboard.into_dto())))
}

/// Learner analytics with the real progress of every enrolled course.
#[utoipa::path(
    get,
    path = "/api/analytics",
    tag = DASHBOARD_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Learner analytics", body = ApiResponse<UserAnalyticsDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn user_analytics(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let analytics = DashboardService::new(&state.db).user_analytics(&user).await?;

    Ok(Json(ApiResponse::data(analytics.into_dto())))
}

/// Platform overview for admins.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    tag = DASHBOARD_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Admin dashboard", body = ApiResponse<AdminDashboardDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn admin_dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Admin])
        .await?;

    let dashboard = DashboardService::new(&state.db).admin_dashboard(&user).await?;

    Ok(Json(ApiResponse::data(dashboard.into_dto())))
}

/// Platform-wide totals for admins.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    get,
    path = "/api/admin/analytics",
    tag = DASHBOARD_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Admin analytics", body = ApiResponse<AdminAnalyticsDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "User is not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn admin_analytics(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Admin])
        .await?;

    let analytics = DashboardService::new(&state.db).admin_analytics(&user).await?;

    Ok(Json(ApiResponse::data(analytics.into_dto())))
}
