use axum::{extract::State, http::HeaderMap, response::IntoResponse, Json};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        user::{ClaimAdminDto, UserDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::admin::AdminService,
        state::AppState,
    },
};

/// Tag for grouping admin bootstrap endpoints in OpenAPI documentation
pub static ADMIN_TAG: &str = "admin";

/// Claim the admin role with the one-time code printed at startup.
///
/// The code is only generated while no admin exists and expires after 15 minutes. The role is
/// read from the database on every request, so the caller's current token keeps working.
///
/// # Access Control
/// - `Verified`
///
/// # Returns
/// - `200 OK` - Caller is now an admin
/// - `401 Unauthorized` - User not authenticated
/// - `403 Forbidden` - Email not verified, or code invalid or expired
#[utoipa::path(
    post,
    path = "/api/admin/claim",
    tag = ADMIN_TAG,
    security(("bearer" = [])),
    request_body = ClaimAdminDto,
    responses(
        (status = 200, description = "Admin role granted", body = ApiResponse<UserDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Invalid or expired code", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn claim_admin(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ClaimAdminDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Verified])
        .await?;

    let admin = AdminService::new(&state.db, &state.admin_code_service)
        .claim(&user, &payload.code)
        .await?;

    Ok(Json(ApiResponse::with_message(
        "Admin role granted",
        admin.into_dto(),
    )))
}
