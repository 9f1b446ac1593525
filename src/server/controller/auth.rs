use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, MessageDto},
        auth::{
            AuthTokenDto, ChangePasswordDto, EmailDto, ResetPasswordDto, SigninDto, SignupDto,
            VerificationCodeDto, VerifyEmailQuery,
        },
        user::UserDto,
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{
            auth::{ChangePasswordParam, ResetPasswordParam},
            user::SignupParam,
        },
        service::auth::AuthService,
        state::AppState,
    },
};

/// Tag for grouping auth endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

fn auth_service(state: &AppState) -> AuthService<'_> {
    AuthService::new(&state.db, &state.jwt, state.mailer.as_ref(), &state.app_url)
}

/// Registers a new learner account.
///
/// Validates the signup form, stores the account unverified and emails a verification
/// link. Email and phone number must not already be registered.
///
/// # Access Control
/// - Public
///
/// # Returns
/// - `201 Created` - Account created, verification link sent
/// - `400 Bad Request` - Invalid signup data
/// - `409 Conflict` - Email or phone number already registered
#[utoipa::path(
    post,
    path = "/api/signup",
    tag = AUTH_TAG,
    request_body = SignupDto,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<UserDto>),
        (status = 400, description = "Invalid signup data", body = ErrorDto),
        (status = 409, description = "Email or phone number already registered", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupDto>,
) -> Result<impl IntoResponse, AppError> {
    let param = SignupParam::from_dto(payload)?;

    let user = auth_service(&state).signup(param).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Account created, check your email to verify it",
            user.into_dto(),
        )),
    ))
}

/// Signs in with email and password.
///
/// # Returns
/// - `200 OK` - Bearer token and profile summary
/// - `401 Unauthorized` - Unknown email or wrong password
#[utoipa::path(
    post,
    path = "/api/signin",
    tag = AUTH_TAG,
    request_body = SigninDto,
    responses(
        (status = 200, description = "Signed in", body = ApiResponse<AuthTokenDto>),
        (status = 401, description = "Invalid credentials", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn signin(
    State(state): State<AppState>,
    Json(payload): Json<SigninDto>,
) -> Result<impl IntoResponse, AppError> {
    let token = auth_service(&state)
        .signin(&payload.email, &payload.password)
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::data(token.into_dto()))))
}

/// Signs out by revoking every token issued to the caller.
///
/// # Access Control
/// - Authenticated users
///
/// # Returns
/// - `200 OK` - All outstanding tokens revoked
/// - `401 Unauthorized` - Missing, invalid or stale token
#[utoipa::path(
    post,
    path = "/api/signout",
    tag = AUTH_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Signed out", body = MessageDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn signout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    auth_service(&state).signout(&user).await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Signed out"))))
}

/// Returns the currently authenticated user.
///
/// The profile is read fresh from the database, so role and verification changes show up
/// without signing in again.
///
/// # Returns
/// - `200 OK` - Current user
/// - `401 Unauthorized` - Missing, invalid or stale token
#[utoipa::path(
    get,
    path = "/api/me",
    tag = AUTH_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::data(user.into_dto()))))
}

/// Verifies an account from the link emailed at signup.
///
/// # Access Control
/// - Public; the token in the link authenticates the request
///
/// # Returns
/// - `200 OK` - Account verified
/// - `400 Bad Request` - Token wrong or expired, or account already verified
/// - `404 Not Found` - No account with that email
#[utoipa::path(
    get,
    path = "/api/verify-email",
    tag = AUTH_TAG,
    params(VerifyEmailQuery),
    responses(
        (status = 200, description = "Account verified", body = ApiResponse<UserDto>),
        (status = 400, description = "Invalid or expired link", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn verify_email(
    State(state): State<AppState>,
    Query(query): Query<VerifyEmailQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = auth_service(&state)
        .verify_email_link(&query.email, &query.token)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::with_message("Email verified", user.into_dto())),
    ))
}

/// Emails a fresh 6-digit verification code to the caller.
///
/// # Access Control
/// - Authenticated, unverified users
///
/// # Returns
/// - `200 OK` - Code sent
/// - `400 Bad Request` - Account already verified
/// - `401 Unauthorized` - User not authenticated
#[utoipa::path(
    patch,
    path = "/api/send-verification-code",
    tag = AUTH_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Code sent", body = MessageDto),
        (status = 400, description = "Account already verified", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn send_verification_code(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    auth_service(&state).send_verification_code(&user).await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Verification code sent"))))
}

/// Verifies the caller's account with an emailed code.
///
/// # Access Control
/// - Authenticated, unverified users
///
/// # Returns
/// - `200 OK` - Account verified
/// - `400 Bad Request` - Code wrong or expired, or account already verified
/// - `401 Unauthorized` - User not authenticated
#[utoipa::path(
    patch,
    path = "/api/verify-verification-code",
    tag = AUTH_TAG,
    security(("bearer" = [])),
    request_body = VerificationCodeDto,
    responses(
        (status = 200, description = "Account verified", body = ApiResponse<UserDto>),
        (status = 400, description = "Invalid or expired code", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn verify_verification_code(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<VerificationCodeDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let user = auth_service(&state)
        .verify_verification_code(&user, &payload.code)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::with_message("Email verified", user.into_dto())),
    ))
}

/// Emails a new verification link, replacing any outstanding link or code.
///
/// # Returns
/// - `200 OK` - Link sent
/// - `400 Bad Request` - Account already verified
/// - `401 Unauthorized` - User not authenticated
#[utoipa::path(
    patch,
    path = "/api/resend-verification-link",
    tag = AUTH_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Link sent", body = MessageDto),
        (status = 400, description = "Account already verified", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn resend_verification_link(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    auth_service(&state).resend_verification_link(&user).await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Verification link sent"))))
}

/// Changes the caller's password.
///
/// Every previously issued token stops validating; the response carries a fresh one.
///
/// # Access Control
/// - Authenticated users
///
/// # Returns
/// - `200 OK` - Password changed, new token issued
/// - `400 Bad Request` - New password invalid or confirmation mismatch
/// - `401 Unauthorized` - Not authenticated or old password wrong
#[utoipa::path(
    patch,
    path = "/api/change-password",
    tag = AUTH_TAG,
    security(("bearer" = [])),
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password changed", body = ApiResponse<AuthTokenDto>),
        (status = 400, description = "Invalid password", body = ErrorDto),
        (status = 401, description = "Not authenticated or old password wrong", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn change_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ChangePasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let param = ChangePasswordParam::from_dto(payload)?;
    let token = auth_service(&state).change_password(&user, param).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::with_message("Password changed", token.into_dto())),
    ))
}

/// Emails a short-lived password reset code.
///
/// # Returns
/// - `200 OK` - Code sent
/// - `404 Not Found` - No account with that email
#[utoipa::path(
    patch,
    path = "/api/send-forgot-password-code",
    tag = AUTH_TAG,
    request_body = EmailDto,
    responses(
        (status = 200, description = "Code sent", body = MessageDto),
        (status = 400, description = "Invalid email", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn send_forgot_password_code(
    State(state): State<AppState>,
    Json(payload): Json<EmailDto>,
) -> Result<impl IntoResponse, AppError> {
    auth_service(&state)
        .send_forgot_password_code(&payload.email)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Password reset code sent"))))
}

/// Resets a password with the emailed code.
///
/// # Returns
/// - `200 OK` - Password reset; existing tokens are revoked
/// - `400 Bad Request` - Code wrong or expired, or password invalid
/// - `404 Not Found` - No account with that email
#[utoipa::path(
    patch,
    path = "/api/verify-forgot-password-code",
    tag = AUTH_TAG,
    request_body = ResetPasswordDto,
    responses(
        (status = 200, description = "Password reset", body = MessageDto),
        (status = 400, description = "Invalid code or password", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn verify_forgot_password_code(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let param = ResetPasswordParam::from_dto(payload)?;

    auth_service(&state).reset_password(param).await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Password has been reset"))))
}
