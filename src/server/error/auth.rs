use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Request carried no `Authorization: Bearer` header.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("Missing bearer token")]
    MissingToken,

    /// Token failed signature, expiry or format validation.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("Invalid bearer token: {0}")]
    InvalidToken(String),

    /// Token was issued before the user's last sign out or password change.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("Token for user {0} has been revoked")]
    StaleToken(i32),

    /// Token subject no longer exists in the database.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("User {0} from token not found in database")]
    UserNotInDatabase(i32),

    /// Email and password did not match a user.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Signed in user has not verified their email yet.
    ///
    /// Results in a 403 Forbidden response.
    #[error("User {0} has not verified their email")]
    EmailNotVerified(i32),

    /// User lacks the role or ownership required for the action.
    ///
    /// Results in a 403 Forbidden response.
    ///
    /// # Fields
    /// - User ID that was denied
    /// - Server-side reason, logged but not returned to the client
    #[error("User {0} denied access: {1}")]
    AccessDenied(i32, String),
}

/// Converts authentication errors into HTTP responses.
///
/// Token and credential failures map to 401 with a generic message so that callers cannot
/// tell which part of the check failed. Authorization failures map to 403. Details are
/// logged at debug level.
///
/// # Returns
/// - 401 Unauthorized - For missing, invalid or revoked tokens and bad credentials
/// - 403 Forbidden - For unverified accounts and denied access
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::MissingToken => (StatusCode::UNAUTHORIZED, "Authentication required"),
            Self::InvalidToken(_) | Self::StaleToken(_) | Self::UserNotInDatabase(_) => {
                (StatusCode::UNAUTHORIZED, "Invalid or expired token")
            }
            Self::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid email or password"),
            Self::EmailNotVerified(_) => (StatusCode::FORBIDDEN, "Please verify your email first"),
            Self::AccessDenied(_, _) => (
                StatusCode::FORBIDDEN,
                "You do not have permission to perform this action",
            ),
        };

        (status, Json(ErrorDto::new(message))).into_response()
    }
}
