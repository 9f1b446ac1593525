use axum::http::{header::AUTHORIZATION, HeaderMap};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::User,
    util::jwt::JwtManager,
};

pub enum Permission {
    /// User has the admin role.
    Admin,
    /// User has verified their email.
    Verified,
}

/// Authenticates a request from its `Authorization: Bearer` header.
///
/// The token only identifies the user. Role, verification state and token version are
/// always read from the database so that revocations and role changes apply immediately.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    jwt: &'a JwtManager,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, jwt: &'a JwtManager, headers: &'a HeaderMap) -> Self {
        Self { db, jwt, headers }
    }

    /// Authenticates the caller and checks every permission in `permissions`.
    ///
    /// # Returns
    /// - `Ok(User)` - Fresh user record of the caller
    /// - `Err(AuthError::MissingToken)` - No bearer token present
    /// - `Err(AuthError::InvalidToken)` - Bad signature, expired or malformed token
    /// - `Err(AuthError::UserNotInDatabase)` - Token subject was deleted
    /// - `Err(AuthError::StaleToken)` - Token predates a sign out or password change
    /// - `Err(AuthError::AccessDenied)` - Admin required but user is a learner
    /// - `Err(AuthError::EmailNotVerified)` - Verification required but user is unverified
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let token = bearer_token(self.headers).ok_or(AuthError::MissingToken)?;

        let claims = self
            .jwt
            .validate(token)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        let user_repo = UserRepository::new(self.db);
        let Some(user) = user_repo.find_by_id(claims.sub).await? else {
            return Err(AuthError::UserNotInDatabase(claims.sub).into());
        };

        if claims.ver != user.token_version {
            return Err(AuthError::StaleToken(user.id).into());
        }

        for permission in permissions {
            match permission {
                Permission::Admin => {
                    if !user.is_admin() {
                        return Err(AuthError::AccessDenied(
                            user.id,
                            "User attempted an admin-only action without the admin role"
                                .to_string(),
                        )
                        .into());
                    }
                }
                Permission::Verified => {
                    if !user.verified {
                        return Err(AuthError::EmailNotVerified(user.id).into());
                    }
                }
            }
        }

        Ok(user)
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
