use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::auth::{AuthGuard, Permission},
    util::jwt::JwtManager,
};
use test_utils::{builder::TestBuilder, factory};

mod require;

const SECRET: &[u8] = b"middleware-test-secret";

fn jwt() -> JwtManager {
    JwtManager::new(SECRET, 3600)
}

fn bearer(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );
    headers
}

fn token_for(jwt: &JwtManager, user: &entity::user::Model) -> String {
    let role = if user.role == entity::sea_orm_active_enums::Role::Admin {
        "admin"
    } else {
        "learner"
    };
    jwt.issue(user.id, user.token_version, role, user.verified)
        .unwrap()
}
