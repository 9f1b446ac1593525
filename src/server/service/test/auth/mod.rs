use crate::server::{
    error::{auth::AuthError, AppError},
    mailer::recording::RecordingMailer,
    model::{
        auth::{ChangePasswordParam, ResetPasswordParam},
        user::{SignupParam, User},
    },
    service::auth::AuthService,
    util::{jwt::JwtManager, password::hash_secret},
};
use entity::sea_orm_active_enums::RegistrantType;
use test_utils::{builder::TestBuilder, factory};

mod password;
mod signin;
mod signup;
mod verification;

const APP_URL: &str = "http://localhost:8080";
const PASSWORD: &str = "Secret123";

fn jwt() -> JwtManager {
    JwtManager::new(b"auth-service-test-secret", 3600)
}

fn signup_param(email: &str, phone_number: &str) -> SignupParam {
    SignupParam {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: email.to_string(),
        phone_number: phone_number.to_string(),
        registrant_type: RegistrantType::Individual,
        password: PASSWORD.to_string(),
    }
}

/// Pulls the secret following `marker` out of an email body.
fn secret_after(body: &str, marker: &str) -> String {
    body.split(marker)
        .nth(1)
        .unwrap()
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect()
}
