//! Account authentication: signup, sign in and out, email verification and password
//! management.
//!
//! Passwords, verification codes and link tokens are stored as argon2 hashes. Changing or
//! resetting the password bumps the token version, which revokes every token issued before.

use chrono::Utc;
use sea_orm::DatabaseConnection;
use url::Url;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, internal::InternalError, AppError},
    mailer::Mailer,
    model::{
        auth::{AuthToken, ChangePasswordParam, ResetPasswordParam},
        user::{CreateUserParam, SignupParam, User, UserCredentials},
    },
    service::notification::NotificationService,
    util::{
        code::{
            forgot_password_code, is_expired, link_token, verification_code,
            FORGOT_PASSWORD_CODE_TTL, VERIFICATION_CODE_TTL,
        },
        jwt::JwtManager,
        password::{hash_secret, verify_secret},
        validate,
    },
};

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    jwt: &'a JwtManager,
    mailer: &'a dyn Mailer,
    /// Public base URL used to build verification links.
    app_url: &'a str,
}

impl<'a> AuthService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        jwt: &'a JwtManager,
        mailer: &'a dyn Mailer,
        app_url: &'a str,
    ) -> Self {
        Self {
            db,
            jwt,
            mailer,
            app_url,
        }
    }

    /// Registers a new learner and emails a verification link.
    ///
    /// # Returns
    /// - `Ok(User)` - Created, unverified account
    /// - `Err(AppError::Conflict)` - Email or phone number already registered
    pub async fn signup(&self, param: SignupParam) -> Result<User, AppError> {
        let user_repo = UserRepository::new(self.db);

        if user_repo.email_taken(&param.email, None).await? {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }
        if user_repo.phone_taken(&param.phone_number, None).await? {
            return Err(AppError::Conflict("Phone number already exists".to_string()));
        }

        let token = link_token();
        let user = user_repo
            .create(CreateUserParam {
                first_name: param.first_name,
                last_name: param.last_name,
                email: param.email,
                phone_number: param.phone_number,
                registrant_type: param.registrant_type,
                password_hash: hash_secret(&param.password)?,
                verification_code_hash: Some(hash_secret(&token)?),
            })
            .await
            .map_err(|e| AppError::conflict_on_unique(e, "Email or phone number already exists"))?;

        tracing::info!("User {} signed up", user.id);

        let link = self.verification_link(&user, &token)?;
        NotificationService::new(self.mailer)
            .verification_link(&user, &link)
            .await;

        Ok(user)
    }

    /// Checks credentials and issues a bearer token.
    ///
    /// # Returns
    /// - `Err(AuthError::InvalidCredentials)` - Unknown email or wrong password
    pub async fn signin(&self, email: &str, password: &str) -> Result<AuthToken, AppError> {
        let email = email.trim().to_lowercase();
        let credentials = UserRepository::new(self.db)
            .find_credentials_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_secret(password, &credentials.password_hash) {
            return Err(AuthError::InvalidCredentials.into());
        }

        self.issue(credentials.user)
    }

    /// Revokes every token of `user`, including the one used for this request.
    pub async fn signout(&self, user: &User) -> Result<(), AppError> {
        UserRepository::new(self.db)
            .bump_token_version(user.id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(())
    }

    /// Emails a fresh 6-digit verification code, replacing any pending code or link.
    pub async fn send_verification_code(&self, user: &User) -> Result<(), AppError> {
        require_unverified(user)?;

        let code = verification_code();
        UserRepository::new(self.db)
            .set_verification_code(user.id, hash_secret(&code)?)
            .await?;

        NotificationService::new(self.mailer)
            .verification_code(user, &code)
            .await;

        Ok(())
    }

    /// Verifies the caller with an emailed code.
    ///
    /// # Returns
    /// - `Ok(User)` - Now verified account
    /// - `Err(AppError::BadRequest)` - Already verified, no code issued, expired or wrong code
    pub async fn verify_verification_code(&self, user: &User, code: &str) -> Result<User, AppError> {
        require_unverified(user)?;

        let credentials = UserRepository::new(self.db)
            .find_credentials_by_id(user.id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        self.check_verification_secret(&credentials, code.trim())?;
        self.mark_verified(user.id).await
    }

    /// Emails a fresh verification link, replacing any pending code or link.
    pub async fn resend_verification_link(&self, user: &User) -> Result<(), AppError> {
        require_unverified(user)?;

        let token = link_token();
        UserRepository::new(self.db)
            .set_verification_code(user.id, hash_secret(&token)?)
            .await?;

        let link = self.verification_link(user, &token)?;
        NotificationService::new(self.mailer)
            .verification_link(user, &link)
            .await;

        Ok(())
    }

    /// Verifies an account from the emailed link.
    pub async fn verify_email_link(&self, email: &str, token: &str) -> Result<User, AppError> {
        let email = validate::email(email)?;
        let credentials = UserRepository::new(self.db)
            .find_credentials_by_email(&email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        require_unverified(&credentials.user)?;
        self.check_verification_secret(&credentials, token)?;
        self.mark_verified(credentials.user.id).await
    }

    /// Changes the caller's password and returns a fresh token.
    ///
    /// # Returns
    /// - `Err(AuthError::InvalidCredentials)` - Old password does not match
    pub async fn change_password(
        &self,
        user: &User,
        param: ChangePasswordParam,
    ) -> Result<AuthToken, AppError> {
        let user_repo = UserRepository::new(self.db);
        let credentials = user_repo
            .find_credentials_by_id(user.id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if !verify_secret(&param.old_password, &credentials.password_hash) {
            return Err(AuthError::InvalidCredentials.into());
        }

        let user = user_repo
            .update_password(user.id, hash_secret(&param.new_password)?)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        tracing::info!("User {} changed their password", user.id);

        self.issue(user)
    }

    /// Emails a short-lived password reset code.
    pub async fn send_forgot_password_code(&self, email: &str) -> Result<(), AppError> {
        let email = validate::email(email)?;
        let user_repo = UserRepository::new(self.db);
        let user = user_repo
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let code = forgot_password_code();
        user_repo
            .set_forgot_password_code(user.id, hash_secret(&code)?)
            .await?;

        NotificationService::new(self.mailer)
            .forgot_password_code(&user, &code)
            .await;

        Ok(())
    }

    /// Resets the password with an emailed code. All existing tokens are revoked.
    pub async fn reset_password(&self, param: ResetPasswordParam) -> Result<(), AppError> {
        let user_repo = UserRepository::new(self.db);
        let credentials = user_repo
            .find_credentials_by_email(&param.email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let (Some(hash), Some(issued_at)) = (
            credentials.forgot_password_code_hash.as_deref(),
            credentials.forgot_password_code_issued_at,
        ) else {
            return Err(AppError::BadRequest(
                "No password reset code has been requested".to_string(),
            ));
        };
        if is_expired(issued_at, FORGOT_PASSWORD_CODE_TTL, Utc::now()) {
            return Err(AppError::BadRequest("Password reset code has expired".to_string()));
        }
        if !verify_secret(&param.code, hash) {
            return Err(AppError::BadRequest("Invalid password reset code".to_string()));
        }

        user_repo
            .update_password(credentials.user.id, hash_secret(&param.new_password)?)
            .await?;

        tracing::info!("User {} reset their password", credentials.user.id);

        Ok(())
    }

    fn issue(&self, user: User) -> Result<AuthToken, AppError> {
        let role = sea_orm::ActiveEnum::to_value(&user.role);
        let token = self
            .jwt
            .issue(user.id, user.token_version, &role, user.verified)
            .map_err(|source| InternalError::TokenEncode {
                user_id: user.id,
                source,
            })?;

        Ok(AuthToken {
            token,
            expires_in: self.jwt.ttl_secs(),
            user,
        })
    }

    fn check_verification_secret(
        &self,
        credentials: &UserCredentials,
        secret: &str,
    ) -> Result<(), AppError> {
        let (Some(hash), Some(issued_at)) = (
            credentials.verification_code_hash.as_deref(),
            credentials.verification_code_issued_at,
        ) else {
            return Err(AppError::BadRequest(
                "No verification code has been issued".to_string(),
            ));
        };

        if is_expired(issued_at, VERIFICATION_CODE_TTL, Utc::now()) {
            return Err(AppError::BadRequest(
                "Verification code has expired, please request a new one".to_string(),
            ));
        }
        if !verify_secret(secret, hash) {
            return Err(AppError::BadRequest("Invalid verification code".to_string()));
        }

        Ok(())
    }

    async fn mark_verified(&self, user_id: i32) -> Result<User, AppError> {
        let user = UserRepository::new(self.db)
            .mark_verified(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        tracing::info!("User {} verified their email", user.id);

        Ok(user)
    }

    fn verification_link(&self, user: &User, token: &str) -> Result<String, AppError> {
        let base = format!("{}/api/verify-email", self.app_url.trim_end_matches('/'));
        let params = [("token", token), ("email", user.email.as_str())];
        let url = Url::parse_with_params(&base, &params)
            .map_err(|e| AppError::InternalError(format!("Invalid APP_URL: {}", e)))?;

        Ok(url.into())
    }
}

fn require_unverified(user: &User) -> Result<(), AppError> {
    if user.verified {
        return Err(AppError::BadRequest("Account already verified".to_string()));
    }
    Ok(())
}
