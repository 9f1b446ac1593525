//! Bearer token issuance and validation.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried by an access token.
///
/// Role and verification state are informational only; the auth guard always reloads the
/// user and compares `ver` against the stored `token_version`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub jti: String,
    pub sub: i32,
    pub ver: i32,
    pub role: String,
    pub verified: bool,
    pub iat: i64,
    pub exp: i64,
}

/// Manages JWT creation and validation with a shared HMAC secret.
#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
}

impl JwtManager {
    pub fn new(secret: &[u8], ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl_secs,
        }
    }

    /// Lifetime of issued tokens in seconds.
    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Issues a token for the given user state.
    ///
    /// # Arguments
    /// - `user_id` - Token subject
    /// - `token_version` - Current token version of the user, invalidates the token once bumped
    /// - `role` - Role name at issuance time
    /// - `verified` - Verification state at issuance time
    pub fn issue(
        &self,
        user_id: i32,
        token_version: i32,
        role: &str,
        verified: bool,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = now_secs();
        let claims = Claims {
            jti: uuid::Uuid::new_v4().to_string(),
            sub: user_id,
            ver: token_version,
            role: role.to_string(),
            verified,
            iat: now,
            exp: now + self.ttl_secs,
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
    }

    /// Validates signature and expiry and returns the claims.
    pub fn validate(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let data =
            jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &Validation::default())?;
        Ok(data.claims)
    }
}

fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}
