//! Argon2id hashing for passwords and one-time codes.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::server::error::{internal::InternalError, AppError};

/// Hashes a secret using argon2id with a random salt.
pub fn hash_secret(secret: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|e| InternalError::PasswordHash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verifies a secret against a stored argon2 hash.
///
/// A malformed stored hash counts as a mismatch.
pub fn verify_secret(secret: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!("Stored hash could not be parsed: {}", e);
            false
        }
    }
}
