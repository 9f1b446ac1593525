//! One-time admin bootstrap code.
//!
//! When the server starts without any admin account it generates a code and prints it to the
//! log. The operator signs up as a regular learner and redeems the code through
//! `POST /api/admin/claim` to become the first admin. The code lives only in memory, expires
//! after `ADMIN_CODE_TTL` and can be redeemed once.

use rand::{distr::Alphanumeric, Rng};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// How long a generated admin code stays redeemable.
pub const ADMIN_CODE_TTL: Duration = Duration::from_secs(15 * 60);

const ADMIN_CODE_LENGTH: usize = 32;

#[derive(Clone)]
struct AdminCode {
    code: String,
    expires_at: Instant,
}

impl AdminCode {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Holds at most one pending admin code, shared across handlers through `AppState`.
#[derive(Clone)]
pub struct AdminCodeService {
    code: Arc<RwLock<Option<AdminCode>>>,
    ttl: Duration,
}

impl AdminCodeService {
    pub fn new() -> Self {
        Self::with_ttl(ADMIN_CODE_TTL)
    }

    /// Creates a service whose codes expire after `ttl`.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            code: Arc::new(RwLock::new(None)),
            ttl,
        }
    }

    /// Generates a fresh 32-character alphanumeric code, replacing any previous one.
    ///
    /// # Returns
    /// - `String` - The code to hand to the operator
    pub async fn generate(&self) -> String {
        let code: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(ADMIN_CODE_LENGTH)
            .map(char::from)
            .collect();

        *self.code.write().await = Some(AdminCode {
            code: code.clone(),
            expires_at: Instant::now() + self.ttl,
        });

        code
    }

    /// Redeems `input` against the stored code.
    ///
    /// A matching, unexpired code is consumed. An expired code is dropped. A mismatch leaves
    /// the stored code in place.
    ///
    /// # Returns
    /// - `true` - Code matched and has been consumed
    /// - `false` - No code, expired code or mismatch
    pub async fn validate_and_consume(&self, input: &str) -> bool {
        let mut slot = self.code.write().await;

        match slot.as_ref() {
            Some(stored) if stored.is_expired() => {
                *slot = None;
                false
            }
            Some(stored) if stored.code == input => {
                *slot = None;
                true
            }
            _ => false,
        }
    }

    /// Whether an unexpired code is waiting to be redeemed.
    #[cfg(test)]
    pub async fn has_valid_code(&self) -> bool {
        let slot = self.code.read().await;
        slot.as_ref().is_some_and(|stored| !stored.is_expired())
    }
}

impl Default for AdminCodeService {
    fn default() -> Self {
        Self::new()
    }
}
