//! One-time codes for email verification and password reset.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// Emailed verification codes and links stay valid for a day.
pub const VERIFICATION_CODE_TTL: Duration = Duration::hours(24);

/// Forgot-password codes are short lived.
pub const FORGOT_PASSWORD_CODE_TTL: Duration = Duration::minutes(5);

/// Six decimal digits, `100000..=999999`.
pub fn verification_code() -> String {
    rand::rng().random_range(100_000..1_000_000u32).to_string()
}

/// Six lowercase hex characters.
pub fn forgot_password_code() -> String {
    format!("{:06x}", rand::rng().random_range(0..0x100_0000u32))
}

/// 32 random bytes, hex encoded, for the emailed verification link.
pub fn link_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    hex::encode(bytes)
}

/// Whether a code issued at `issued_at` has outlived `ttl` at `now`.
pub fn is_expired(issued_at: DateTime<Utc>, ttl: Duration, now: DateTime<Utc>) -> bool {
    now - issued_at > ttl
}
