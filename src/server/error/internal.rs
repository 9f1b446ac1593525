use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Password hashing failed.
    ///
    /// Argon2 only fails on malformed parameters, so this indicates a misconfigured hasher.
    /// Results in a 500 Internal Server Error with a generic message returned to client.
    #[error("Failed to hash password: {0}")]
    PasswordHash(String),

    /// Signing a JWT failed.
    #[error("Failed to encode token for user {user_id}: {source}")]
    TokenEncode {
        /// Subject of the token
        user_id: i32,
        /// The underlying encoding error
        #[source]
        source: jsonwebtoken::errors::Error,
    },

    /// A stored JSON column could not be serialized or parsed.
    #[error("Failed to (de)serialize stored JSON for {context}: {source}")]
    StoredJson {
        /// Which record and column was being processed
        context: String,
        /// The underlying serde error
        #[source]
        source: serde_json::Error,
    },

    /// A row read back right after being written was missing.
    #[error("{entity} {id} disappeared during the operation")]
    MissingAfterWrite {
        /// Entity name
        entity: &'static str,
        /// Primary key
        id: i32,
    },

    /// The outbound HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}
