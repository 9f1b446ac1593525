use std::str::FromStr;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_APP_URL: &str = "http://localhost:3000";
const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";
const PAYSTACK_BASE_URL: &str = "https://api.paystack.co";
const DEFAULT_CURRENCY: &str = "NGN";

pub struct Config {
    pub database_url: String,
    pub bind_address: String,

    /// Public base URL of this API, used in emailed verification links.
    pub app_url: String,
    /// Base URL of the web client, target of the payment callback redirect.
    pub frontend_url: String,

    pub jwt_secret: String,
    pub jwt_ttl_secs: i64,

    pub paystack_secret_key: String,
    pub paystack_base_url: String,
    pub paystack_callback_url: String,
    pub payment_currency: String,
    pub gateway_timeout_secs: u64,
    pub gateway_max_retries: u32,

    /// Pending enrollments older than this are re-verified by the reconciliation job.
    pub reconcile_pending_after_minutes: i64,

    pub log_json: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let app_url = optional("APP_URL", DEFAULT_APP_URL);
        let frontend_url = optional("FRONTEND_URL", DEFAULT_FRONTEND_URL);
        let paystack_callback_url = std::env::var("PAYSTACK_CALLBACK_URL")
            .unwrap_or_else(|_| format!("{}/api/payments/callback", app_url));

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            bind_address: optional("BIND_ADDRESS", DEFAULT_BIND_ADDRESS),
            app_url,
            frontend_url,
            jwt_secret: required("JWT_SECRET")?,
            jwt_ttl_secs: parsed("JWT_TTL_SECS", 86_400)?,
            paystack_secret_key: required("PAYSTACK_SECRET_KEY")?,
            paystack_base_url: optional("PAYSTACK_BASE_URL", PAYSTACK_BASE_URL),
            paystack_callback_url,
            payment_currency: optional("PAYMENT_CURRENCY", DEFAULT_CURRENCY),
            gateway_timeout_secs: parsed("GATEWAY_TIMEOUT_SECS", 10)?,
            gateway_max_retries: parsed("GATEWAY_MAX_RETRIES", 2)?,
            reconcile_pending_after_minutes: parsed("RECONCILE_PENDING_AFTER_MINUTES", 15)?,
            log_json: parsed("LOG_JSON", false)?,
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parsed<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}
