//! Application state shared across all request handlers.
//!
//! The state is built once during startup and cloned into every handler through Axum's
//! state extraction. External collaborators (payment gateway, mailer) are held as trait
//! objects so tests and alternative transports can be swapped in without touching handlers.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::server::{
    gateway::PaymentGateway, mailer::Mailer, service::admin::code::AdminCodeService,
    util::jwt::JwtManager,
};

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone: the database handle is a pool, the collaborators are
/// behind `Arc`, and `AdminCodeService` shares its code through an inner `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Payment provider used for checkout and verification.
    pub gateway: Arc<dyn PaymentGateway>,

    /// Outgoing email transport.
    pub mailer: Arc<dyn Mailer>,

    /// Issues and validates bearer tokens.
    pub jwt: JwtManager,

    /// Holds the one-time admin bootstrap code, if any.
    pub admin_code_service: AdminCodeService,

    /// Public base URL of this API, used for emailed verification links.
    pub app_url: String,

    /// Base URL of the web client, target of the payment callback redirect.
    pub frontend_url: String,

    /// Secret key used to check webhook signatures.
    pub paystack_secret: String,

    /// Currency used for course checkouts.
    pub payment_currency: String,
}

impl AppState {
    /// Creates the application state from its already initialized parts.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `gateway` - Payment provider
    /// - `mailer` - Outgoing email transport
    /// - `jwt` - Token manager
    /// - `admin_code_service` - Admin bootstrap code holder
    /// - `config` - Loaded configuration, source of URLs and payment settings
    pub fn new(
        db: DatabaseConnection,
        gateway: Arc<dyn PaymentGateway>,
        mailer: Arc<dyn Mailer>,
        jwt: JwtManager,
        admin_code_service: AdminCodeService,
        config: &crate::server::config::Config,
    ) -> Self {
        Self {
            db,
            gateway,
            mailer,
            jwt,
            admin_code_service,
            app_url: config.app_url.clone(),
            frontend_url: config.frontend_url.clone(),
            paystack_secret: config.paystack_secret_key.clone(),
            payment_currency: config.payment_currency.clone(),
        }
    }
}
