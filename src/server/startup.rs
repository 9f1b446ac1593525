use std::{sync::Arc, time::Duration};

use sea_orm::DatabaseConnection;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::server::{
    config::Config,
    data::user::UserRepository,
    error::{internal::InternalError, AppError},
    gateway::{paystack::PaystackGateway, PaymentGateway},
    service::admin::code::AdminCodeService,
};

const DEFAULT_LOG_FILTER: &str = "coursehub=info,tower_http=info";

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter. With `log_json` set, log lines are emitted as
/// structured JSON instead of the human-readable format.
pub fn init_tracing(log_json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
    );

    if log_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then runs all pending SeaORM migrations so the schema is up-to-date before
/// the first request is served.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the Paystack gateway from configuration.
///
/// The gateway owns an HTTP client with a per-request timeout and redirects disabled.
pub fn setup_payment_gateway(config: &Config) -> Result<Arc<dyn PaymentGateway>, AppError> {
    let gateway = PaystackGateway::new(
        &config.paystack_base_url,
        &config.paystack_secret_key,
        &config.paystack_callback_url,
        Duration::from_secs(config.gateway_timeout_secs),
        config.gateway_max_retries,
    )
    .map_err(InternalError::HttpClient)?;

    Ok(Arc::new(gateway))
}

/// Generates an admin claim code when no admin account exists yet.
///
/// The code is written to the log together with the endpoint that redeems it. A signed-in,
/// verified learner exchanges it for the admin role.
///
/// # Arguments
/// - `db` - Database connection
/// - `config` - Application configuration, for the printed URL
/// - `admin_code_service` - Holder of the generated code
pub async fn check_for_admin(
    db: &DatabaseConnection,
    config: &Config,
    admin_code_service: &AdminCodeService,
) -> Result<(), AppError> {
    let user_repo = UserRepository::new(db);

    if user_repo.admin_exists().await? {
        return Ok(());
    }

    let code = admin_code_service.generate().await;

    tracing::info!(
        "No admin account found. Sign in and POST {{\"code\": \"{}\"}} to {}/api/admin/claim to become admin",
        code,
        config.app_url
    );

    Ok(())
}
