mod model;
mod server;

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::server::{
    config::Config,
    error::AppError,
    mailer::{LogMailer, Mailer},
    router,
    scheduler::payment_reconciliation,
    service::admin::code::AdminCodeService,
    startup,
    state::AppState,
    util::jwt::JwtManager,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    startup::init_tracing(config.log_json);

    let db = startup::connect_to_database(&config).await?;
    let gateway = startup::setup_payment_gateway(&config)?;
    let mailer: Arc<dyn Mailer> = Arc::new(LogMailer);
    let jwt = JwtManager::new(config.jwt_secret.as_bytes(), config.jwt_ttl_secs);

    let admin_code_service = AdminCodeService::new();

    tracing::info!("Starting server");

    // Prints a claim code if no admin exists yet
    startup::check_for_admin(&db, &config, &admin_code_service).await?;

    let scheduler_db = db.clone();
    let scheduler_gateway = gateway.clone();
    let scheduler_mailer = mailer.clone();
    let scheduler_currency = config.payment_currency.clone();
    let reconcile_after = config.reconcile_pending_after_minutes;
    tokio::spawn(async move {
        if let Err(e) = payment_reconciliation::start_scheduler(
            scheduler_db,
            scheduler_gateway,
            scheduler_mailer,
            scheduler_currency,
            reconcile_after,
        )
        .await
        {
            tracing::error!("Payment reconciliation scheduler error: {}", e);
        }
    });

    let state = AppState::new(db, gateway, mailer, jwt, admin_code_service, &config);
    let app = router::router().with_state(state);

    let listener = TcpListener::bind(config.bind_address.as_str()).await?;
    tracing::info!("Listening on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to listen for SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
