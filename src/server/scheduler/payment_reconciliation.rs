use chrono::Duration;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::AppError, gateway::PaymentGateway, mailer::Mailer, service::payment::PaymentService,
};

/// Starts the payment reconciliation scheduler.
///
/// Runs every minute and re-verifies pending payments that were opened more than
/// `older_than_minutes` ago, settling them and their enrollments the same way a webhook
/// would. This recovers checkouts whose webhook never arrived.
///
/// # Arguments
/// - `db` - Database connection
/// - `gateway` - Payment provider queried for each stale payment
/// - `mailer` - Used for enrollment confirmations
/// - `currency` - Configured checkout currency
/// - `older_than_minutes` - Minimum age of a pending payment before it is re-verified
pub async fn start_scheduler(
    db: DatabaseConnection,
    gateway: Arc<dyn PaymentGateway>,
    mailer: Arc<dyn Mailer>,
    currency: String,
    older_than_minutes: i64,
) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let db = db.clone();
        let gateway = gateway.clone();
        let mailer = mailer.clone();
        let currency = currency.clone();

        Box::pin(async move {
            let service = PaymentService::new(&db, gateway.as_ref(), mailer.as_ref(), &currency);

            match service
                .reconcile_pending(Duration::minutes(older_than_minutes))
                .await
            {
                Ok(0) => {}
                Ok(settled) => tracing::info!("Reconciled {} pending payments", settled),
                Err(e) => tracing::error!("Error reconciling pending payments: {}", e),
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Payment reconciliation scheduler started");

    Ok(())
}
