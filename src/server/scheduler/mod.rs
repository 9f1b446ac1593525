//! Background jobs driven by `tokio-cron-scheduler`.

pub mod payment_reconciliation;
