//! Outgoing email.
//!
//! Delivery is an external collaborator. The default `LogMailer` writes messages to the
//! application log; a real transport implements `Mailer` the same way.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Failed to deliver email to {to}: {reason}")]
    Delivery { to: String, reason: String },
}

#[async_trait::async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: Email) -> Result<(), MailError>;
}

/// Mailer that logs each message instead of delivering it.
pub struct LogMailer;

#[async_trait::async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: Email) -> Result<(), MailError> {
        tracing::info!(to = %email.to, subject = %email.subject, "{}", email.body);
        Ok(())
    }
}
