//! Outbound notification emails for contact submissions.
//!
//! Delivery is best effort: [`Notifier::send`] reports failures as values and
//! the caller logs them. Nothing here retries.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Client for the Resend transactional-email HTTP API.
pub mod resend;

/// Subject line, category labels and HTML body for contact notifications.
pub mod template;

pub use resend::ResendNotifier;

/// A fully composed email, ready to hand to a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
}

/// Provider acknowledgement of an accepted message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeliveryReceipt {
    pub id: String,
}

/// Sender and recipient for contact notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailRouting {
    pub sender: String,
    pub recipient: String,
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("email provider is not configured")]
    NotConfigured,

    #[error("email provider did not answer in time")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("email provider rejected the credentials (status {0})")]
    Unauthorized(u16),

    #[error("email provider rejected the message (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("unexpected provider response: {0}")]
    InvalidResponse(String),

    #[error("failed to render notification: {0}")]
    Template(#[from] askama::Error),
}

impl From<reqwest::Error> for NotifyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NotifyError::Timeout
        } else if err.is_decode() {
            NotifyError::InvalidResponse(err.to_string())
        } else {
            NotifyError::Transport(err.to_string())
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<DeliveryReceipt, NotifyError>;
}
