use super::{DeliveryReceipt, EmailMessage, Notifier, NotifyError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.resend.com";

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

/// Error body returned by the provider on non-2xx responses.
#[derive(Deserialize)]
struct ProviderError {
    message: String,
}

/// Sends email through the Resend HTTP API.
///
/// Without an API key every send fails with [`NotifyError::NotConfigured`],
/// which lets the service run locally with notifications switched off.
pub struct ResendNotifier {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl ResendNotifier {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, NotifyError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|key| !key.is_empty()),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl Notifier for ResendNotifier {
    async fn send(&self, message: &EmailMessage) -> Result<DeliveryReceipt, NotifyError> {
        let api_key = self.api_key.as_deref().ok_or(NotifyError::NotConfigured)?;

        let body = SendEmailRequest {
            from: &message.from,
            to: [&message.to],
            subject: &message.subject,
            html: &message.html,
            reply_to: message.reply_to.as_deref(),
        };

        let response = self
            .client
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<DeliveryReceipt>().await?);
        }

        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Err(NotifyError::Unauthorized(status.as_u16()));
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ProviderError>(&text)
            .map(|error| error.message)
            .unwrap_or(text);

        Err(NotifyError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
