//! Resend API client.
//!
//! Reference: https://resend.com/docs/api-reference/emails/send-email

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{error, info};
use url::Url;

use super::{Mailer, OutboundMessage, SendError, SendReceipt};

/// Successful `POST /emails` response body.
#[derive(Debug, Deserialize)]
struct ResendResponse {
    id: Option<String>,
}

/// Sends mail through the Resend HTTP API.
///
/// Every call is a single attempt with the client's default timeouts.
#[derive(Debug, Clone)]
pub struct ResendMailer {
    client: Client,
    endpoint: Url,
}

impl ResendMailer {
    /// Create a mailer that posts to `<base_url>/emails`.
    pub fn new(client: Client, base_url: &str) -> Result<Self, url::ParseError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base.join("emails")?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(
        &self,
        api_key: &str,
        message: &OutboundMessage,
    ) -> Result<SendReceipt, SendError> {
        info!(
            endpoint = %self.endpoint,
            subject = %message.subject,
            recipients = message.to.len(),
            text_length = message.text.len(),
            "resend_send_starting"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(api_key)
            .json(message)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, is_timeout = e.is_timeout(), "resend_transport_error");
                SendError::Transport(e)
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(
                status_code = status.as_u16(),
                body = %body,
                "resend_send_rejected"
            );
            return Err(SendError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let id = serde_json::from_str::<ResendResponse>(&body)
            .ok()
            .and_then(|r| r.id);

        info!(
            status_code = status.as_u16(),
            email_id = ?id,
            "resend_send_complete"
        );

        Ok(SendReceipt { id })
    }
}
