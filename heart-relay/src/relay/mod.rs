//! The event handler.
//!
//! One [`InboundEvent`] in, one [`HandlerResponse`] out:
//!
//! ```text
//! GET   → fixed test email       → 200 "Test email sent"
//! POST  → tile event email       → 200 "OK"
//! other →                          405 "Method not allowed"
//! ```
//!
//! Missing email configuration short-circuits every method to 500 before
//! anything else happens. Each accepted request makes exactly one send
//! attempt.

pub mod error;
pub mod event;

use std::sync::Arc;

use axum::http::Method;
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::info;

use crate::config::EmailSettings;
use crate::email::{Mailer, OutboundMessage, SendReceipt};
use crate::util::{classify, client_ip, ClientInfo};

pub use error::RelayError;
pub use event::{HandlerResponse, InboundEvent, Submission};

pub const TEST_SUBJECT: &str = "Heart Matrix test email ✅";
pub const TEST_TEXT: &str = "If you received this, Resend + the relay are wired correctly.";
pub const SUBJECT_PREFIX: &str = "Heart Matrix - ";

/// Everything that goes into the body of a tile event email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetails {
    pub key: String,
    pub value: String,
    pub session: String,
    pub ip: String,
    pub client: ClientInfo,
    pub time: String,
}

impl EventDetails {
    /// Collect the details of a POST from its payload, headers and the
    /// time it was received.
    pub fn collect(submission: &Submission, event: &InboundEvent, now: DateTime<Utc>) -> Self {
        Self {
            key: submission.key().to_string(),
            value: submission.value_text(),
            session: submission.session().to_string(),
            ip: client_ip(&event.headers),
            client: classify(event.user_agent()),
            time: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn subject(&self) -> String {
        format!("{}{}", SUBJECT_PREFIX, self.key)
    }

    pub fn text(&self) -> String {
        format!(
            "New Heart Matrix event 💗\n\
             \n\
             Tile: {}\n\
             Value: {}\n\
             \n\
             Session: {}\n\
             IP: {}\n\
             Device: {}\n\
             OS: {}\n\
             Browser: {}\n\
             Time: {}",
            self.key,
            self.value,
            self.session,
            self.ip,
            self.client.device,
            self.client.os,
            self.client.browser,
            self.time,
        )
    }
}

/// Relays Heart Matrix events to a single inbox.
pub struct Relay {
    settings: Option<EmailSettings>,
    mailer: Arc<dyn Mailer>,
}

impl Relay {
    /// `settings` is `None` when the credential or destination is missing;
    /// the relay then answers every request with 500.
    pub fn new(settings: Option<EmailSettings>, mailer: Arc<dyn Mailer>) -> Self {
        Self { settings, mailer }
    }

    pub fn is_configured(&self) -> bool {
        self.settings.is_some()
    }

    /// Handle one invocation, stamping POST events with the current time.
    pub async fn handle(&self, event: &InboundEvent) -> HandlerResponse {
        self.handle_at(event, Utc::now()).await
    }

    /// Handle one invocation as if it arrived at `now`.
    pub async fn handle_at(&self, event: &InboundEvent, now: DateTime<Utc>) -> HandlerResponse {
        info!(
            method = %event.method,
            has_body = event.body.is_some(),
            "relay_request_received"
        );

        match self.dispatch(event, now).await {
            Ok(body) => HandlerResponse::ok(body),
            Err(e) => e.into_response(&event.method),
        }
    }

    async fn dispatch(
        &self,
        event: &InboundEvent,
        now: DateTime<Utc>,
    ) -> Result<&'static str, RelayError> {
        let settings = self
            .settings
            .as_ref()
            .ok_or(RelayError::ConfigurationMissing)?;

        match event.method {
            Method::GET => {
                self.send_test(settings).await?;
                Ok("Test email sent")
            }
            Method::POST => {
                self.relay_submission(settings, event, now).await?;
                Ok("OK")
            }
            ref other => Err(RelayError::MethodNotAllowed(other.clone())),
        }
    }

    async fn send_test(&self, settings: &EmailSettings) -> Result<SendReceipt, RelayError> {
        let message = OutboundMessage::new(&settings.from, &settings.to, TEST_SUBJECT, TEST_TEXT);
        let receipt = self.mailer.send(&settings.api_key, &message).await?;

        info!(email_id = ?receipt.id, "relay_test_email_sent");

        Ok(receipt)
    }

    async fn relay_submission(
        &self,
        settings: &EmailSettings,
        event: &InboundEvent,
        now: DateTime<Utc>,
    ) -> Result<SendReceipt, RelayError> {
        let submission = Submission::parse(event.body.as_deref())?;
        let details = EventDetails::collect(&submission, event, now);

        info!(
            key = %details.key,
            session = %details.session,
            ip = %details.ip,
            device = details.client.device,
            os = details.client.os,
            browser = details.client.browser,
            "relay_submission_parsed"
        );

        let message = OutboundMessage::new(
            &settings.from,
            &settings.to,
            details.subject(),
            details.text(),
        );
        let receipt = self.mailer.send(&settings.api_key, &message).await?;

        info!(key = %details.key, email_id = ?receipt.id, "relay_submission_sent");

        Ok(receipt)
    }
}
