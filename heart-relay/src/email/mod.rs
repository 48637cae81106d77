//! Outbound email capability.
//!
//! The relay only knows about the [`Mailer`] trait. [`ResendMailer`] is the
//! production implementation backed by the Resend HTTP API.

pub mod resend;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

pub use resend::ResendMailer;

/// A message ready to hand to the email provider.
///
/// Serializes to the JSON body expected by `POST /emails`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
}

impl OutboundMessage {
    /// Build a plain-text message for a single recipient.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        subject: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: vec![to.into()],
            subject: subject.into(),
            text: text.into(),
        }
    }
}

/// Provider acknowledgement of an accepted message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendReceipt {
    /// Provider-assigned message id, when the response carried one
    pub id: Option<String>,
}

#[derive(Debug, Error)]
pub enum SendError {
    #[error("Resend error {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("HTTPS error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Something that can deliver an [`OutboundMessage`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one message, authenticating with `api_key`.
    async fn send(&self, api_key: &str, message: &OutboundMessage)
        -> Result<SendReceipt, SendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outbound_message_wire_format() {
        let message = OutboundMessage::new(
            "Heart Matrix <onboarding@resend.dev>",
            "me@example.com",
            "Heart Matrix - tile-3",
            "hello",
        );

        let json = serde_json::to_value(&message).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "from": "Heart Matrix <onboarding@resend.dev>",
                "to": ["me@example.com"],
                "subject": "Heart Matrix - tile-3",
                "text": "hello",
            })
        );
    }

    #[test]
    fn test_provider_error_display() {
        let err = SendError::Provider {
            status: 422,
            body: r#"{"message":"invalid to"}"#.to_string(),
        };
        assert_eq!(err.to_string(), r#"Resend error 422: {"message":"invalid to"}"#);
    }
}
