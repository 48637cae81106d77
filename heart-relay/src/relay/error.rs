use axum::http::{Method, StatusCode};
use thiserror::Error;
use tracing::{error, warn};

use crate::email::SendError;

use super::event::HandlerResponse;

/// Terminal failures of one invocation. None of them are retried.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Missing RESEND_API_KEY or TO_EMAIL")]
    ConfigurationMissing,

    #[error("Method {0} not allowed")]
    MethodNotAllowed(Method),

    #[error("Invalid submission payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error(transparent)]
    Send(#[from] SendError),
}

impl RelayError {
    /// Log the failure and turn it into the response for a request made
    /// with `method`.
    pub fn into_response(self, method: &Method) -> HandlerResponse {
        match self {
            RelayError::ConfigurationMissing => {
                error!(method = %method, "relay_config_missing");
                HandlerResponse::internal_error("Missing email config")
            }
            RelayError::MethodNotAllowed(ref m) => {
                warn!(method = %m, "relay_method_not_allowed");
                HandlerResponse::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
            }
            other if *method == Method::GET => {
                error!(error = %other, "relay_test_email_failed");
                HandlerResponse::internal_error(format!("Failed to send test email: {}", other))
            }
            other => {
                error!(error = %other, "relay_submission_failed");
                HandlerResponse::internal_error(format!("ERR: {}", other))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_missing_response() {
        let response = RelayError::ConfigurationMissing.into_response(&Method::POST);
        assert_eq!(response.status_code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body, "Missing email config");
    }

    #[test]
    fn test_method_not_allowed_response() {
        let response =
            RelayError::MethodNotAllowed(Method::DELETE).into_response(&Method::DELETE);
        assert_eq!(response.status_code, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.body, "Method not allowed");
    }

    #[test]
    fn test_send_failure_wording_depends_on_method() {
        let provider = || SendError::Provider {
            status: 401,
            body: "bad key".to_string(),
        };

        let get = RelayError::from(provider()).into_response(&Method::GET);
        assert_eq!(get.status_code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(get.body, "Failed to send test email: Resend error 401: bad key");

        let post = RelayError::from(provider()).into_response(&Method::POST);
        assert_eq!(post.status_code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(post.body, "ERR: Resend error 401: bad key");
    }
}
