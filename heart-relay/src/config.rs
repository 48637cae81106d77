//! Configuration module for environment variable parsing.
//!
//! Everything is read once at startup. The email credential and destination
//! are validated into [`EmailSettings`] when the relay is built, so request
//! handling never touches the process environment.

use std::env;

/// Sender used when `FROM_EMAIL` is not set.
pub const DEFAULT_FROM_ADDRESS: &str = "Heart Matrix <onboarding@resend.dev>";

/// Resend API base used when `RESEND_API_URL` is not set.
pub const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// Resend API key (required to send anything)
    pub resend_api_key: Option<String>,

    /// Destination address for every relayed event (required)
    pub to_email: Option<String>,

    /// `From` header for outbound messages
    pub from_email: String,

    /// Base URL of the Resend API
    pub resend_api_url: String,
}

/// The validated pair of values the relay needs before it may send mail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailSettings {
    pub api_key: String,
    pub to: String,
    pub from: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Config {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8888),

            resend_api_key: non_empty_var("RESEND_API_KEY"),

            to_email: non_empty_var("TO_EMAIL"),

            from_email: non_empty_var("FROM_EMAIL")
                .unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string()),

            resend_api_url: non_empty_var("RESEND_API_URL")
                .unwrap_or_else(|| DEFAULT_RESEND_API_URL.to_string()),
        }
    }

    /// Returns the email settings, or `None` when the API key or the
    /// destination address is missing.
    pub fn email_settings(&self) -> Option<EmailSettings> {
        match (&self.resend_api_key, &self.to_email) {
            (Some(api_key), Some(to)) => Some(EmailSettings {
                api_key: api_key.clone(),
                to: to.clone(),
                from: self.from_email.clone(),
            }),
            _ => None,
        }
    }
}

/// Read a variable, treating an empty or whitespace-only value as unset.
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: Option<&str>, to: Option<&str>) -> Config {
        Config {
            port: 8888,
            resend_api_key: api_key.map(str::to_string),
            to_email: to.map(str::to_string),
            from_email: DEFAULT_FROM_ADDRESS.to_string(),
            resend_api_url: DEFAULT_RESEND_API_URL.to_string(),
        }
    }

    #[test]
    fn test_email_settings_complete() {
        let settings = config(Some("re_123"), Some("me@example.com"))
            .email_settings()
            .unwrap();

        assert_eq!(settings.api_key, "re_123");
        assert_eq!(settings.to, "me@example.com");
        assert_eq!(settings.from, DEFAULT_FROM_ADDRESS);
    }

    #[test]
    fn test_email_settings_missing_either_value() {
        assert!(config(None, Some("me@example.com")).email_settings().is_none());
        assert!(config(Some("re_123"), None).email_settings().is_none());
        assert!(config(None, None).email_settings().is_none());
    }

    #[test]
    fn test_non_empty_var() {
        env::set_var("HEART_RELAY_TEST_BLANK", "   ");
        env::set_var("HEART_RELAY_TEST_SET", " value ");
        assert_eq!(non_empty_var("HEART_RELAY_TEST_BLANK"), None);
        assert_eq!(non_empty_var("HEART_RELAY_TEST_SET"), Some("value".to_string()));
        assert_eq!(non_empty_var("HEART_RELAY_TEST_UNSET"), None);
        env::remove_var("HEART_RELAY_TEST_BLANK");
        env::remove_var("HEART_RELAY_TEST_SET");
    }
}
