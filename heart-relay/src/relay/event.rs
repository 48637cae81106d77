//! Inbound event, submission payload and handler response types.

use axum::http::{header::USER_AGENT, HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value};

/// One HTTP invocation as seen by the relay.
///
/// Header lookups are case-insensitive because [`HeaderMap`] normalizes
/// names.
#[derive(Debug, Clone)]
pub struct InboundEvent {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl InboundEvent {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, name: &'static str, value: &'static str) -> Self {
        self.headers
            .insert(HeaderName::from_static(name), HeaderValue::from_static(value));
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// The `user-agent` header, or an empty string when absent.
    pub fn user_agent(&self) -> &str {
        self.headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }
}

/// Tile event posted by the Heart Matrix page.
///
/// Every field is optional; missing ones render as empty text. `session`
/// and `key` must be strings when present.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub session: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
}

impl Submission {
    /// Parse a request body. A missing or empty body is treated as `{}`;
    /// anything that is not a JSON object is rejected.
    pub fn parse(body: Option<&str>) -> Result<Self, serde_json::Error> {
        let raw = match body {
            Some(b) if !b.is_empty() => b,
            _ => "{}",
        };

        let object: Map<String, Value> = serde_json::from_str(raw)?;
        Submission::deserialize(Value::Object(object))
    }

    pub fn session(&self) -> &str {
        self.session.as_deref().unwrap_or("")
    }

    pub fn key(&self) -> &str {
        self.key.as_deref().unwrap_or("")
    }

    /// Strings render bare, `null` and missing render empty, everything
    /// else renders as compact JSON.
    pub fn value_text(&self) -> String {
        match &self.value {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// HTTP-shaped result of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerResponse {
    pub status_code: StatusCode,
    pub body: String,
}

impl HandlerResponse {
    pub fn new(status_code: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, body)
    }

    pub fn internal_error(body: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_submission() {
        let submission =
            Submission::parse(Some(r#"{"session":"s1","key":"tile-3","value":"yes"}"#)).unwrap();

        assert_eq!(submission.session(), "s1");
        assert_eq!(submission.key(), "tile-3");
        assert_eq!(submission.value_text(), "yes");
    }

    #[test]
    fn test_parse_missing_body_is_empty_object() {
        assert_eq!(Submission::parse(None).unwrap(), Submission::default());
        assert_eq!(Submission::parse(Some("")).unwrap(), Submission::default());
    }

    #[test]
    fn test_parse_ignores_unknown_fields() {
        let submission = Submission::parse(Some(r#"{"key":"k","extra":1}"#)).unwrap();
        assert_eq!(submission.key(), "k");
        assert_eq!(submission.session(), "");
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(Submission::parse(Some("{not json")).is_err());
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(Submission::parse(Some(r#"["s1","tile-3","yes"]"#)).is_err());
        assert!(Submission::parse(Some("42")).is_err());
    }

    #[test]
    fn test_parse_rejects_non_string_key() {
        assert!(Submission::parse(Some(r#"{"key":3}"#)).is_err());
        assert!(Submission::parse(Some(r#"{"session":{"id":1}}"#)).is_err());
    }

    #[test]
    fn test_value_text() {
        let with = |value: Value| Submission {
            value: Some(value),
            ..Submission::default()
        };

        assert_eq!(Submission::default().value_text(), "");
        assert_eq!(with(Value::Null).value_text(), "");
        assert_eq!(with(json!("yes")).value_text(), "yes");
        assert_eq!(with(json!(7)).value_text(), "7");
        assert_eq!(with(json!(true)).value_text(), "true");
        assert_eq!(with(json!({"a": [1, 2]})).value_text(), r#"{"a":[1,2]}"#);
    }

    #[test]
    fn test_user_agent_lookup() {
        let event = InboundEvent::new(Method::POST).with_header("user-agent", "Firefox/121.0");
        assert_eq!(event.user_agent(), "Firefox/121.0");
        assert_eq!(InboundEvent::new(Method::POST).user_agent(), "");
    }
}
