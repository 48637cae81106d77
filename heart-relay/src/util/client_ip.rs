//! Client IP resolution from request headers.

use axum::http::HeaderMap;

/// Headers consulted for the client address, highest priority first.
pub const CLIENT_IP_HEADERS: &[&str] = &["x-nf-client-connection-ip", "x-forwarded-for"];

/// Reported when no header carries an address.
pub const UNKNOWN_IP: &str = "Unknown IP";

/// Resolve the client IP from the first non-empty header in
/// [`CLIENT_IP_HEADERS`].
///
/// `x-forwarded-for` is reported verbatim, including any proxy chain.
pub fn client_ip(headers: &HeaderMap) -> String {
    CLIENT_IP_HEADERS
        .iter()
        .filter_map(|name| headers.get(*name))
        .filter_map(|value| value.to_str().ok())
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or(UNKNOWN_IP)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_platform_header_wins() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("10.0.0.1"));
        headers.insert("x-nf-client-connection-ip", HeaderValue::from_static("203.0.113.7"));

        assert_eq!(client_ip(&headers), "203.0.113.7");
    }

    #[test]
    fn test_falls_back_to_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("198.51.100.2, 10.0.0.1"));

        assert_eq!(client_ip(&headers), "198.51.100.2, 10.0.0.1");
    }

    #[test]
    fn test_empty_header_is_skipped() {
        let mut headers = HeaderMap::new();
        headers.insert("x-nf-client-connection-ip", HeaderValue::from_static(""));
        headers.insert("x-forwarded-for", HeaderValue::from_static("198.51.100.2"));

        assert_eq!(client_ip(&headers), "198.51.100.2");
    }

    #[test]
    fn test_unknown_when_absent() {
        assert_eq!(client_ip(&HeaderMap::new()), "Unknown IP");
    }
}
