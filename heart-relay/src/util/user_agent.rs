//! User agent classification.
//!
//! Each category is an ordered table of `(substring, label)` rules. The first
//! rule whose substring occurs in the user agent wins; categories are
//! evaluated independently of each other.

/// Ordered substring rules for a single category.
pub type Rules = &'static [(&'static str, &'static str)];

pub const DEVICE_RULES: Rules = &[
    ("iPhone", "iPhone"),
    ("Android", "Android"),
    ("Windows", "Windows PC"),
    ("Macintosh", "Mac"),
];

pub const OS_RULES: Rules = &[
    ("iPhone OS", "iOS"),
    ("Android", "Android"),
    ("Windows NT", "Windows"),
    ("Mac OS X", "macOS"),
];

// Chrome must come before Safari: Chrome user agents also carry "Safari".
pub const BROWSER_RULES: Rules = &[
    ("Chrome", "Chrome"),
    ("Safari", "Safari"),
    ("Firefox", "Firefox"),
];

pub const UNKNOWN_DEVICE: &str = "Unknown device";
pub const UNKNOWN_OS: &str = "Unknown OS";
pub const UNKNOWN_BROWSER: &str = "Unknown browser";

/// Client metadata derived from a user agent string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientInfo {
    pub device: &'static str,
    pub os: &'static str,
    pub browser: &'static str,
}

/// Return the label of the first rule matching `user_agent`, or `default`.
pub fn first_match(user_agent: &str, rules: Rules, default: &'static str) -> &'static str {
    rules
        .iter()
        .find(|(needle, _)| user_agent.contains(needle))
        .map(|(_, label)| *label)
        .unwrap_or(default)
}

/// Classify a user agent into device, OS and browser.
pub fn classify(user_agent: &str) -> ClientInfo {
    ClientInfo {
        device: first_match(user_agent, DEVICE_RULES, UNKNOWN_DEVICE),
        os: first_match(user_agent, OS_RULES, UNKNOWN_OS),
        browser: first_match(user_agent, BROWSER_RULES, UNKNOWN_BROWSER),
    }
}
