//! Heart Relay - turns Heart Matrix tile events into notification emails.
//!
//! ## Architecture
//!
//! ```text
//! HTTP request → web (axum) → relay::Relay → email::Mailer (Resend) → inbox
//! ```
//!
//! The relay keeps no state between requests. Each GET sends a fixed test
//! email, each POST sends one email describing the tile event and the
//! client that produced it.

pub mod config;
pub mod email;
pub mod relay;
pub mod util;
pub mod web;

// Re-export commonly used types
pub use config::{Config, EmailSettings};
pub use email::{Mailer, OutboundMessage, ResendMailer, SendError, SendReceipt};
pub use relay::{HandlerResponse, InboundEvent, Relay, RelayError, Submission};
pub use web::AppState;
