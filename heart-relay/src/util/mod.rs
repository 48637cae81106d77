//! Request metadata helpers.

pub mod client_ip;
pub mod user_agent;

pub use client_ip::client_ip;
pub use user_agent::{classify, ClientInfo};
