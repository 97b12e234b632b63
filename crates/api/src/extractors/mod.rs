//! Request extractors.

pub mod api_key;
pub mod client_ip;

pub use api_key::ApiKeyAuth;
pub use client_ip::ClientIp;
