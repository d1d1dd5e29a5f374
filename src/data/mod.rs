//! Upstream pricing provider: wire shapes and HTTP client.

pub mod cmc;
pub mod types;
