//! Runtime configuration utilities for coin-convert.

use std::{env, path::PathBuf};

use serde::Deserialize;
use tracing::warn;

/// Production origin of the CoinMarketCap pro API.
pub const DEFAULT_API_BASE_URL: &str = "https://pro-api.coinmarketcap.com";

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Key sent as `X-CMC_PRO_API_KEY`; requests go out unauthenticated without it.
    pub api_key: Option<String>,
    /// Upstream origin, without a trailing slash.
    pub api_base_url: String,
    /// Stylesheet and other assets served under `/`.
    pub static_dir: PathBuf,
}

/// `static/` next to the crate manifest, independent of the working directory.
pub fn default_static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static")
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let api_key = env::var("X_CMC_PRO_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            warn!("X_CMC_PRO_API_KEY is not set; upstream calls will be rejected");
        }
        let api_base_url =
            env::var("CMC_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        let mut settings = Self::new(api_key, api_base_url);
        if let Ok(dir) = env::var("STATIC_DIR") {
            settings.static_dir = PathBuf::from(dir);
        }
        Ok(settings)
    }

    pub fn new(api_key: Option<String>, api_base_url: impl Into<String>) -> Self {
        let api_base_url = api_base_url.into().trim_end_matches('/').to_string();
        Self {
            api_key,
            api_base_url,
            static_dir: default_static_dir(),
        }
    }
}
