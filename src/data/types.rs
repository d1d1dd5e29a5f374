//! Wire shapes returned by the CoinMarketCap pro API.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, BoolFromInt};

/// Status block attached to every upstream response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiStatus {
    pub timestamp: DateTime<Utc>,
    /// Non-zero means the upstream refused the request, whatever the HTTP status.
    pub error_code: i64,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub elapsed: f64,
    #[serde(default)]
    pub credit_count: i64,
    #[serde(default)]
    pub notice: Option<String>,
}

impl ApiStatus {
    pub fn is_ok(&self) -> bool {
        self.error_code == 0
    }
}

/// One entry of `/v1/cryptocurrency/map`.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyDescriptor {
    pub id: i64,
    pub rank: i64,
    pub name: String,
    pub symbol: String,
    pub slug: String,
    #[serde_as(as = "BoolFromInt")]
    pub is_active: bool,
    #[serde(default)]
    pub first_historical_data: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_historical_data: Option<DateTime<Utc>>,
    /// `null` for coins; tokens carry their host chain here.
    #[serde(default)]
    pub platform: Option<serde_json::Value>,
}

/// Price of the converted amount in one target currency.
///
/// Either field may come back `null` for thinly traded pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotePrice {
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Payload of `/v2/tools/price-conversion` for a single source id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionResult {
    pub id: i64,
    pub symbol: String,
    pub name: String,
    pub amount: f64,
    pub last_updated: DateTime<Utc>,
    /// Keyed by target currency id.
    pub quote: IndexMap<String, QuotePrice>,
}

impl ConversionResult {
    /// Price in `target_id`, or `None` when the upstream did not quote it.
    pub fn price_in(&self, target_id: &str) -> Option<f64> {
        self.quote.get(target_id).and_then(|quote| quote.price)
    }
}

/// `data` is absent on most rejected responses, so it stays optional here.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    pub status: ApiStatus,
}

pub type CurrencyResp = Envelope<Vec<CurrencyDescriptor>>;
pub type ConversionResp = Envelope<ConversionResult>;
