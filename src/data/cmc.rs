//! CoinMarketCap pro API client for the two endpoints the converter reads.

use std::{fmt, time::Instant};

use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use urlencoding::encode;

use crate::{
    config::Settings,
    data::types::{ConversionResp, CurrencyResp, Envelope},
};

pub const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";
/// Size of the catalog offered in the pickers.
pub const CURRENCY_LIMIT: u32 = 30;
/// Amount of the source currency being converted.
pub const CONVERSION_AMOUNT: u32 = 1;

/// Upstream endpoint a request was sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    CurrencyMap,
    PriceConversion,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CurrencyMap => f.write_str("/v1/cryptocurrency/map"),
            Self::PriceConversion => f.write_str("/v2/tools/price-conversion"),
        }
    }
}

/// Failure to obtain a usable response from the upstream. Never retried.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{endpoint} answered with HTTP {status}")]
    Status {
        endpoint: Endpoint,
        status: StatusCode,
    },
    #[error("request to {endpoint} failed")]
    Network {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },
    #[error("could not decode {endpoint} response")]
    Decode {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} reported success without a data payload")]
    MissingData { endpoint: Endpoint },
}

impl TransportError {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::Status { endpoint, .. }
            | Self::Network { endpoint, .. }
            | Self::Decode { endpoint, .. }
            | Self::MissingData { endpoint } => *endpoint,
        }
    }

    /// HTTP status of the offending response, when one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CmcClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CmcClient {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("coin-convert/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .brotli(true)
            .build()?;
        Ok(Self {
            http,
            base_url: settings.api_base_url.clone(),
            api_key: settings.api_key.clone(),
        })
    }

    /// Top currencies by market rank.
    pub async fn currency_map(&self) -> Result<CurrencyResp, TransportError> {
        let url = format!(
            "{base}/v1/cryptocurrency/map?limit={limit}&sort=cmc_rank",
            base = self.base_url,
            limit = CURRENCY_LIMIT,
        );
        self.get_json(Endpoint::CurrencyMap, &url).await
    }

    /// Value of one unit of `source_id` expressed in `target_id`.
    pub async fn price_conversion(
        &self,
        source_id: &str,
        target_id: &str,
    ) -> Result<ConversionResp, TransportError> {
        let url = format!(
            "{base}/v2/tools/price-conversion?amount={amount}&convert_id={target}&id={source}",
            base = self.base_url,
            amount = CONVERSION_AMOUNT,
            target = encode(target_id),
            source = encode(source_id),
        );
        self.get_json(Endpoint::PriceConversion, &url).await
    }

    #[instrument(skip(self, url, endpoint), fields(%endpoint))]
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        url: &str,
    ) -> Result<Envelope<T>, TransportError> {
        let started = Instant::now();
        let mut request = self
            .http
            .get(url)
            .header(header::ACCEPT, "application/json");
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let resp = request
            .send()
            .await
            .map_err(|source| TransportError::Network { endpoint, source })?;
        let status = resp.status();
        debug!(%status, elapsed_ms = started.elapsed().as_millis() as u64, "upstream responded");
        if !status.is_success() {
            return Err(TransportError::Status { endpoint, status });
        }

        resp.json::<Envelope<T>>()
            .await
            .map_err(|source| TransportError::Decode { endpoint, source })
    }
}
