//! Per-request data assembly: resolve the pair, fetch both datasets, merge.

use futures::future::try_join;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::data::{
    cmc::{CmcClient, Endpoint, TransportError},
    types::{ApiStatus, ConversionResult, CurrencyDescriptor, Envelope},
};

pub const DEFAULT_CURRENCY_ID: &str = "1";

/// Query parameters of the converter page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PairQuery {
    pub id: Option<String>,
    #[serde(rename = "convertId")]
    pub convert_id: Option<String>,
    /// Spelling used by older links; `convertId` takes precedence.
    #[serde(rename = "convert_id")]
    pub legacy_convert_id: Option<String>,
}

/// Source and target currency ids, defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyPair {
    pub source_id: String,
    pub target_id: String,
}

impl CurrencyPair {
    pub fn new(source_id: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
        }
    }
}

impl From<PairQuery> for CurrencyPair {
    fn from(query: PairQuery) -> Self {
        Self {
            source_id: query.id.unwrap_or_else(|| DEFAULT_CURRENCY_ID.to_string()),
            target_id: query
                .convert_id
                .or(query.legacy_convert_id)
                .unwrap_or_else(|| DEFAULT_CURRENCY_ID.to_string()),
        }
    }
}

/// Merged data handed to the renderer; built only when both calls succeeded.
#[derive(Debug, Clone)]
pub struct PageViewModel {
    pub conversion: ConversionResult,
    pub currencies: Vec<CurrencyDescriptor>,
}

/// Well-formed upstream refusal, e.g. an unknown currency id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRejection {
    pub endpoint: Endpoint,
    pub error_code: i64,
    pub error_message: Option<String>,
}

impl UpstreamRejection {
    fn from_status(endpoint: Endpoint, status: &ApiStatus) -> Self {
        Self {
            endpoint,
            error_code: status.error_code,
            error_message: status.error_message.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum LoadOutcome {
    Found(PageViewModel),
    NotFound(UpstreamRejection),
}

/// Fetch catalog and conversion concurrently and merge them.
///
/// Any transport failure aborts the whole load; there is no partial page.
#[instrument(skip(client, pair), fields(source = %pair.source_id, target = %pair.target_id))]
pub async fn load_page(
    client: &CmcClient,
    pair: &CurrencyPair,
) -> Result<LoadOutcome, TransportError> {
    let (currencies, conversion) = try_join(
        client.currency_map(),
        client.price_conversion(&pair.source_id, &pair.target_id),
    )
    .await?;

    let outcome = merge(currencies, conversion)?;
    match &outcome {
        LoadOutcome::Found(model) => info!(
            currencies = model.currencies.len(),
            quoted = model.conversion.quote.len(),
            "page data assembled"
        ),
        LoadOutcome::NotFound(rejection) => warn!(
            endpoint = %rejection.endpoint,
            error_code = rejection.error_code,
            error_message = rejection.error_message.as_deref().unwrap_or_default(),
            "upstream rejected request"
        ),
    }
    Ok(outcome)
}

/// Combine two decoded envelopes. A conversion rejection wins over a catalog one.
pub fn merge(
    currencies: Envelope<Vec<CurrencyDescriptor>>,
    conversion: Envelope<ConversionResult>,
) -> Result<LoadOutcome, TransportError> {
    if !conversion.status.is_ok() {
        return Ok(LoadOutcome::NotFound(UpstreamRejection::from_status(
            Endpoint::PriceConversion,
            &conversion.status,
        )));
    }
    if !currencies.status.is_ok() {
        return Ok(LoadOutcome::NotFound(UpstreamRejection::from_status(
            Endpoint::CurrencyMap,
            &currencies.status,
        )));
    }

    let conversion = conversion.data.ok_or(TransportError::MissingData {
        endpoint: Endpoint::PriceConversion,
    })?;
    let currencies = currencies.data.ok_or(TransportError::MissingData {
        endpoint: Endpoint::CurrencyMap,
    })?;

    Ok(LoadOutcome::Found(PageViewModel {
        conversion,
        currencies,
    }))
}
