//! List the catalog offered by the pickers.

use anyhow::{bail, Context, Result};
use tracing::instrument;

use crate::{config::Settings, data::cmc::CmcClient};

#[instrument(skip(settings))]
pub async fn run(settings: Settings) -> Result<()> {
    let client = CmcClient::new(&settings)?;
    let resp = client
        .currency_map()
        .await
        .context("fetch currency map")?;
    if !resp.status.is_ok() {
        bail!(
            "currency map rejected (error {}: {})",
            resp.status.error_code,
            resp.status.error_message.as_deref().unwrap_or("no message")
        );
    }

    for currency in resp.data.unwrap_or_default() {
        println!(
            "{:>6}  {:<8}  {}",
            currency.id, currency.symbol, currency.name
        );
    }
    Ok(())
}
