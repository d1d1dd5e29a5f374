//! One-shot conversion from the terminal.

use anyhow::{bail, Context, Result};
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{
    config::Settings,
    data::cmc::CmcClient,
    loader::{self, CurrencyPair, LoadOutcome, DEFAULT_CURRENCY_ID},
    ui::ConverterView,
};

/// Args for the `convert` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Source currency id.
    #[arg(long, default_value = DEFAULT_CURRENCY_ID)]
    pub id: String,
    /// Target currency id.
    #[arg(long, default_value = DEFAULT_CURRENCY_ID)]
    pub convert_id: String,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let client = CmcClient::new(&settings)?;
    let pair = CurrencyPair::new(args.id, args.convert_id);
    let outcome = loader::load_page(&client, &pair)
        .await
        .with_context(|| format!("convert {} into {}", pair.source_id, pair.target_id))?;

    match outcome {
        LoadOutcome::Found(model) => {
            println!("{}", ConverterView::new(Some(&model), &pair).line());
            Ok(())
        }
        LoadOutcome::NotFound(rejection) => bail!(
            "not found: {} rejected the request (error {}: {})",
            rejection.endpoint,
            rejection.error_code,
            rejection.error_message.as_deref().unwrap_or("no message")
        ),
    }
}
