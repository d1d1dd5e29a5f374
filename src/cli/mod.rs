//! Command-line interface wiring for coin-convert.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Settings;

pub mod convert;
pub mod currencies;
pub mod serve;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Cryptocurrency converter backed by CoinMarketCap", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Serve(args) => serve::run(args, settings).await,
            Commands::Convert(args) => convert::run(args, settings).await,
            Commands::Currencies => currencies::run(settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the converter page.
    Serve(serve::Args),
    /// Print one conversion line and exit.
    Convert(convert::Args),
    /// List the currencies offered in the pickers.
    Currencies,
}
