//! Server-rendered cryptocurrency converter backed by live CoinMarketCap rates.

pub mod api;
pub mod cli;
pub mod config;
pub mod data;
pub mod loader;
pub mod logging;
pub mod ui;
