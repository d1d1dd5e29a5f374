//! HTTP layer serving the converter page, its JSON twin and static assets.

pub mod routes;
pub mod types;

use std::{net::SocketAddr, path::PathBuf};

use anyhow::Result;
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;

use crate::{config::Settings, data::cmc::CmcClient};

#[derive(Clone)]
pub struct AppState {
    pub client: CmcClient,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            client: CmcClient::new(settings)?,
            static_dir: settings.static_dir.clone(),
        })
    }
}

/// Build the application router; shared by `serve` and the tests.
pub fn router(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.static_dir);
    Router::new()
        .route("/", get(routes::converter_page))
        .route("/api/conversion", get(routes::conversion_json))
        .fallback_service(static_dir)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(settings: Settings, host: String, port: u16) -> Result<()> {
    let state = AppState::new(&settings)?;
    let app = router(state);

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!(%addr, upstream = %settings.api_base_url, "serving coin-convert");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown requested");
}
