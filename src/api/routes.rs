//! HTTP route handlers for Axum.

use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use tracing::error;

use crate::{
    api::types::{ConversionDto, ErrorDto},
    data::cmc::TransportError,
    loader::{self, CurrencyPair, LoadOutcome, PairQuery},
    ui::{ConverterView, NotFoundView},
};

use super::AppState;

type PageResult = Result<Html<String>, (StatusCode, Html<String>)>;
type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorDto>)>;

const INTERNAL_ERROR_BODY: &str = "500 | Internal Server Error.";

/// `GET /?id=..&convertId=..`
pub async fn converter_page(
    State(state): State<AppState>,
    Query(query): Query<PairQuery>,
) -> PageResult {
    let pair = CurrencyPair::from(query);
    let outcome = loader::load_page(&state.client, &pair)
        .await
        .map_err(|err| page_failure(&pair, &err))?;

    match outcome {
        LoadOutcome::Found(model) => ConverterView::new(Some(&model), &pair)
            .render()
            .map(Html)
            .map_err(internal_page),
        LoadOutcome::NotFound(_) => {
            let body = NotFoundView { pair }.render().map_err(internal_page)?;
            Err((StatusCode::NOT_FOUND, Html(body)))
        }
    }
}

/// `GET /api/conversion?id=..&convertId=..`
pub async fn conversion_json(
    State(state): State<AppState>,
    Query(query): Query<PairQuery>,
) -> ApiResult<ConversionDto> {
    let pair = CurrencyPair::from(query);
    let outcome = loader::load_page(&state.client, &pair)
        .await
        .map_err(|err| {
            log_transport_error(&pair, &err);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "upstream unavailable")
        })?;

    match outcome {
        LoadOutcome::Found(model) => {
            let view = ConverterView::new(Some(&model), &pair);
            Ok(Json(ConversionDto::from(&view)))
        }
        LoadOutcome::NotFound(rejection) => Err(api_error(
            StatusCode::NOT_FOUND,
            rejection
                .error_message
                .as_deref()
                .unwrap_or("conversion not found"),
        )),
    }
}

fn page_failure(pair: &CurrencyPair, err: &TransportError) -> (StatusCode, Html<String>) {
    log_transport_error(pair, err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(INTERNAL_ERROR_BODY.to_string()),
    )
}

fn internal_page(err: askama::Error) -> (StatusCode, Html<String>) {
    error!(%err, "template rendering failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(INTERNAL_ERROR_BODY.to_string()),
    )
}

fn log_transport_error(pair: &CurrencyPair, err: &TransportError) {
    error!(
        source_id = %pair.source_id,
        target_id = %pair.target_id,
        endpoint = %err.endpoint(),
        status = ?err.status(),
        error = %err_chain(err),
        "upstream transport failure"
    );
}

fn err_chain(err: &TransportError) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn api_error(status: StatusCode, message: &str) -> (StatusCode, Json<ErrorDto>) {
    (
        status,
        Json(ErrorDto {
            error: message.to_string(),
        }),
    )
}
