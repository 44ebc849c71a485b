// Copyright 2026 WCL Importer Contributors
// SPDX-License-Identifier: MIT

//! HTTP trigger for the importer.
//!
//! One authenticated route runs a full import per request; `/health` is
//! open. Laid out for the Azure Functions custom-handler convention, where
//! the host forwards `/api/<function>` to this server.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use subtle::ConstantTimeEq;
use tower_http::trace::TraceLayer;

use crate::envelope::{ErrorEnvelope, SuccessEnvelope, NO_DATA_MESSAGE};
use crate::error::ImportResult;
use crate::importer::{ImportOutcome, Importer};

/// Route of the import trigger.
pub const TRIGGER_ROUTE: &str = "/api/wcl_data_importer_http_trigger";

/// Header carrying the function key.
pub const FUNCTION_KEY_HEADER: &str = "x-functions-key";

/// Query parameter carrying the function key.
pub const FUNCTION_KEY_PARAM: &str = "code";

/// Shared state passed to all handlers. Immutable after startup.
pub struct AppState {
    pub importer: Importer,
    /// Expected function key. `None` leaves authorization to the host.
    pub function_key: Option<String>,
}

/// Build the axum Router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(TRIGGER_ROUTE, get(handle_trigger).post(handle_trigger))
        .layer(middleware::from_fn_with_state(state.clone(), function_key_layer))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the trigger on `addr` until the process is stopped.
pub async fn start(addr: std::net::SocketAddr, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP trigger listening on http://{addr}{TRIGGER_ROUTE}");
    axum::serve(listener, app).await?;
    Ok(())
}

// ── Auth ────────────────────────────────────────────────────────

/// Function-key check. `/health` is routed outside this layer.
async fn function_key_layer(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Response {
    if let Some(expected) = &state.function_key {
        let from_header = headers
            .get(FUNCTION_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let from_query = request.uri().query().and_then(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .find(|(k, _)| k == FUNCTION_KEY_PARAM)
                .map(|(_, v)| v.into_owned())
        });

        let authorized = from_header
            .or(from_query)
            .is_some_and(|key| key_matches(&key, expected));

        if !authorized {
            tracing::warn!(uri = %request.uri().path(), "rejected request without a valid function key");
            return (
                StatusCode::UNAUTHORIZED,
                Json(ErrorEnvelope::new("Unauthorized")),
            )
                .into_response();
        }
    }

    next.run(request).await
}

/// Constant-time key comparison.
fn key_matches(candidate: &str, expected: &str) -> bool {
    candidate.as_bytes().ct_eq(expected.as_bytes()).into()
}

// ── Handlers ────────────────────────────────────────────────────

async fn health() -> Json<Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn handle_trigger(State(state): State<Arc<AppState>>) -> Response {
    tracing::info!("WCL data importer triggered");
    outcome_response(state.importer.run().await)
}

/// Map an import result onto the response contract: 200 with a pretty JSON
/// envelope, 400 plain text when nothing was scraped, 500 with a JSON error
/// envelope on any failure.
fn outcome_response(result: ImportResult<ImportOutcome>) -> Response {
    match result {
        Ok(ImportOutcome::NoData) => (
            StatusCode::BAD_REQUEST,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            NO_DATA_MESSAGE,
        )
            .into_response(),
        Ok(ImportOutcome::Published {
            extraction,
            file_path,
        }) => {
            let envelope = SuccessEnvelope::new(&extraction, file_path);
            match serde_json::to_string_pretty(&envelope) {
                Ok(body) => (
                    StatusCode::OK,
                    [(header::CONTENT_TYPE, "application/json")],
                    body,
                )
                    .into_response(),
                Err(e) => error_response(&e),
            }
        }
        Err(e) => error_response(&e),
    }
}

fn error_response(err: &dyn std::fmt::Display) -> Response {
    let envelope = ErrorEnvelope::from_error(err);
    tracing::error!("{}", envelope.error);
    (StatusCode::INTERNAL_SERVER_ERROR, Json(envelope)).into_response()
}
