//! HTTP boundary for `chroma serve`.
//!
//! - `POST /validate/color` with `{"url": "..."}` returns the report as JSON
//! - `GET /health` returns `{"status": "ok"}`
//!
//! A blank URL, or one that is not `http`/`https`, is rejected with 422.
//! Local schemes such as `file:` stay available to `chroma analyze` only.
//! Browser or page failures map to 502, since the service itself is healthy
//! but its upstream is not.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chroma_core::{AnalyzeError, ContrastAnalyzer, SessionProvider};
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::{CliError, Result};

/// Shared per-server state. Cloned into every request.
pub struct AppState<P> {
    analyzer: ContrastAnalyzer,
    provider: Arc<P>,
}

impl<P> AppState<P> {
    pub fn new(analyzer: ContrastAnalyzer, provider: Arc<P>) -> Self {
        Self { analyzer, provider }
    }
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            analyzer: self.analyzer.clone(),
            provider: Arc::clone(&self.provider),
        }
    }
}

/// Body of `POST /validate/color`.
#[derive(Debug, Deserialize)]
pub struct UrlRequest {
    #[serde(default)]
    pub url: String,
}

/// Build the router. Generic over the session provider so tests can run
/// without Chrome.
pub fn router<P>(state: AppState<P>) -> Router
where
    P: SessionProvider + 'static,
{
    Router::new()
        .route("/validate/color", post(validate_color::<P>))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve<P>(state: AppState<P>, addr: &str) -> Result<()>
where
    P: SessionProvider + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;

    tracing::info!("Listening on http://{}", local);
    crate::ui::info(&format!(
        "POST http://{}/validate/color with {{\"url\": \"...\"}}",
        local
    ));

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CliError::Server(e.to_string()))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn validate_color<P>(
    State(state): State<AppState<P>>,
    Json(request): Json<UrlRequest>,
) -> Response
where
    P: SessionProvider + 'static,
{
    if request.url.trim().is_empty() {
        return error_response(StatusCode::UNPROCESSABLE_ENTITY, "url must not be blank");
    }
    if !is_web_url(&request.url) {
        return error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "url must be an absolute http or https URL",
        );
    }

    match state
        .analyzer
        .analyze_url(state.provider.as_ref(), &request.url)
        .await
    {
        Ok(report) => Json(report).into_response(),
        Err(err) => {
            let status = status_for(&err);
            tracing::warn!("Analysis of {} failed: {}", request.url, err);
            error_response(status, &err.to_string())
        }
    }
}

fn is_web_url(url: &str) -> bool {
    match url.trim().split_once("://") {
        Some((scheme, rest)) => {
            (scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https"))
                && !rest.is_empty()
                && !rest.starts_with('/')
        }
        None => false,
    }
}

fn status_for(err: &AnalyzeError) -> StatusCode {
    match err {
        AnalyzeError::BlankUrl => StatusCode::UNPROCESSABLE_ENTITY,
        AnalyzeError::Session(_) => StatusCode::BAD_GATEWAY,
        AnalyzeError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
