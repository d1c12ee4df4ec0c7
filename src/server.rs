//! HTTP search endpoint.
//!
//! Exposes the [`SearchService`] as a small JSON/HTML API so the site (or
//! any other client) can query the index over HTTP.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/search?q=…&limit=…&format=json\|html` | Ranked results or the rendered result panel |
//! | `GET`  | `/index/stats` | Entry counts, build time and pending enrichment |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "limit must be >= 1" } }
//! ```
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so the static site can
//! call the server from the browser.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::render::render_panel;
use crate::service::{SearchService, ServiceStats};

/// Build the router over a shared service.
pub fn router(service: Arc<SearchService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/search", get(handle_search))
        .route("/index/stats", get(handle_stats))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(service)
}

/// Starts the search server on `[server].bind`.
///
/// The index build starts immediately; enrichment continues in the
/// background while requests are served.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let service = Arc::new(SearchService::from_config(config)?);
    service.build();

    let app = router(service);
    let bind_addr = &config.server.bind;
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    println!("PYQ search listening on http://{}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /index/stats ============

async fn handle_stats(State(service): State<Arc<SearchService>>) -> Json<ServiceStats> {
    Json(service.stats())
}

// ============ GET /search ============

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
    limit: Option<usize>,
    format: Option<String>,
}

/// Returns JSON by default; `format=html` returns the rendered panel, or
/// `204 No Content` when the panel would be hidden.
async fn handle_search(
    State(service): State<Arc<SearchService>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(params) = params.map_err(|e| bad_request(e.body_text()))?;

    let max = service.settings().max_results;
    let limit = match params.limit {
        Some(0) => return Err(bad_request("limit must be >= 1")),
        Some(n) => n.min(max),
        None => max,
    };

    let html = match params.format.as_deref() {
        None | Some("json") => false,
        Some("html") => true,
        Some(other) => {
            return Err(bad_request(format!(
                "unknown format '{}': expected json or html",
                other
            )))
        }
    };

    let outcome = service.query_with_limit(&params.q, limit).await;

    if html {
        return Ok(match render_panel(&outcome) {
            Some(panel) => Html(panel).into_response(),
            None => StatusCode::NO_CONTENT.into_response(),
        });
    }

    Ok(Json(outcome.view()).into_response())
}
