// Copyright 2026 Marquee Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP surface for Marquee.
//!
//! Serves the rendered listing and post pages, JSON views of the same
//! scraped data, and the mock posts catalog. Every page request scrapes
//! the upstream site afresh; only `Cache-Control` hints are emitted.

use crate::acquisition::SiteClient;
use crate::catalog::{Catalog, Lookup};
use crate::config::RuntimeConfig;
use crate::render;
use anyhow::Result;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared, read-only state for all handlers.
pub struct AppState {
    pub config: RuntimeConfig,
    pub site: SiteClient,
    pub catalog: Catalog,
    pub started_at: Instant,
}

impl AppState {
    /// Build state with a real HTTP client for the configured origin.
    pub fn from_config(config: RuntimeConfig) -> Result<Self> {
        let site = config.site_client()?;
        Ok(Self::new(config, site))
    }

    pub fn new(config: RuntimeConfig, site: SiteClient) -> Self {
        let catalog = Catalog::seeded(Duration::from_millis(config.catalog_delay_ms));
        Self {
            config,
            site,
            catalog,
            started_at: Instant::now(),
        }
    }
}

/// Errors surfaced by handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("upstream fetch failed: {0:#}")]
    Upstream(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::warn!("{self}");
        match self {
            AppError::Upstream(_) => {
                (StatusCode::BAD_GATEWAY, "Upstream site unavailable").into_response()
            }
        }
    }
}

/// Build the axum Router with all endpoints.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(listing_page))
        .route("/post/*id", get(post_page))
        .route("/api/posts", get(api_posts))
        .route("/api/listing", get(api_listing))
        .route("/api/post/*id", get(api_post))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serve on `addr` until Ctrl-C.
pub async fn start(addr: SocketAddr, state: Arc<AppState>) -> Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

// ── Helpers ─────────────────────────────────────────────────────

fn cache_hint(revalidate_secs: u64) -> String {
    format!("public, s-maxage={revalidate_secs}, stale-while-revalidate")
}

fn local_time() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

// ── Handlers ────────────────────────────────────────────────────

async fn listing_page(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let items = state.site.listing().await?;
    let body = render::render_listing(&items, &local_time());
    Ok((
        [(
            header::CACHE_CONTROL,
            cache_hint(state.config.listing_revalidate_secs),
        )],
        Html(body),
    )
        .into_response())
}

async fn post_page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let post = state.site.post(&id).await?;
    let body = render::render_post(post.as_ref());
    Ok((
        [(
            header::CACHE_CONTROL,
            cache_hint(state.config.post_revalidate_secs),
        )],
        Html(body),
    )
        .into_response())
}

async fn api_listing(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let items = state.site.listing().await?;
    Ok((
        [(
            header::CACHE_CONTROL,
            cache_hint(state.config.listing_revalidate_secs),
        )],
        Json(items),
    )
        .into_response())
}

async fn api_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    match state.site.post(&id).await? {
        Some(post) => Ok(Json(post).into_response()),
        None => Ok((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "not found" })),
        )
            .into_response()),
    }
}

/// First value of `key` in a raw query; repeats are ignored.
fn first_param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

async fn api_posts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    state.catalog.simulate_latency().await;

    match state.catalog.lookup(first_param(&params, "id")) {
        Lookup::All(posts) => Json(posts).into_response(),
        Lookup::One(post) => Json(post).into_response(),
        Lookup::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "origin": state.config.origin,
        "uptime_seconds": state.started_at.elapsed().as_secs_f64(),
    }))
}
