//! musiclib-api library - song catalog HTTP service
//!
//! Handlers receive their dependencies through `AppState`; nothing is held in
//! process-wide globals.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod cli;
pub mod db;
pub mod error;
pub mod pagination;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use crate::services::EnrichmentClient;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Song details lookup service
    pub enrichment: EnrichmentClient,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, enrichment: EnrichmentClient) -> Self {
        Self { db, enrichment }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::song_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
