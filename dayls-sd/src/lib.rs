//! dayls-sd library - Schedule Desk service
//!
//! Persists day schedules, maintains the derived performer and class
//! collections, answers history queries, and brokers the performer-insight
//! call to the generative-language API.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod api;
pub mod db;
pub mod insight;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
///
/// CORS is permissive because the scheduling form is a browser page served
/// from elsewhere.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/health", get(api::health_check))
        .route(
            "/api/schedule/:date",
            get(api::get_schedule).put(api::save_schedule),
        )
        .route("/api/performers", get(api::list_performers))
        .route("/api/performers/:name/history", get(api::performer_history))
        .route("/api/performers/:name/insight", post(api::performer_insight))
        .route("/api/classes/search", get(api::search_classes))
        .route("/api/clock/preview", get(api::clock_preview))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
