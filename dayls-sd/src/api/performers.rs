//! Performer list, history, and insight endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};

use dayls_common::db::init::{get_setting, DEFAULT_INSIGHT_MODEL};
use dayls_common::ident::performer_slug;

use crate::insight::{build_prompt, InsightClient, InsightError};
use crate::{db, AppState};

/// All performer names, sorted ascending
#[derive(Debug, Serialize)]
pub struct PerformersResponse {
    pub performers: Vec<String>,
}

/// One performer's participation history
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub performer: String,
    pub performer_id: String,
    pub entries: Vec<db::HistoryRow>,
}

/// Generated free-text insight
#[derive(Debug, Serialize)]
pub struct InsightResponse {
    pub performer: String,
    pub insight: String,
}

/// GET /api/performers
pub async fn list_performers(
    State(state): State<AppState>,
) -> Result<Json<PerformersResponse>, PerformerError> {
    let performers = db::list_performer_names(&state.db)
        .await
        .map_err(|e| PerformerError::Database(e.to_string()))?;

    Ok(Json(PerformersResponse { performers }))
}

/// GET /api/performers/:name/history
///
/// The name is slugged before lookup, so any spelling that slugs to the
/// same identifier reaches the same history. An empty result is a normal
/// response, not an error.
pub async fn performer_history(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<HistoryResponse>, PerformerError> {
    let slug = performer_slug(name.trim());
    if slug.is_empty() {
        return Err(PerformerError::InvalidName);
    }

    let entries = db::performer_history(&state.db, &slug)
        .await
        .map_err(|e| PerformerError::Database(e.to_string()))?;

    Ok(Json(HistoryResponse {
        performer: name,
        performer_id: slug,
        entries,
    }))
}

/// POST /api/performers/:name/insight
///
/// Sends the performer's history to the generative-language API and
/// returns its summary. Requires history rows and a configured API key.
pub async fn performer_insight(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<InsightResponse>, PerformerError> {
    let slug = performer_slug(name.trim());
    if slug.is_empty() {
        return Err(PerformerError::InvalidName);
    }

    let history = db::performer_history(&state.db, &slug)
        .await
        .map_err(|e| PerformerError::Database(e.to_string()))?;
    if history.is_empty() {
        return Err(PerformerError::NoHistory(name));
    }

    let api_key = get_setting(&state.db, "insight_api_key", "")
        .await
        .map_err(|e| PerformerError::Database(e.to_string()))?;
    if api_key.is_empty() {
        return Err(PerformerError::MissingApiKey);
    }
    let model = get_setting(&state.db, "insight_model", DEFAULT_INSIGHT_MODEL)
        .await
        .map_err(|e| PerformerError::Database(e.to_string()))?;

    let client = InsightClient::new().map_err(PerformerError::Upstream)?;
    let prompt = build_prompt(&name, &history);

    let insight = client
        .generate(&model, &api_key, &prompt)
        .await
        .map_err(PerformerError::Upstream)?;

    info!(performer = %slug, entries = history.len(), "Generated performer insight");

    Ok(Json(InsightResponse {
        performer: name,
        insight,
    }))
}

/// Performer endpoint errors
#[derive(Debug)]
pub enum PerformerError {
    InvalidName,
    NoHistory(String),
    MissingApiKey,
    Upstream(InsightError),
    Database(String),
}

impl IntoResponse for PerformerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            PerformerError::InvalidName => (
                StatusCode::BAD_REQUEST,
                "Performer name yields no identifier".to_string(),
            ),
            PerformerError::NoHistory(name) => (
                StatusCode::NOT_FOUND,
                format!("No history found for {}", name),
            ),
            PerformerError::MissingApiKey => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Insight API key is not configured (settings key 'insight_api_key')".to_string(),
            ),
            PerformerError::Upstream(e) => {
                error!("Insight generation failed: {}", e);
                (StatusCode::BAD_GATEWAY, format!("Insight generation failed: {}", e))
            }
            PerformerError::Database(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Database error: {}", msg))
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
