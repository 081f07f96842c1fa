//! Class history search

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use dayls_common::clock::normalize;

use crate::{db, AppState};

/// Equality filters; at least one must be provided
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub age_group: Option<String>,
    pub level: Option<String>,
    pub room: Option<String>,
}

/// One matching class instance
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassHit {
    pub id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub activity_name: String,
    pub age_group: Option<String>,
    pub level: Option<String>,
    pub class_type: String,
    pub room: String,
    pub notes: String,
    pub performers: Value,
    pub class_label: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub total: usize,
    pub classes: Vec<ClassHit>,
}

/// GET /api/classes/search?date=&start_time=&age_group=&level=&room=
///
/// The start-time filter is normalized before matching, so `"11am"` finds
/// classes stored as `"11:00 AM"`. Results are ordered by date, then
/// start-time sort key.
pub async fn search_classes(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ClassSearchError> {
    let filters = db::ClassFilters {
        date: non_empty(query.date),
        start_time: non_empty(query.start_time).map(|t| normalize(&t)),
        age_group: non_empty(query.age_group),
        level: non_empty(query.level),
        room: non_empty(query.room),
    };

    if filters.is_empty() {
        return Err(ClassSearchError::NoCriteria);
    }

    let rows = db::search_classes(&state.db, &filters)
        .await
        .map_err(|e| ClassSearchError::Database(e.to_string()))?;

    let classes: Vec<ClassHit> = rows
        .into_iter()
        .map(|row| ClassHit {
            performers: serde_json::from_str(&row.performers)
                .unwrap_or(Value::Array(Vec::new())),
            id: row.id,
            date: row.date,
            start_time: row.start_time,
            end_time: row.end_time,
            activity_name: row.activity_name,
            age_group: row.age_group,
            level: row.level,
            class_type: row.class_type,
            room: row.room,
            notes: row.notes,
            class_label: row.class_label,
        })
        .collect();

    Ok(Json(SearchResponse {
        total: classes.len(),
        classes,
    }))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Class search errors
#[derive(Debug)]
pub enum ClassSearchError {
    NoCriteria,
    Database(String),
}

impl IntoResponse for ClassSearchError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ClassSearchError::NoCriteria => (
                StatusCode::BAD_REQUEST,
                "Provide at least one search criteria".to_string(),
            ),
            ClassSearchError::Database(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Database error: {}", msg))
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
