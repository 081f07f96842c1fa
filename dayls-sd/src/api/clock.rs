//! Clock preview endpoint
//!
//! The form calls this on time-field blur to echo the canonical form back
//! into the field.

use axum::{extract::Query, Json};
use serde::{Deserialize, Serialize};

use dayls_common::clock::{compact_time, normalize, sort_key, SORT_KEY_LAST};

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub input: String,
    pub canonical: String,
    /// Minutes after midnight; absent when the value has no clock shape
    pub sort_key: Option<u32>,
    pub compact: String,
}

/// GET /api/clock/preview?value=
pub async fn clock_preview(Query(query): Query<PreviewQuery>) -> Json<PreviewResponse> {
    let canonical = normalize(&query.value);
    let key = sort_key(&query.value);

    Json(PreviewResponse {
        compact: compact_time(&canonical),
        canonical,
        sort_key: (key != SORT_KEY_LAST).then_some(key),
        input: query.value,
    })
}
