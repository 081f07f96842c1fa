//! Day-schedule load and save
//!
//! Saving replaces the stored document for the date and refreshes the
//! derived collections: class instances upsert under their composite
//! identifier, performers upsert under their name slug, and one history
//! row is appended per performer per activity.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use dayls_common::clock::compact_time;
use dayls_common::ident::{class_instance_id, class_label, performer_slug, weekday_abbrev};
use dayls_common::model::DaySchedule;
use dayls_common::ordering::sorted_by_schedule;

use crate::{db, AppState};

/// Loaded schedule with hourly blocks in schedule order
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub date: String,
    pub schedule: DaySchedule,
}

/// What a save touched
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    pub date: String,
    pub classes_upserted: u32,
    pub performers_upserted: u32,
    pub history_appended: u32,
}

/// GET /api/schedule/:date
///
/// Returns the stored document for the date with hourly blocks ordered by
/// (start, end) sort key; instructor events keep their input order.
pub async fn get_schedule(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<ScheduleResponse>, ScheduleError> {
    let document = db::load_schedule(&state.db, &date)
        .await
        .map_err(|e| ScheduleError::Database(e.to_string()))?
        .ok_or_else(|| ScheduleError::NotFound(date.clone()))?;

    let mut schedule: DaySchedule = serde_json::from_str(&document)
        .map_err(|e| ScheduleError::Database(format!("Stored document unreadable: {}", e)))?;

    schedule.hourly_blocks = sorted_by_schedule(&schedule.hourly_blocks);

    Ok(Json(ScheduleResponse { date, schedule }))
}

/// PUT /api/schedule/:date
///
/// Replaces the document and refreshes the derived collections. Activities
/// without a name produce no class row; performers whose name slugs to
/// empty are skipped rather than keyed on an empty string.
pub async fn save_schedule(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(schedule): Json<DaySchedule>,
) -> Result<Json<SaveResponse>, ScheduleError> {
    let document = serde_json::to_string(&schedule)
        .map_err(|e| ScheduleError::Database(format!("Failed to encode document: {}", e)))?;
    let now = Utc::now().to_rfc3339();

    db::replace_schedule(&state.db, &date, &document, &now)
        .await
        .map_err(|e| ScheduleError::Database(e.to_string()))?;

    let weekday = weekday_abbrev(&date);
    let mut classes_upserted = 0u32;
    let mut performers_upserted = 0u32;
    let mut history_appended = 0u32;

    for block in &schedule.hourly_blocks {
        for activity in &block.activities {
            let class_type = activity.class_type();
            let label = class_label(
                weekday,
                &compact_time(&block.start_time),
                &class_type,
                activity.room_name.code(),
            );

            if !activity.name.is_empty() {
                let lightweight: Vec<_> = activity
                    .performers
                    .iter()
                    .map(|p| json!({ "name": p.name, "roles": p.roles }))
                    .collect();

                let record = db::ClassRecord {
                    id: class_instance_id(
                        &date,
                        &block.start_time,
                        &class_type,
                        activity.room_name.code(),
                    ),
                    date: date.clone(),
                    start_time: block.start_time.clone(),
                    end_time: block.end_time.clone(),
                    activity_name: activity.name.clone(),
                    age_group: activity.age_group.map(|a| a.code().to_string()),
                    level: activity.level.map(|l| l.code().to_string()),
                    class_type: class_type.clone(),
                    room: activity.room_name.code().to_string(),
                    notes: activity.notes.clone(),
                    performers: serde_json::Value::Array(lightweight).to_string(),
                    class_label: label.clone(),
                };

                db::upsert_class(&state.db, &record, &now)
                    .await
                    .map_err(|e| ScheduleError::Database(e.to_string()))?;
                classes_upserted += 1;
            }

            for performer in &activity.performers {
                if performer.name.is_empty() {
                    continue;
                }
                let slug = performer_slug(&performer.name);
                if slug.is_empty() {
                    // Name carries no alphanumerics; nothing to key on
                    continue;
                }

                db::upsert_performer(&state.db, &slug, &performer.name, &now)
                    .await
                    .map_err(|e| ScheduleError::Database(e.to_string()))?;
                performers_upserted += 1;

                let history = db::HistoryRecord {
                    id: Uuid::new_v4().to_string(),
                    performer_id: slug,
                    date: date.clone(),
                    start_time: block.start_time.clone(),
                    end_time: block.end_time.clone(),
                    activity_name: activity.name.clone(),
                    roles: performer.roles.clone(),
                    kind: performer.kind.map(|k| k.code().to_string()),
                    notes: performer.notes.clone(),
                    class_type: class_type.clone(),
                    room: activity.room_name.code().to_string(),
                    class_label: label.clone(),
                    recorded_at: now.clone(),
                };

                db::append_history(&state.db, &history)
                    .await
                    .map_err(|e| ScheduleError::Database(e.to_string()))?;
                history_appended += 1;
            }
        }
    }

    info!(
        date = %date,
        classes = classes_upserted,
        performers = performers_upserted,
        history = history_appended,
        "Schedule saved"
    );

    Ok(Json(SaveResponse {
        date,
        classes_upserted,
        performers_upserted,
        history_appended,
    }))
}

/// Schedule endpoint errors
#[derive(Debug)]
pub enum ScheduleError {
    NotFound(String),
    Database(String),
}

impl IntoResponse for ScheduleError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ScheduleError::NotFound(date) => (
                StatusCode::NOT_FOUND,
                format!("No schedule found for {}", date),
            ),
            ScheduleError::Database(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Database error: {}", msg))
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
