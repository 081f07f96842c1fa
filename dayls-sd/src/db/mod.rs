//! Database access layer for dayls-sd
//!
//! Store operations behind the HTTP handlers. Upserts are keyed by the
//! derived identifiers from `dayls_common::ident`, so re-saving a day
//! lands on the same schedule, class, and performer rows; history rows
//! are append-only.

use anyhow::{Context, Result};
use serde::Serialize;
use sqlx::SqlitePool;

use dayls_common::clock::sort_key;

/// Class-instance row written on save, keyed by the composite identifier
#[derive(Debug)]
pub struct ClassRecord {
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
    /// Lightweight `[{name, roles}]` JSON for display in search results
    pub performers: String,
    pub class_label: String,
}

/// History row appended for each performer in each saved activity
#[derive(Debug)]
pub struct HistoryRecord {
    pub id: String,
    pub performer_id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub activity_name: String,
    pub roles: String,
    pub kind: Option<String>,
    pub notes: String,
    pub class_type: String,
    pub room: String,
    pub class_label: String,
    pub recorded_at: String,
}

/// A performer's participation history entry as returned by queries
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRow {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub activity_name: String,
    pub roles: String,
    pub kind: Option<String>,
    pub notes: String,
    pub class_type: String,
    pub room: String,
    pub class_label: String,
    pub recorded_at: String,
}

/// A stored class instance as returned by the class search
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClassRow {
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
    pub performers: String,
    pub class_label: String,
}

/// Equality filters for the class search; `None` fields are unconstrained
#[derive(Debug, Default)]
pub struct ClassFilters {
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub age_group: Option<String>,
    pub level: Option<String>,
    pub room: Option<String>,
}

impl ClassFilters {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.start_time.is_none()
            && self.age_group.is_none()
            && self.level.is_none()
            && self.room.is_none()
    }
}

/// Replace the stored document for a date wholesale
pub async fn replace_schedule(
    pool: &SqlitePool,
    date: &str,
    document: &str,
    updated_at: &str,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO schedules (date, document, updated_at) VALUES (?, ?, ?)
         ON CONFLICT(date) DO UPDATE SET
             document = excluded.document,
             updated_at = excluded.updated_at",
    )
    .bind(date)
    .bind(document)
    .bind(updated_at)
    .execute(pool)
    .await
    .context("Failed to store schedule document")?;

    Ok(())
}

/// Load the stored document for a date, if any
pub async fn load_schedule(pool: &SqlitePool, date: &str) -> Result<Option<String>> {
    let document: Option<String> =
        sqlx::query_scalar("SELECT document FROM schedules WHERE date = ?")
            .bind(date)
            .fetch_optional(pool)
            .await
            .context("Failed to load schedule document")?;

    Ok(document)
}

/// Insert or update a class instance; `created_at` is preserved on update
pub async fn upsert_class(pool: &SqlitePool, record: &ClassRecord, now: &str) -> Result<()> {
    sqlx::query(
        "INSERT INTO classes (id, date, start_time, end_time, activity_name, age_group,
                              level, class_type, room, notes, performers, class_label,
                              created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
         ON CONFLICT(id) DO UPDATE SET
             date = excluded.date,
             start_time = excluded.start_time,
             end_time = excluded.end_time,
             activity_name = excluded.activity_name,
             age_group = excluded.age_group,
             level = excluded.level,
             class_type = excluded.class_type,
             room = excluded.room,
             notes = excluded.notes,
             performers = excluded.performers,
             class_label = excluded.class_label,
             updated_at = excluded.updated_at",
    )
    .bind(&record.id)
    .bind(&record.date)
    .bind(&record.start_time)
    .bind(&record.end_time)
    .bind(&record.activity_name)
    .bind(&record.age_group)
    .bind(&record.level)
    .bind(&record.class_type)
    .bind(&record.room)
    .bind(&record.notes)
    .bind(&record.performers)
    .bind(&record.class_label)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to upsert class instance")?;

    Ok(())
}

/// Insert or refresh a performer row keyed by name slug
pub async fn upsert_performer(pool: &SqlitePool, id: &str, name: &str, now: &str) -> Result<()> {
    sqlx::query(
        "INSERT INTO performers (id, name, last_seen) VALUES (?, ?, ?)
         ON CONFLICT(id) DO UPDATE SET
             name = excluded.name,
             last_seen = excluded.last_seen",
    )
    .bind(id)
    .bind(name)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to upsert performer")?;

    Ok(())
}

/// Append one history row; every save appends fresh rows under new ids
pub async fn append_history(pool: &SqlitePool, record: &HistoryRecord) -> Result<()> {
    sqlx::query(
        "INSERT INTO performer_activities (id, performer_id, date, start_time, end_time,
                                           activity_name, roles, kind, notes, class_type,
                                           room, class_label, recorded_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&record.id)
    .bind(&record.performer_id)
    .bind(&record.date)
    .bind(&record.start_time)
    .bind(&record.end_time)
    .bind(&record.activity_name)
    .bind(&record.roles)
    .bind(&record.kind)
    .bind(&record.notes)
    .bind(&record.class_type)
    .bind(&record.room)
    .bind(&record.class_label)
    .bind(&record.recorded_at)
    .execute(pool)
    .await
    .context("Failed to append performer history")?;

    Ok(())
}

/// All performer display names, sorted ascending (search dropdown source)
pub async fn list_performer_names(pool: &SqlitePool) -> Result<Vec<String>> {
    let names: Vec<String> = sqlx::query_scalar("SELECT name FROM performers ORDER BY name ASC")
        .fetch_all(pool)
        .await
        .context("Failed to list performers")?;

    Ok(names)
}

/// One performer's history, ordered by date then start-time sort key
pub async fn performer_history(pool: &SqlitePool, performer_id: &str) -> Result<Vec<HistoryRow>> {
    let mut rows: Vec<HistoryRow> = sqlx::query_as(
        "SELECT date, start_time, end_time, activity_name, roles, kind, notes,
                class_type, room, class_label, recorded_at
         FROM performer_activities
         WHERE performer_id = ?",
    )
    .bind(performer_id)
    .fetch_all(pool)
    .await
    .context("Failed to load performer history")?;

    rows.sort_by_key(|row| (row.date.clone(), sort_key(&row.start_time)));

    Ok(rows)
}

/// Class instances matching every provided filter, ordered like history
pub async fn search_classes(pool: &SqlitePool, filters: &ClassFilters) -> Result<Vec<ClassRow>> {
    let mut sql = String::from(
        "SELECT id, date, start_time, end_time, activity_name, age_group, level,
                class_type, room, notes, performers, class_label
         FROM classes WHERE 1 = 1",
    );
    let mut binds: Vec<&String> = Vec::new();

    for (column, value) in [
        ("date", &filters.date),
        ("start_time", &filters.start_time),
        ("age_group", &filters.age_group),
        ("level", &filters.level),
        ("room", &filters.room),
    ] {
        if let Some(value) = value {
            sql.push_str(&format!(" AND {} = ?", column));
            binds.push(value);
        }
    }

    let mut query = sqlx::query_as::<_, ClassRow>(&sql);
    for value in binds {
        query = query.bind(value);
    }

    let mut rows = query
        .fetch_all(pool)
        .await
        .context("Failed to search classes")?;

    rows.sort_by_key(|row| (row.date.clone(), sort_key(&row.start_time)));

    Ok(rows)
}
