//! Database initialization
//!
//! Creates the schedule store on first run and opens it idempotently
//! afterwards: every table and setting is created with `IF NOT EXISTS` /
//! `INSERT OR IGNORE`, so calling [`init_database`] repeatedly is safe.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Default model for the performer-insight call
pub const DEFAULT_INSIGHT_MODEL: &str = "gemini-2.0-flash";

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL keeps reads responsive while a save is writing
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    create_schedules_table(&pool).await?;
    create_classes_table(&pool).await?;
    create_performers_table(&pool).await?;
    create_performer_activities_table(&pool).await?;
    create_settings_table(&pool).await?;

    init_default_settings(&pool).await?;

    Ok(pool)
}

/// One JSON day-schedule document per calendar date, replaced wholesale on save
async fn create_schedules_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schedules (
            date TEXT PRIMARY KEY,
            document TEXT NOT NULL,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Class instances keyed by their composite identifier (date, weekday,
/// compact time, class type, room); re-saving the same slot updates in place
async fn create_classes_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS classes (
            id TEXT PRIMARY KEY,
            date TEXT NOT NULL,
            start_time TEXT NOT NULL,
            end_time TEXT NOT NULL,
            activity_name TEXT NOT NULL,
            age_group TEXT,
            level TEXT,
            class_type TEXT NOT NULL,
            room TEXT NOT NULL,
            notes TEXT NOT NULL DEFAULT '',
            performers TEXT NOT NULL DEFAULT '[]',
            class_label TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_classes_date ON classes(date)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_classes_start_time ON classes(start_time)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Master performer list keyed by name slug; collisions between names that
/// slug identically merge into one row
async fn create_performers_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS performers (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            last_seen TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Append-only participation history, one row per performer per activity save
async fn create_performer_activities_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS performer_activities (
            id TEXT PRIMARY KEY,
            performer_id TEXT NOT NULL REFERENCES performers(id),
            date TEXT NOT NULL,
            start_time TEXT NOT NULL,
            end_time TEXT NOT NULL,
            activity_name TEXT NOT NULL,
            roles TEXT NOT NULL DEFAULT '',
            kind TEXT,
            notes TEXT NOT NULL DEFAULT '',
            class_type TEXT NOT NULL DEFAULT '',
            room TEXT NOT NULL,
            class_label TEXT NOT NULL,
            recorded_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_performer_activities_performer
         ON performer_activities(performer_id)",
    )
    .execute(pool)
    .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_performer_activities_date
         ON performer_activities(date)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_settings_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Initialize default settings without overwriting user changes
async fn init_default_settings(pool: &SqlitePool) -> Result<()> {
    ensure_setting(pool, "insight_api_key", "").await?;
    ensure_setting(pool, "insight_model", DEFAULT_INSIGHT_MODEL).await?;

    Ok(())
}

/// Insert a setting if absent; reset it to the default if NULLed out
async fn ensure_setting(pool: &SqlitePool, key: &str, default_value: &str) -> Result<()> {
    sqlx::query("INSERT OR IGNORE INTO settings (key, value) VALUES (?, ?)")
        .bind(key)
        .bind(default_value)
        .execute(pool)
        .await?;

    sqlx::query("UPDATE settings SET value = ? WHERE key = ? AND value IS NULL")
        .bind(default_value)
        .bind(key)
        .execute(pool)
        .await?;

    Ok(())
}

/// Read a setting value, falling back to the given default when absent
pub async fn get_setting(pool: &SqlitePool, key: &str, default_value: &str) -> Result<String> {
    let value = sqlx::query_scalar::<_, Option<String>>("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?
        .flatten();

    Ok(value.unwrap_or_else(|| default_value.to_string()))
}
