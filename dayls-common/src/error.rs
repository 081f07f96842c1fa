//! Common error types for Dayls
//!
//! Shared by the library layers (config, database init). HTTP handlers
//! carry their own per-endpoint error enums in `dayls-sd`.

use thiserror::Error;

/// Common result type for Dayls operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across Dayls crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
