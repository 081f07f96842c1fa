//! # Dayls Common Library
//!
//! Shared code for the Dayls Schedule Desk:
//! - Time normalization and sort keys (`clock`)
//! - Performer and class-instance identifiers (`ident`)
//! - Schedule ordering (`ordering`)
//! - Day-schedule document model and closed vocabularies (`model`)
//! - Database schema initialization (`db`)
//! - Configuration and root-folder resolution (`config`)

pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod ident;
pub mod model;
pub mod ordering;

pub use error::{Error, Result};
