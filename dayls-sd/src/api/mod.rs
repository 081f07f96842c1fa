//! HTTP handlers for the Schedule Desk API

mod classes;
mod clock;
mod health;
mod performers;
mod schedule;

pub use classes::search_classes;
pub use clock::clock_preview;
pub use health::health_check;
pub use performers::{list_performers, performer_history, performer_insight};
pub use schedule::{get_schedule, save_schedule};
