//! Stable identifiers and display labels for performers and class instances
//!
//! These keys back the upsert semantics of the store: saving the same
//! performer or class slot twice lands on the same row.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::clock::compact_time;

/// Derive the database key for a performer from their display name.
///
/// Lowercase, every run of characters outside `[a-z0-9]` collapsed to a
/// single hyphen, no leading or trailing hyphen. Distinct names that slug
/// identically share a key and silently merge; callers must treat an empty
/// result as "no identifier" and skip persistence.
///
/// # Examples
///
/// ```
/// use dayls_common::ident::performer_slug;
///
/// assert_eq!(performer_slug("Ayaan Raj"), "ayaan-raj");
/// assert_eq!(performer_slug("  O'Brien!! "), "o-brien");
/// assert_eq!(performer_slug("   "), "");
/// ```
pub fn performer_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Three-letter weekday abbreviation for an ISO `YYYY-MM-DD` date.
///
/// Locale-independent; an unparsable date yields an empty string so id and
/// label derivation stay total.
pub fn weekday_abbrev(date: &str) -> &'static str {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => match d.weekday() {
            Weekday::Sun => "SUN",
            Weekday::Mon => "MON",
            Weekday::Tue => "TUE",
            Weekday::Wed => "WED",
            Weekday::Thu => "THU",
            Weekday::Fri => "FRI",
            Weekday::Sat => "SAT",
        },
        Err(_) => "",
    }
}

/// Upsert key for one scheduled class slot:
/// `date-WEEKDAY-compactTime-classTypeCode-room`.
///
/// Fields are joined with `-` and not escaped; the calling vocabularies
/// (ISO dates, closed room and class-type codes) keep the boundaries
/// unambiguous in practice.
pub fn class_instance_id(date: &str, start_time: &str, class_type: &str, room: &str) -> String {
    format!(
        "{}-{}-{}-{}-{}",
        date,
        weekday_abbrev(date),
        compact_time(start_time),
        class_type,
        room
    )
}

/// Display caption for a class slot: `WEEKDAY-compactTime-classTypeCode-room`.
///
/// Display-only; unlike [`class_instance_id`] it carries no date and makes
/// no uniqueness promise.
pub fn class_label(weekday: &str, compact_time: &str, class_type: &str, room: &str) -> String {
    format!("{}-{}-{}-{}", weekday, compact_time, class_type, room)
}
