//! Time entry normalization and sort keys
//!
//! Schedule times arrive as free-form text (`"11AM"`, `"1.30"`, `"13:00"`)
//! and must be displayed, stored, and queried in one canonical 12-hour form.
//! Every function here is total: input that does not look like a clock time
//! degrades to pass-through or a sentinel sort key, never an error.

/// Sort key for entries whose time cannot be parsed (sorts after all real times)
pub const SORT_KEY_LAST: u32 = u32::MAX;

/// Highest hour accepted as a clock time; larger hours pass through unchanged
const MAX_HOUR: u32 = 23;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    fn label(&self) -> &'static str {
        match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        }
    }

    /// Case-insensitive match of a two-character meridiem suffix
    fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("am") {
            Some(Meridiem::Am)
        } else if s.eq_ignore_ascii_case("pm") {
            Some(Meridiem::Pm)
        } else {
            None
        }
    }
}

/// Normalize a free-form time string to canonical `HH:MM AM|PM` form.
///
/// Accepted shapes, tried against the whole (trimmed) input:
/// - `H[.:]MM` with optional meridiem: `"1.30pm"`, `"9:00"`, `"1300"`
/// - bare hour with optional meridiem: `"9"`, `"11AM"`
///
/// When no meridiem is supplied: hours 13-23 convert to PM, hour 0 becomes
/// 12 AM, hour 12 is taken as PM regardless of minutes, hours 1-11 default
/// to AM. Anything else (including hours above 23) is returned unchanged
/// rather than rejected; normalization is not validation.
///
/// Canonical output is a fixed point: normalizing it again yields itself.
///
/// # Examples
///
/// ```
/// use dayls_common::clock::normalize;
///
/// assert_eq!(normalize("11AM"), "11:00 AM");
/// assert_eq!(normalize("1.30pm"), "01:30 PM");
/// assert_eq!(normalize("13:00"), "01:00 PM");
/// assert_eq!(normalize("00:15"), "12:15 AM");
/// assert_eq!(normalize("noonish"), "noonish");
/// ```
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let Some((hour, minutes, meridiem)) = parse_full(trimmed) else {
        return trimmed.to_string();
    };

    let mut hour = hour;
    let meridiem = match meridiem {
        Some(m) => m,
        None => infer_meridiem(&mut hour, minutes),
    };

    // 12 AM is hour 0 in the 24-hour frame; display maps 0 back to 12
    if meridiem == Meridiem::Am && hour == 12 {
        hour = 0;
    }

    let display_hour = match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };

    format!("{:02}:{:02} {}", display_hour, minutes, meridiem.label())
}

/// Convert a time string to minutes after midnight for ordering.
///
/// Normalizes the input, then scans the result for the first `H:MM AM|PM`
/// occurrence, so a pass-through string that embeds a canonical time still
/// keys correctly. Unparsable input returns [`SORT_KEY_LAST`].
///
/// # Examples
///
/// ```
/// use dayls_common::clock::{sort_key, SORT_KEY_LAST};
///
/// assert_eq!(sort_key("12:00 AM"), 0);
/// assert_eq!(sort_key("12:00 PM"), 720);
/// assert_eq!(sort_key("11:59 PM"), 1439);
/// assert_eq!(sort_key(""), SORT_KEY_LAST);
/// ```
pub fn sort_key(raw: &str) -> u32 {
    if raw.trim().is_empty() {
        return SORT_KEY_LAST;
    }

    let normalized = normalize(raw);
    let Some((mut hour, minutes, meridiem)) = scan(&normalized) else {
        return SORT_KEY_LAST;
    };

    if meridiem == Meridiem::Pm && hour != 12 {
        hour += 12;
    }
    if meridiem == Meridiem::Am && hour == 12 {
        hour = 0;
    }

    hour * 60 + minutes
}

/// Compact token for class names: minutes dropped when `:00`, meridiem
/// appended with no separator, hour without leading zero.
///
/// Input that contains no `H:MM AM|PM` shape is reduced to its alphanumeric
/// characters as a best-effort fallback.
///
/// # Examples
///
/// ```
/// use dayls_common::clock::compact_time;
///
/// assert_eq!(compact_time("11:00 AM"), "11AM");
/// assert_eq!(compact_time("01:30 PM"), "130PM");
/// assert_eq!(compact_time("mess * 1"), "mess1");
/// ```
pub fn compact_time(value: &str) -> String {
    match scan(value) {
        Some((hour, minutes, meridiem)) => {
            if minutes == 0 {
                format!("{}{}", hour, meridiem.label())
            } else {
                format!("{}{:02}{}", hour, minutes, meridiem.label())
            }
        }
        None => value.chars().filter(|c| c.is_ascii_alphanumeric()).collect(),
    }
}

/// Meridiem inference when the input carried none. May rewrite the hour
/// (24-hour entries fold into the 12-hour frame).
fn infer_meridiem(hour: &mut u32, _minutes: u32) -> Meridiem {
    match *hour {
        13..=23 => {
            *hour -= 12;
            Meridiem::Pm
        }
        0 => {
            *hour = 12;
            Meridiem::Am
        }
        // Hour 12 with no meridiem is taken as PM, whatever the minutes
        12 => Meridiem::Pm,
        _ => Meridiem::Am,
    }
}

/// Match the whole input as `H[.:]?MM? \s* meridiem?`.
///
/// The hour is matched greedily (two digits, then one on backtrack), the
/// minutes are exactly two digits when present, so `"130"` reads as 1:30.
fn parse_full(input: &str) -> Option<(u32, u32, Option<Meridiem>)> {
    let bytes = input.as_bytes();
    let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }

    for hour_len in [2usize, 1] {
        if digits < hour_len {
            continue;
        }
        let hour: u32 = input[..hour_len].parse().ok()?;
        let mut pos = hour_len;

        // Optional single separator
        if bytes.get(pos) == Some(&b'.') || bytes.get(pos) == Some(&b':') {
            pos += 1;
        }

        // Optional two-digit minutes
        let mut minutes = 0u32;
        if bytes.len() >= pos + 2
            && bytes[pos].is_ascii_digit()
            && bytes[pos + 1].is_ascii_digit()
        {
            minutes = input[pos..pos + 2].parse().ok()?;
            pos += 2;
        }

        // Optional whitespace before the meridiem
        while pos < bytes.len() && (bytes[pos] as char).is_whitespace() {
            pos += 1;
        }

        let meridiem = if pos == bytes.len() {
            None
        } else if let Some(m) = Meridiem::parse(&input[pos..]) {
            Some(m)
        } else {
            continue;
        };

        if hour > MAX_HOUR {
            return None;
        }
        return Some((hour, minutes, meridiem));
    }

    None
}

/// Scan for the first `H:MM AM|PM` substring (canonical clock shape).
fn scan(input: &str) -> Option<(u32, u32, Meridiem)> {
    let bytes = input.as_bytes();
    for start in 0..bytes.len() {
        if !bytes[start].is_ascii_digit() {
            continue;
        }
        for hour_len in [2usize, 1] {
            if let Some(found) = scan_at(input, start, hour_len) {
                return Some(found);
            }
        }
    }
    None
}

fn scan_at(input: &str, start: usize, hour_len: usize) -> Option<(u32, u32, Meridiem)> {
    let bytes = input.as_bytes();
    let mut pos = start;

    if bytes.len() < pos + hour_len || !bytes[pos..pos + hour_len].iter().all(u8::is_ascii_digit) {
        return None;
    }
    let hour: u32 = input[pos..pos + hour_len].parse().ok()?;
    if hour > MAX_HOUR {
        return None;
    }
    pos += hour_len;

    if bytes.get(pos) != Some(&b':') {
        return None;
    }
    pos += 1;

    if bytes.len() < pos + 2 || !bytes[pos].is_ascii_digit() || !bytes[pos + 1].is_ascii_digit() {
        return None;
    }
    let minutes: u32 = input[pos..pos + 2].parse().ok()?;
    pos += 2;

    while pos < bytes.len() && (bytes[pos] as char).is_whitespace() {
        pos += 1;
    }

    // Checked slice: the next two bytes may fall inside a multibyte char
    let meridiem = Meridiem::parse(input.get(pos..pos + 2)?)?;

    Some((hour, minutes, meridiem))
}
