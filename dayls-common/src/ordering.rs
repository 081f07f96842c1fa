//! Schedule ordering
//!
//! Total order over schedule entries by start-time sort key, ties broken by
//! end-time sort key. Entries without an end time (instructor events) key as
//! [`SORT_KEY_LAST`](crate::clock::SORT_KEY_LAST) on the secondary key, so
//! they fall after ended entries at the same start and keep their relative
//! input order among themselves.

use crate::clock::{sort_key, SORT_KEY_LAST};

/// Position of an entry within a day's schedule.
pub trait SchedulePosition {
    fn start_time(&self) -> &str;

    /// `None` for entries that have no end time (point events).
    fn end_time(&self) -> Option<&str>;
}

/// Return the entries in schedule order without mutating the input.
///
/// Stable sort: entries with equal keys keep their relative input order.
pub fn sorted_by_schedule<T: SchedulePosition + Clone>(entries: &[T]) -> Vec<T> {
    let mut ordered: Vec<T> = entries.to_vec();
    ordered.sort_by_key(|entry| {
        let end = entry.end_time().map_or(SORT_KEY_LAST, sort_key);
        (sort_key(entry.start_time()), end)
    });
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Block {
        start: &'static str,
        end: &'static str,
        tag: &'static str,
    }

    impl SchedulePosition for Block {
        fn start_time(&self) -> &str {
            self.start
        }

        fn end_time(&self) -> Option<&str> {
            Some(self.end)
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Event {
        start: &'static str,
        tag: &'static str,
    }

    impl SchedulePosition for Event {
        fn start_time(&self) -> &str {
            self.start
        }

        fn end_time(&self) -> Option<&str> {
            None
        }
    }

    #[test]
    fn test_orders_by_start_then_end() {
        let blocks = vec![
            Block { start: "2:00 PM", end: "3:00 PM", tag: "afternoon" },
            Block { start: "11:00 AM", end: "12:00 PM", tag: "late-morning" },
            Block { start: "11:00 AM", end: "11:30 AM", tag: "early-morning" },
        ];

        let ordered = sorted_by_schedule(&blocks);
        let tags: Vec<&str> = ordered.iter().map(|b| b.tag).collect();
        assert_eq!(tags, ["early-morning", "late-morning", "afternoon"]);
    }

    #[test]
    fn test_input_not_mutated() {
        let blocks = vec![
            Block { start: "2:00 PM", end: "3:00 PM", tag: "b" },
            Block { start: "9:00 AM", end: "10:00 AM", tag: "a" },
        ];
        let before = blocks.clone();
        let _ = sorted_by_schedule(&blocks);
        assert_eq!(blocks, before);
    }

    #[test]
    fn test_unparsable_start_sorts_last() {
        let blocks = vec![
            Block { start: "tbd", end: "", tag: "unknown" },
            Block { start: "9:00 AM", end: "10:00 AM", tag: "morning" },
        ];
        let ordered = sorted_by_schedule(&blocks);
        assert_eq!(ordered[0].tag, "morning");
        assert_eq!(ordered[1].tag, "unknown");
    }

    #[test]
    fn test_point_events_keep_input_order_on_ties() {
        let events = vec![
            Event { start: "10:00 AM", tag: "first" },
            Event { start: "9:00 AM", tag: "earliest" },
            Event { start: "10:00 AM", tag: "second" },
        ];
        let ordered = sorted_by_schedule(&events);
        let tags: Vec<&str> = ordered.iter().map(|e| e.tag).collect();
        assert_eq!(tags, ["earliest", "first", "second"]);
    }
}
