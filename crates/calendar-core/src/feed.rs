//! Calendar feed generation
//!
//! Every stored event is expanded into one occurrence per calendar day it
//! touches. Recurring events repeat that per-day expansion for each series
//! instance. All dates are UTC calendar dates.

use std::collections::HashSet;

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, Utc};

use crate::value_objects::{EventId, Recurrence};

/// Event summary as selected for the feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEvent {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub recurrence: Recurrence,
    pub event_type: Option<String>,
    pub participant_count: i64,
    pub joined: bool,
}

/// One visible day of an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    /// `"<event id>-<YYYY-MM-DD>"`
    pub id: String,
    pub orig_id: EventId,
    pub date: NaiveDate,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub description: String,
    pub event_type: Option<String>,
    pub participants: i64,
    pub joined: bool,
    pub location: String,
}

/// Inclusive date window; open ends are unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeedWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl FeedWindow {
    pub const fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date <= e)
    }

    /// Build a window from raw query values. Unparseable bounds are ignored.
    pub fn from_query(start: Option<&str>, end: Option<&str>) -> Self {
        Self {
            start: start.and_then(parse_date_bound),
            end: end.and_then(parse_date_bound),
        }
    }
}

/// Accepts `YYYY-MM-DD` optionally followed by a time part
/// (`2024-06-01T00:00:00+03:00`); only the date is kept.
pub fn parse_date_bound(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date_part = raw.get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Synthesized occurrence id
pub fn occurrence_id(event_id: EventId, date: NaiveDate) -> String {
    format!("{}-{}", event_id, date.format("%Y-%m-%d"))
}

/// Expand a single event into its visible occurrences.
///
/// Expansion begins at the first series instance that can reach the window
/// start. It stops at the recurrence end date, the window end, or after
/// `max_instances` instances from that point, whichever comes first. A day
/// covered by two overlapping instances is emitted once.
pub fn expand_event(event: &FeedEvent, window: &FeedWindow, max_instances: u32) -> Vec<Occurrence> {
    let first = event.start_time.date_naive();
    let span = (event.end_time.date_naive() - first).num_days().max(0);
    let start_tod = event.start_time.time();
    let end_tod = event.end_time.time();

    let mut seen = HashSet::new();
    let mut out = Vec::new();

    let skip = window
        .start
        .map_or(0, |start| event.recurrence.first_instance_reaching(first, span, start));

    for n in skip..skip.saturating_add(max_instances.max(1)) {
        let Some(instance) = event.recurrence.nth_date(first, n) else {
            break;
        };
        if n > 0 && event.recurrence.until.is_some_and(|until| instance > until) {
            break;
        }
        if window.end.is_some_and(|end| instance > end) {
            break;
        }

        for offset in 0..=span {
            let Some(day) = instance.checked_add_days(Days::new(offset as u64)) else {
                break;
            };
            if !window.contains(day) || !seen.insert(day) {
                continue;
            }
            out.push(Occurrence {
                id: occurrence_id(event.id, day),
                orig_id: event.id,
                date: day,
                title: event.title.clone(),
                start: day.and_time(start_tod),
                end: day.and_time(end_tod),
                description: event.description.clone(),
                event_type: event.event_type.clone(),
                participants: event.participant_count,
                joined: event.joined,
                location: event.location.clone(),
            });
        }
    }

    out
}

/// Build the feed from the filtered event set.
///
/// Events selected more than once (several matching communities) are kept
/// once. Output is ordered by event start time, then id, then date.
pub fn build_feed(
    mut events: Vec<FeedEvent>,
    window: &FeedWindow,
    max_instances: u32,
) -> Vec<Occurrence> {
    let mut seen = HashSet::new();
    events.retain(|e| seen.insert(e.id));
    events.sort_by(|a, b| a.start_time.cmp(&b.start_time).then(a.id.cmp(&b.id)));

    events
        .iter()
        .flat_map(|e| expand_event(e, window, max_instances))
        .collect()
}
