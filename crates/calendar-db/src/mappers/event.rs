//! Event model <-> entity mapper

use chrono::{DateTime, NaiveDate, Utc};

use calendar_core::entities::Event;
use calendar_core::feed::FeedEvent;
use calendar_core::lifecycle::EventDraft;
use calendar_core::value_objects::{
    CommunityId, CountryId, EventId, EventTypeId, Recurrence, RecurrencePattern, UserId,
};

use crate::models::{EventModel, FeedEventModel};

/// Rebuild a recurrence rule from its three columns
pub fn recurrence_from_columns(
    pattern: &str,
    interval: i32,
    until: Option<NaiveDate>,
) -> Recurrence {
    Recurrence::new(
        RecurrencePattern::from_db(pattern),
        u32::try_from(interval).unwrap_or(1).max(1),
        until,
    )
}

impl From<EventModel> for Event {
    fn from(model: EventModel) -> Self {
        Event {
            id: EventId::new(model.id),
            owner_id: model.owner_id.map(UserId::new),
            title: model.title,
            description: model.description,
            location: model.location,
            start_time: model.start_time,
            end_time: model.end_time,
            country_id: model.country_id.map(CountryId::new),
            event_type_id: model.event_type_id.map(EventTypeId::new),
            community_ids: model.community_ids.into_iter().map(CommunityId::new).collect(),
            organizer_ids: model.organizer_ids.into_iter().map(UserId::new).collect(),
            recurrence: recurrence_from_columns(
                &model.recurrence_pattern,
                model.recurrence_interval,
                model.recurrence_end_date,
            ),
            is_deleted: model.is_deleted,
            deleted_at: model.deleted_at,
            deleted_by: model.deleted_by.map(UserId::new),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<FeedEventModel> for FeedEvent {
    fn from(model: FeedEventModel) -> Self {
        FeedEvent {
            id: EventId::new(model.id),
            title: model.title,
            description: model.description,
            location: model.location,
            start_time: model.start_time,
            end_time: model.end_time,
            recurrence: recurrence_from_columns(
                &model.recurrence_pattern,
                model.recurrence_interval,
                model.recurrence_end_date,
            ),
            event_type: model.event_type,
            participant_count: model.participant_count,
            joined: model.joined,
        }
    }
}

/// Column values of a draft, ready for binding
pub struct EventInsert<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub location: &'a str,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub country_id: Option<i64>,
    pub event_type_id: Option<i64>,
    pub recurrence_pattern: &'static str,
    pub recurrence_interval: i32,
    pub recurrence_end_date: Option<NaiveDate>,
    pub community_ids: Vec<i64>,
    pub organizer_ids: Vec<i64>,
}

impl<'a> EventInsert<'a> {
    pub fn new(draft: &'a EventDraft) -> Self {
        Self {
            title: draft.title.trim(),
            description: &draft.description,
            location: draft.location.trim(),
            start_time: draft.start_time,
            end_time: draft.end_time,
            country_id: draft.country_id.map(CountryId::into_inner),
            event_type_id: draft.event_type_id.map(EventTypeId::into_inner),
            recurrence_pattern: draft.recurrence.pattern.as_str(),
            recurrence_interval: i32::try_from(draft.recurrence.interval).unwrap_or(i32::MAX),
            recurrence_end_date: draft.recurrence.until,
            community_ids: draft.community_ids.iter().map(|id| id.into_inner()).collect(),
            organizer_ids: draft.organizer_ids.iter().map(|id| id.into_inner()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recurrence_from_columns() {
        let r = recurrence_from_columns("weekly", 2, None);
        assert_eq!(r.pattern, RecurrencePattern::Weekly);
        assert_eq!(r.interval, 2);

        // out-of-range intervals fall back to 1
        assert_eq!(recurrence_from_columns("daily", 0, None).interval, 1);
        assert_eq!(recurrence_from_columns("daily", -3, None).interval, 1);
        assert_eq!(recurrence_from_columns("bogus", 1, None).pattern, RecurrencePattern::None);
    }
}
