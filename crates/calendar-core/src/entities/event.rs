//! Event entity - a calendar event and its lifecycle state

use chrono::{DateTime, NaiveDate, Utc};

use crate::value_objects::{CommunityId, CountryId, EventId, EventTypeId, Recurrence, UserId};

/// Event entity
///
/// Participants and attendees are not carried here; they are queried through
/// the repository since they can be large and change independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: EventId,
    pub owner_id: Option<UserId>,
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub country_id: Option<CountryId>,
    pub event_type_id: Option<EventTypeId>,
    pub community_ids: Vec<CommunityId>,
    pub organizer_ids: Vec<UserId>,
    pub recurrence: Recurrence,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Create a new active one-off Event
    pub fn new(
        id: EventId,
        owner_id: Option<UserId>,
        title: String,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            owner_id,
            title,
            description: String::new(),
            location: String::new(),
            start_time,
            end_time,
            country_id: None,
            event_type_id: None,
            community_ids: Vec::new(),
            organizer_ids: Vec::new(),
            recurrence: Recurrence::none(),
            is_deleted: false,
            deleted_at: None,
            deleted_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_owner(&self, user_id: UserId) -> bool {
        self.owner_id == Some(user_id)
    }

    /// Owner counts as an organizer
    pub fn is_organizer(&self, user_id: UserId) -> bool {
        self.is_owner(user_id) || self.organizer_ids.contains(&user_id)
    }

    #[inline]
    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        now >= self.end_time
    }

    #[inline]
    pub fn start_date(&self) -> NaiveDate {
        self.start_time.date_naive()
    }

    #[inline]
    pub fn end_date(&self) -> NaiveDate {
        self.end_time.date_naive()
    }

    /// Number of calendar days touched by one instance
    pub fn day_span(&self) -> i64 {
        (self.end_date() - self.start_date()).num_days().max(0) + 1
    }

    /// Mark the event as deleted
    pub fn soft_delete(&mut self, by: UserId, at: DateTime<Utc>) {
        self.is_deleted = true;
        self.deleted_at = Some(at);
        self.deleted_by = Some(by);
    }
}
