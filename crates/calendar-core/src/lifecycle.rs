//! Event lifecycle rules: draft validation, permission checks and attendance
//!
//! An event is either active or soft-deleted; soft-deleted events never come
//! back. Everything here is pure so services can call it with whatever the
//! repositories returned.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::entities::{Event, EventImage, User};
use crate::error::DomainError;
use crate::value_objects::{CommunityId, CountryId, EventTypeId, Recurrence, UserId};

/// Validated input for creating or editing an event
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct EventDraft {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    pub description: String,
    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub country_id: Option<CountryId>,
    pub event_type_id: Option<EventTypeId>,
    pub community_ids: Vec<CommunityId>,
    pub organizer_ids: Vec<UserId>,
    pub recurrence: Recurrence,
}

impl EventDraft {
    /// Draft of an existing event, used as the base for partial edits
    pub fn from_event(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            start_time: event.start_time,
            end_time: event.end_time,
            country_id: event.country_id,
            event_type_id: event.event_type_id,
            community_ids: event.community_ids.clone(),
            organizer_ids: event.organizer_ids.clone(),
            recurrence: event.recurrence,
        }
    }
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Validate a draft, collecting every field error.
///
/// On top of the derived length rules: the title must not be blank, the end
/// must not precede the start, and the recurrence interval must be at least 1.
pub fn validate_draft(draft: &EventDraft) -> Result<(), ValidationErrors> {
    let mut errors = match draft.validate() {
        Ok(()) => ValidationErrors::new(),
        Err(errors) => errors,
    };

    if !draft.title.is_empty() && draft.title.trim().is_empty() {
        errors.add("title", field_error("required", "Title is required"));
    }
    if draft.end_time < draft.start_time {
        errors.add(
            "end_time",
            field_error("end_before_start", "End time must be after start time"),
        );
    }
    if draft.recurrence.interval < 1 {
        errors.add(
            "recurrence_interval",
            field_error("range", "Recurrence interval must be at least 1"),
        );
    }
    if let Some(until) = draft.recurrence.until {
        if draft.recurrence.is_recurring() && until < draft.start_time.date_naive() {
            errors.add(
                "recurrence_end_date",
                field_error("end_before_start", "Recurrence end date is before the event start"),
            );
        }
    }

    if errors.errors().is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Owner or organizer may edit
pub fn ensure_can_edit(event: &Event, user_id: UserId) -> Result<(), DomainError> {
    if event.is_organizer(user_id) {
        Ok(())
    } else {
        Err(DomainError::NotEventOrganizer)
    }
}

/// Only the owner may delete the event or change its organizers
pub fn ensure_owner(event: &Event, user_id: UserId) -> Result<(), DomainError> {
    if event.is_owner(user_id) {
        Ok(())
    } else {
        Err(DomainError::NotEventOwner)
    }
}

/// Attendance is owner-only and opens once the event has ended
pub fn ensure_attendance_open(
    event: &Event,
    user_id: UserId,
    now: DateTime<Utc>,
) -> Result<(), DomainError> {
    ensure_owner(event, user_id)?;
    if event.has_ended(now) {
        Ok(())
    } else {
        Err(DomainError::AttendanceNotOpen)
    }
}

/// Keep only submitted users who are current participants, in participant order
pub fn filter_attendees(submitted: &[UserId], participants: &[UserId]) -> Vec<UserId> {
    participants
        .iter()
        .copied()
        .filter(|p| submitted.contains(p))
        .collect()
}

/// Event owner, the uploader, or an administrator may delete an image
pub fn can_delete_image(event: &Event, image: &EventImage, user: &User) -> bool {
    user.is_admin || event.is_owner(user.id) || image.is_uploaded_by(user.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::{EventId, ImageId, RecurrencePattern};
    use chrono::{Duration, NaiveDate, TimeZone};

    fn draft() -> EventDraft {
        EventDraft {
            title: "Cleanup".to_string(),
            description: String::new(),
            location: "Herastrau".to_string(),
            start_time: Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
            country_id: None,
            event_type_id: None,
            community_ids: Vec::new(),
            organizer_ids: Vec::new(),
            recurrence: Recurrence::none(),
        }
    }

    fn event(owner: i64) -> Event {
        let d = draft();
        Event::new(EventId::new(1), Some(UserId::new(owner)), d.title, d.start_time, d.end_time)
    }

    #[test]
    fn test_valid_draft() {
        assert!(validate_draft(&draft()).is_ok());
    }

    #[test]
    fn test_end_before_start_is_field_error() {
        let mut d = draft();
        d.end_time = d.start_time - Duration::minutes(1);
        let errors = validate_draft(&d).unwrap_err();
        assert!(errors.field_errors().contains_key("end_time"));
    }

    #[test]
    fn test_equal_start_and_end_is_valid() {
        let mut d = draft();
        d.end_time = d.start_time;
        assert!(validate_draft(&d).is_ok());
    }

    #[test]
    fn test_title_rules() {
        let mut d = draft();
        d.title = String::new();
        assert!(validate_draft(&d).unwrap_err().field_errors().contains_key("title"));

        d.title = "   ".to_string();
        assert!(validate_draft(&d).unwrap_err().field_errors().contains_key("title"));

        d.title = "x".repeat(201);
        assert!(validate_draft(&d).is_err());

        d.title = "x".repeat(200);
        assert!(validate_draft(&d).is_ok());
    }

    #[test]
    fn test_location_too_long() {
        let mut d = draft();
        d.location = "x".repeat(201);
        assert!(validate_draft(&d).unwrap_err().field_errors().contains_key("location"));
    }

    #[test]
    fn test_multiple_errors_are_collected() {
        let mut d = draft();
        d.title = String::new();
        d.end_time = d.start_time - Duration::hours(1);
        d.recurrence = Recurrence::new(RecurrencePattern::Weekly, 0, None);
        let errors = validate_draft(&d).unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("end_time"));
        assert!(fields.contains_key("recurrence_interval"));
    }

    #[test]
    fn test_recurrence_until_before_start() {
        let mut d = draft();
        d.recurrence = Recurrence::new(
            RecurrencePattern::Daily,
            1,
            NaiveDate::from_ymd_opt(2024, 5, 1),
        );
        assert!(validate_draft(&d).is_err());
    }

    #[test]
    fn test_permissions() {
        let mut e = event(10);
        e.organizer_ids.push(UserId::new(11));

        assert!(ensure_can_edit(&e, UserId::new(10)).is_ok());
        assert!(ensure_can_edit(&e, UserId::new(11)).is_ok());
        assert!(matches!(
            ensure_can_edit(&e, UserId::new(12)),
            Err(DomainError::NotEventOrganizer)
        ));

        assert!(ensure_owner(&e, UserId::new(10)).is_ok());
        assert!(matches!(
            ensure_owner(&e, UserId::new(11)),
            Err(DomainError::NotEventOwner)
        ));
    }

    #[test]
    fn test_ownerless_event_has_no_owner_rights() {
        let mut e = event(10);
        e.owner_id = None;
        assert!(ensure_owner(&e, UserId::new(10)).is_err());
    }

    #[test]
    fn test_attendance_gate() {
        let e = event(10);
        let before = e.end_time - Duration::seconds(1);
        assert!(matches!(
            ensure_attendance_open(&e, UserId::new(10), before),
            Err(DomainError::AttendanceNotOpen)
        ));
        assert!(ensure_attendance_open(&e, UserId::new(10), e.end_time).is_ok());
        assert!(matches!(
            ensure_attendance_open(&e, UserId::new(99), e.end_time),
            Err(DomainError::NotEventOwner)
        ));
    }

    #[test]
    fn test_filter_attendees_intersects() {
        let participants = [UserId::new(1), UserId::new(2), UserId::new(3)];
        let submitted = [UserId::new(3), UserId::new(1), UserId::new(42)];
        assert_eq!(
            filter_attendees(&submitted, &participants),
            [UserId::new(1), UserId::new(3)]
        );
        assert!(filter_attendees(&[], &participants).is_empty());
    }

    #[test]
    fn test_can_delete_image() {
        let e = event(10);
        let image = EventImage {
            id: ImageId::new(1),
            event_id: e.id,
            file_path: "event_images/2024/06/01/a.jpg".to_string(),
            original_name: "a.jpg".to_string(),
            uploaded_by: Some(UserId::new(20)),
            created_at: Utc::now(),
        };
        let user = |id: i64| User::new(UserId::new(id), format!("u{id}"), format!("u{id}@x.ro"));

        assert!(can_delete_image(&e, &image, &user(10)));
        assert!(can_delete_image(&e, &image, &user(20)));
        assert!(!can_delete_image(&e, &image, &user(30)));

        let mut admin = user(30);
        admin.is_admin = true;
        assert!(can_delete_image(&e, &image, &admin));
    }
}
