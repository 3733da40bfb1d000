//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Ids are serialized as JSON integers.

use calendar_core::{
    CommunityId, CountryId, EventId, EventTypeId, ImageId, RecurrencePattern, UserId,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with tokens
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

impl AuthResponse {
    pub fn new(
        access_token: String,
        refresh_token: String,
        expires_in: i64,
        user: CurrentUserResponse,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Current authenticated user (includes email)
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// Public user summary
#[derive(Debug, Clone, Serialize)]
pub struct UserSummaryResponse {
    pub id: UserId,
    pub username: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub user_id: UserId,
    pub country_id: Option<CountryId>,
    pub community_id: Option<CommunityId>,
}

/// Upcoming events of the current user
#[derive(Debug, Serialize)]
pub struct MyEventsResponse {
    pub hosting: Vec<EventResponse>,
    pub participating: Vec<EventResponse>,
}

// ============================================================================
// Event Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct RecurrenceResponse {
    pub pattern: RecurrencePattern,
    pub interval: u32,
    pub end_date: Option<NaiveDate>,
}

/// Stored event
#[derive(Debug, Clone, Serialize)]
pub struct EventResponse {
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
    pub recurrence: RecurrenceResponse,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Event detail as seen by a (possibly anonymous) viewer
#[derive(Debug, Serialize)]
pub struct EventDetailResponse {
    #[serde(flatten)]
    pub event: EventResponse,
    pub participants: i64,
    pub joined: bool,
    pub is_owner: bool,
    pub can_edit: bool,
    pub has_ended: bool,
    pub images: Vec<ImageResponse>,
}

/// One calendar-day occurrence in the feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccurrenceResponse {
    /// `"<event id>-<YYYY-MM-DD>"`
    pub id: String,
    pub orig_id: EventId,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub description: String,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub participants: i64,
    pub joined: bool,
    pub location: String,
}

/// Result of a join or leave action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParticipationResponse {
    pub joined: bool,
    pub participants: i64,
}

/// Participants of an ended event and who attended
#[derive(Debug, Serialize)]
pub struct AttendanceResponse {
    pub event_id: EventId,
    pub participants: Vec<UserSummaryResponse>,
    pub attendee_ids: Vec<UserId>,
}

// ============================================================================
// Gallery Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ImageResponse {
    pub id: ImageId,
    pub event_id: EventId,
    pub url: String,
    pub file_name: String,
    pub original_name: String,
    pub uploaded_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

/// Outcome of a bulk delete
#[derive(Debug, Default, Serialize)]
pub struct BulkDeleteResponse {
    pub deleted: Vec<ImageId>,
    pub skipped: Vec<ImageId>,
}

/// ZIP archive of selected gallery images
#[derive(Debug)]
pub struct ImageArchive {
    /// Suggested download name
    pub file_name: String,
    pub bytes: Vec<u8>,
    /// Number of files written into the archive
    pub entries: usize,
}

// ============================================================================
// Lookup Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CountryResponse {
    pub id: CountryId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommunityResponse {
    pub id: CommunityId,
    pub name: String,
    pub country_id: Option<CountryId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventTypeResponse {
    pub id: EventTypeId,
    pub name: String,
    pub description: String,
}

/// The aggregate region as a community filter option
#[derive(Debug, Clone, Serialize)]
pub struct RegionOptionResponse {
    /// Value to pass as `community`
    pub value: String,
    pub label: String,
    pub communities: Vec<String>,
}

/// Options for the calendar filter bar
#[derive(Debug, Serialize)]
pub struct CalendarFiltersResponse {
    pub countries: Vec<CountryResponse>,
    pub communities: Vec<CommunityResponse>,
    pub region: RegionOptionResponse,
}

// ============================================================================
// Health Responses
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub database: bool,
}

impl ReadinessResponse {
    pub fn ready(database: bool) -> Self {
        Self {
            status: if database { "ready" } else { "not_ready" }.to_string(),
            database,
        }
    }
}
