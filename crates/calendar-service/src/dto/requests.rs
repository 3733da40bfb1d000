//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; those with field rules also
//! implement `Validate`.

use calendar_core::{
    CommunityId, CountryId, EventTypeId, ImageId, Recurrence, RecurrencePattern, UserId,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use validator::Validate;

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`)
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 150, message = "Username must be 3-150 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

    #[serde(default)]
    #[validate(length(max = 150, message = "First name must be at most 150 characters"))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(max = 150, message = "Last name must be at most 150 characters"))]
    pub last_name: String,
}

/// Login with email and password
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

// ============================================================================
// Event Requests
// ============================================================================

/// A targeted-community value: a community id or the aggregate region token
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CommunityTarget {
    Id(i64),
    Token(String),
}

impl CommunityTarget {
    /// Raw form value as the region resolver expects it
    pub fn raw(&self) -> String {
        match self {
            Self::Id(id) => id.to_string(),
            Self::Token(token) => token.clone(),
        }
    }
}

/// Recurrence settings of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RecurrenceInput {
    #[serde(default)]
    pub pattern: RecurrencePattern,

    #[serde(default = "default_interval")]
    pub interval: u32,

    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

fn default_interval() -> u32 {
    1
}

impl From<RecurrenceInput> for Recurrence {
    fn from(input: RecurrenceInput) -> Self {
        Recurrence::new(input.pattern, input.interval, input.end_date)
    }
}

/// Create event request
///
/// Length and ordering rules are checked on the assembled draft so that all
/// field errors are reported together.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub location: String,

    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,

    #[serde(default)]
    pub country_id: Option<CountryId>,

    #[serde(default)]
    pub event_type_id: Option<EventTypeId>,

    /// Community ids and/or the region token
    #[serde(default)]
    pub targeted_communities: Vec<CommunityTarget>,

    #[serde(default)]
    pub organizer_ids: Vec<UserId>,

    #[serde(default)]
    pub recurrence: Option<RecurrenceInput>,
}

/// Partial event update; absent fields keep their current value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,

    /// `null` clears the country
    #[serde(default, deserialize_with = "double_option")]
    pub country_id: Option<Option<CountryId>>,

    /// `null` clears the event type
    #[serde(default, deserialize_with = "double_option")]
    pub event_type_id: Option<Option<EventTypeId>>,

    pub targeted_communities: Option<Vec<CommunityTarget>>,

    /// Owner only
    pub organizer_ids: Option<Vec<UserId>>,

    pub recurrence: Option<RecurrenceInput>,
}

/// Join or leave an event
#[derive(Debug, Clone, Deserialize)]
pub struct ParticipateRequest {
    /// `join` or `leave`
    pub action: String,
}

/// Participation action parsed from [`ParticipateRequest`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipationAction {
    Join,
    Leave,
}

impl ParticipationAction {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "join" => Some(Self::Join),
            "leave" => Some(Self::Leave),
            _ => None,
        }
    }
}

/// Replace the attendee set
#[derive(Debug, Clone, Deserialize)]
pub struct MarkAttendanceRequest {
    #[serde(default)]
    pub user_ids: Vec<UserId>,
}

// ============================================================================
// Gallery Requests
// ============================================================================

/// Selection of gallery images for bulk delete or download
#[derive(Debug, Clone, Deserialize)]
pub struct ImageSelectionRequest {
    #[serde(default)]
    pub image_ids: Vec<ImageId>,
}

/// One uploaded file, as read from a multipart body
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

// ============================================================================
// Feed Requests
// ============================================================================

/// Raw feed query parameters. Unparseable values are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedParams {
    pub country: Option<String>,
    pub community: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

// ============================================================================
// Profile Requests
// ============================================================================

/// Update profile defaults; `null` clears a field
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub country_id: Option<Option<CountryId>>,

    #[serde(default, deserialize_with = "double_option")]
    pub community_id: Option<Option<CommunityId>>,
}

// ============================================================================
// Lookup Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCountryRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommunityRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[serde(default)]
    pub country_id: Option<CountryId>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEventTypeRequest {
    #[validate(length(min = 1, max = 50, message = "Name must be 1-50 characters"))]
    pub name: String,

    #[serde(default)]
    pub description: String,
}
