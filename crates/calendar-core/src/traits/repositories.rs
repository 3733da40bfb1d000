//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Every query on events excludes soft-deleted
//! rows unless stated otherwise.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Community, Country, Event, EventImage, EventType, Profile, User};
use crate::error::DomainError;
use crate::feed::FeedEvent;
use crate::lifecycle::EventDraft;
use crate::value_objects::{CommunityId, CountryId, EventId, EventTypeId, ImageId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Data for a new account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Filter for the calendar feed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedQuery {
    pub country_id: Option<CountryId>,
    /// Events targeting any of these communities; `None` means no filter
    pub community_ids: Option<Vec<CommunityId>>,
    /// Used to compute the `joined` flag
    pub viewer: Option<UserId>,
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find users by IDs, ordered by username
    async fn find_by_ids(&self, ids: &[UserId]) -> RepoResult<Vec<User>>;

    /// All accounts whose email matches case-insensitively
    async fn find_by_email(&self, email: &str) -> RepoResult<Vec<User>>;

    /// Check if username is already taken (case-insensitive)
    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    /// Check if email is already taken (case-insensitive)
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;
}

// ============================================================================
// Event Repository
// ============================================================================

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Find an active event with its communities and organizers
    async fn find_by_id(&self, id: EventId) -> RepoResult<Option<Event>>;

    /// Active events matching the feed filter, with counts for the viewer
    async fn feed(&self, query: &FeedQuery) -> RepoResult<Vec<FeedEvent>>;

    /// Create an event owned by `owner_id`
    async fn create(&self, owner_id: UserId, draft: &EventDraft) -> RepoResult<Event>;

    /// Replace the editable fields, communities and organizers
    async fn update(&self, id: EventId, draft: &EventDraft) -> RepoResult<Event>;

    /// Soft delete. Not found if the event is missing or already deleted.
    async fn soft_delete(&self, id: EventId, deleted_by: UserId, at: DateTime<Utc>)
        -> RepoResult<()>;

    /// Add a participant; no-op when already joined
    async fn add_participant(&self, id: EventId, user_id: UserId) -> RepoResult<()>;

    /// Remove a participant; no-op when not joined
    async fn remove_participant(&self, id: EventId, user_id: UserId) -> RepoResult<()>;

    async fn is_participant(&self, id: EventId, user_id: UserId) -> RepoResult<bool>;

    async fn participant_count(&self, id: EventId) -> RepoResult<i64>;

    /// Participant ids in join order
    async fn participant_ids(&self, id: EventId) -> RepoResult<Vec<UserId>>;

    async fn attendee_ids(&self, id: EventId) -> RepoResult<Vec<UserId>>;

    /// Replace the attendee set atomically with those of `user_ids` who are
    /// participants at that moment. Returns the stored ids, ascending.
    async fn set_attendees(&self, id: EventId, user_ids: &[UserId]) -> RepoResult<Vec<UserId>>;

    /// Owned events that have not ended, by start time
    async fn hosted_upcoming(&self, user_id: UserId, now: DateTime<Utc>) -> RepoResult<Vec<Event>>;

    /// Joined events that have not ended, by start time
    async fn participating_upcoming(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> RepoResult<Vec<Event>>;

    /// Joined events that have ended, most recent start first
    async fn participated_past(&self, user_id: UserId, now: DateTime<Utc>)
        -> RepoResult<Vec<Event>>;

    /// Ended events the user owns or organizes, most recent start first
    async fn organized_past(&self, user_id: UserId, now: DateTime<Utc>) -> RepoResult<Vec<Event>>;
}

// ============================================================================
// Event Image Repository
// ============================================================================

#[async_trait]
pub trait EventImageRepository: Send + Sync {
    /// Gallery of an event, newest first
    async fn find_by_event(&self, event_id: EventId) -> RepoResult<Vec<EventImage>>;

    /// Images with the given ids that belong to `event_id`; others are ignored
    async fn find_in_event(&self, event_id: EventId, ids: &[ImageId])
        -> RepoResult<Vec<EventImage>>;

    async fn create(
        &self,
        event_id: EventId,
        file_path: &str,
        original_name: &str,
        uploaded_by: Option<UserId>,
    ) -> RepoResult<EventImage>;

    async fn delete(&self, id: ImageId) -> RepoResult<()>;
}

// ============================================================================
// Lookup Repositories
// ============================================================================

#[async_trait]
pub trait CountryRepository: Send + Sync {
    /// All countries ordered by name
    async fn list(&self) -> RepoResult<Vec<Country>>;

    async fn find_by_id(&self, id: CountryId) -> RepoResult<Option<Country>>;

    /// Create a country; name conflicts are reported as `NameAlreadyExists`
    async fn create(&self, name: &str) -> RepoResult<Country>;
}

#[async_trait]
pub trait CommunityRepository: Send + Sync {
    /// All communities ordered by name
    async fn list(&self) -> RepoResult<Vec<Community>>;

    async fn find_by_ids(&self, ids: &[CommunityId]) -> RepoResult<Vec<Community>>;

    /// Communities whose names are in `names` (exact match)
    async fn find_by_names(&self, names: &[String]) -> RepoResult<Vec<Community>>;

    async fn create(&self, name: &str, country_id: Option<CountryId>) -> RepoResult<Community>;
}

#[async_trait]
pub trait EventTypeRepository: Send + Sync {
    /// All event types ordered by name
    async fn list(&self) -> RepoResult<Vec<EventType>>;

    async fn find_by_id(&self, id: EventTypeId) -> RepoResult<Option<EventType>>;

    async fn create(&self, name: &str, description: &str) -> RepoResult<EventType>;
}

// ============================================================================
// Profile Repository
// ============================================================================

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch the profile, creating an empty one on first access
    async fn get_or_create(&self, user_id: UserId) -> RepoResult<Profile>;

    async fn update(&self, profile: &Profile) -> RepoResult<Profile>;
}
