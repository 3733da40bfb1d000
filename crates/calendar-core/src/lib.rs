//! # calendar-core
//!
//! Domain layer containing entities, typed ids, repository traits, and the
//! pure calendar rules (feed expansion, lifecycle checks, gallery naming).
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod feed;
pub mod gallery;
pub mod lifecycle;
pub mod region;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Community, Country, Event, EventImage, EventType, Profile, User};
pub use error::DomainError;
pub use feed::{FeedEvent, FeedWindow, Occurrence};
pub use lifecycle::EventDraft;
pub use region::AggregateRegion;
pub use traits::{
    CommunityRepository, CountryRepository, EventImageRepository, EventRepository,
    EventTypeRepository, FeedQuery, MediaStore, NewUser, ProfileRepository, RepoResult,
    UserRepository,
};
pub use value_objects::{
    CommunityId, CountryId, EventId, EventTypeId, IdParseError, ImageId, Recurrence,
    RecurrencePattern, UserId,
};
