//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use calendar_core::entities::{Community, Country, Event, EventImage, EventType, Profile, User};
use calendar_core::{AggregateRegion, Occurrence};

use super::responses::{
    CommunityResponse, CountryResponse, CurrentUserResponse, EventResponse, EventTypeResponse,
    ImageResponse, OccurrenceResponse, ProfileResponse, RecurrenceResponse, RegionOptionResponse,
    UserSummaryResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            display_name: user.display_name(),
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }
}

impl From<&User> for UserSummaryResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            display_name: user.display_name(),
        }
    }
}

impl From<&Profile> for ProfileResponse {
    fn from(profile: &Profile) -> Self {
        Self {
            user_id: profile.user_id,
            country_id: profile.country_id,
            community_id: profile.community_id,
        }
    }
}

// ============================================================================
// Event Mappers
// ============================================================================

impl From<&Event> for EventResponse {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id,
            owner_id: event.owner_id,
            title: event.title.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            start_time: event.start_time,
            end_time: event.end_time,
            country_id: event.country_id,
            event_type_id: event.event_type_id,
            community_ids: event.community_ids.clone(),
            organizer_ids: event.organizer_ids.clone(),
            recurrence: RecurrenceResponse {
                pattern: event.recurrence.pattern,
                interval: event.recurrence.interval,
                end_date: event.recurrence.until,
            },
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self::from(&event)
    }
}

impl From<Occurrence> for OccurrenceResponse {
    fn from(occ: Occurrence) -> Self {
        Self {
            id: occ.id,
            orig_id: occ.orig_id,
            title: occ.title,
            start: occ.start,
            end: occ.end,
            description: occ.description,
            event_type: occ.event_type,
            participants: occ.participants,
            joined: occ.joined,
            location: occ.location,
        }
    }
}

// ============================================================================
// Gallery Mappers
// ============================================================================

impl ImageResponse {
    /// Build a response with the public URL of the stored file
    pub fn with_url(image: &EventImage, url: String) -> Self {
        Self {
            id: image.id,
            event_id: image.event_id,
            url,
            file_name: image.file_name().to_string(),
            original_name: image.original_name.clone(),
            uploaded_by: image.uploaded_by,
            created_at: image.created_at,
        }
    }
}

// ============================================================================
// Lookup Mappers
// ============================================================================

impl From<&Country> for CountryResponse {
    fn from(country: &Country) -> Self {
        Self {
            id: country.id,
            name: country.name.clone(),
        }
    }
}

impl From<&Community> for CommunityResponse {
    fn from(community: &Community) -> Self {
        Self {
            id: community.id,
            name: community.name.clone(),
            country_id: community.country_id,
        }
    }
}

impl From<&EventType> for EventTypeResponse {
    fn from(event_type: &EventType) -> Self {
        Self {
            id: event_type.id,
            name: event_type.name.clone(),
            description: event_type.description.clone(),
        }
    }
}

impl From<&AggregateRegion> for RegionOptionResponse {
    fn from(region: &AggregateRegion) -> Self {
        Self {
            value: region.token.clone(),
            label: region.label.clone(),
            communities: region.community_names.clone(),
        }
    }
}
