//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CommunityTarget, CreateCommunityRequest, CreateCountryRequest, CreateEventRequest,
    CreateEventTypeRequest, FeedParams, ImageSelectionRequest, ImageUpload, LoginRequest,
    MarkAttendanceRequest, ParticipateRequest, ParticipationAction, RecurrenceInput,
    RefreshTokenRequest, RegisterRequest, UpdateEventRequest, UpdateProfileRequest,
};

pub use responses::{
    AttendanceResponse, AuthResponse, BulkDeleteResponse, CalendarFiltersResponse,
    CommunityResponse, CountryResponse, CurrentUserResponse, EventDetailResponse, EventResponse,
    EventTypeResponse, HealthResponse, ImageArchive, ImageResponse, MyEventsResponse,
    OccurrenceResponse, ParticipationResponse, ProfileResponse, ReadinessResponse,
    RecurrenceResponse, RegionOptionResponse, UserSummaryResponse,
};
