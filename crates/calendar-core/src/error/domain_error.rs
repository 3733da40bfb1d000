//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{CommunityId, CountryId, EventId, EventTypeId, ImageId, UserId};

/// Domain layer errors
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Event not found: {0}")]
    EventNotFound(EventId),

    #[error("Image not found: {0}")]
    ImageNotFound(ImageId),

    #[error("Country not found: {0}")]
    CountryNotFound(CountryId),

    #[error("Community not found: {0}")]
    CommunityNotFound(CommunityId),

    #[error("Event type not found: {0}")]
    EventTypeNotFound(EventTypeId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Unsupported upload: {0}")]
    UnsupportedUpload(String),

    #[error("File too large: max {max_bytes} bytes")]
    FileTooLarge { max_bytes: usize },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Only the event owner can do this")]
    NotEventOwner,

    #[error("Only the event owner or an organizer can edit this event")]
    NotEventOrganizer,

    #[error("You are not allowed to delete this image")]
    CannotDeleteImage,

    #[error("Administrator access required")]
    NotAdmin,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Username already in use")]
    UsernameAlreadyExists,

    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Name already in use: {0}")]
    NameAlreadyExists(String),

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Attendance can only be marked after the event has ended")]
    AttendanceNotOpen,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::EventNotFound(_) => "UNKNOWN_EVENT",
            Self::ImageNotFound(_) => "UNKNOWN_IMAGE",
            Self::CountryNotFound(_) => "UNKNOWN_COUNTRY",
            Self::CommunityNotFound(_) => "UNKNOWN_COMMUNITY",
            Self::EventTypeNotFound(_) => "UNKNOWN_EVENT_TYPE",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::UnsupportedUpload(_) => "UNSUPPORTED_UPLOAD",
            Self::FileTooLarge { .. } => "FILE_TOO_LARGE",

            // Authorization
            Self::NotEventOwner => "NOT_EVENT_OWNER",
            Self::NotEventOrganizer => "NOT_EVENT_ORGANIZER",
            Self::CannotDeleteImage => "CANNOT_DELETE_IMAGE",
            Self::NotAdmin => "NOT_ADMIN",

            // Conflict
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::NameAlreadyExists(_) => "NAME_ALREADY_EXISTS",

            // Business Rules
            Self::AttendanceNotOpen => "ATTENDANCE_NOT_OPEN",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::StorageError(_) => "STORAGE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::EventNotFound(_)
                | Self::ImageNotFound(_)
                | Self::CountryNotFound(_)
                | Self::CommunityNotFound(_)
                | Self::EventTypeNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEmail
                | Self::WeakPassword(_)
                | Self::UnsupportedUpload(_)
                | Self::FileTooLarge { .. }
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotEventOwner | Self::NotEventOrganizer | Self::CannotDeleteImage | Self::NotAdmin
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::UsernameAlreadyExists
                | Self::EmailAlreadyExists
                | Self::NameAlreadyExists(_)
                | Self::AttendanceNotOpen
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DomainError::EventNotFound(EventId::new(1)).code(), "UNKNOWN_EVENT");
        assert_eq!(DomainError::NotEventOwner.code(), "NOT_EVENT_OWNER");
        assert_eq!(DomainError::AttendanceNotOpen.code(), "ATTENDANCE_NOT_OPEN");
    }

    #[test]
    fn test_error_categories() {
        assert!(DomainError::ImageNotFound(ImageId::new(1)).is_not_found());
        assert!(DomainError::WeakPassword("short".to_string()).is_validation());
        assert!(DomainError::NotEventOrganizer.is_authorization());
        assert!(DomainError::AttendanceNotOpen.is_conflict());
        assert!(!DomainError::AttendanceNotOpen.is_authorization());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::EventNotFound(EventId::new(12));
        assert_eq!(err.to_string(), "Event not found: 12");
    }
}
