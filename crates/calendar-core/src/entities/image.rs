//! EventImage entity - a photo in an event gallery

use chrono::{DateTime, Utc};

use crate::value_objects::{EventId, ImageId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventImage {
    pub id: ImageId,
    pub event_id: EventId,
    /// Path relative to the media root, e.g. `event_images/2024/06/01/ab12.jpg`
    pub file_path: String,
    pub original_name: String,
    pub uploaded_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

impl EventImage {
    /// Last path segment of the stored file
    pub fn file_name(&self) -> &str {
        self.file_path
            .rsplit('/')
            .next()
            .unwrap_or(self.file_path.as_str())
    }

    #[inline]
    pub fn is_uploaded_by(&self, user_id: UserId) -> bool {
        self.uploaded_by == Some(user_id)
    }
}
