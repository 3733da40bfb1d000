//! Event image model -> entity mapper

use calendar_core::entities::EventImage;
use calendar_core::value_objects::{EventId, ImageId, UserId};

use crate::models::EventImageModel;

impl From<EventImageModel> for EventImage {
    fn from(model: EventImageModel) -> Self {
        EventImage {
            id: ImageId::new(model.id),
            event_id: EventId::new(model.event_id),
            file_path: model.file_path,
            original_name: model.original_name,
            uploaded_by: model.uploaded_by.map(UserId::new),
            created_at: model.created_at,
        }
    }
}
