//! Gallery service
//!
//! Uploads, bulk deletion and ZIP download of event images. Batch operations
//! log and skip per-file failures so the rest of the batch goes through.

use calendar_core::gallery::{archive_entry_names, is_image_upload, storage_path, stored_file_name};
use calendar_core::lifecycle::can_delete_image;
use calendar_core::{DomainError, EventId, UserId};
use calendar_storage::ArchiveBuilder;
use chrono::Utc;
use tracing::{info, instrument, warn};

use crate::dto::{
    BulkDeleteResponse, ImageArchive, ImageResponse, ImageSelectionRequest, ImageUpload,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::event::EventService;

/// Gallery service
pub struct GalleryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> GalleryService<'a> {
    /// Create a new GalleryService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Gallery of an active event, newest first
    #[instrument(skip(self))]
    pub async fn list_images(&self, event_id: EventId) -> ServiceResult<Vec<ImageResponse>> {
        let event = EventService::new(self.ctx).get_event_entity(event_id).await?;
        let images = self.ctx.image_repo().find_by_event(event.id).await?;

        Ok(images
            .iter()
            .map(|image| {
                ImageResponse::with_url(image, self.ctx.media_store().url(&image.file_path))
            })
            .collect())
    }

    /// Store uploaded images. The whole request is rejected if any file is
    /// not an image or exceeds the size limit.
    #[instrument(skip(self, uploads), fields(files = uploads.len()))]
    pub async fn upload_images(
        &self,
        event_id: EventId,
        user_id: UserId,
        uploads: Vec<ImageUpload>,
    ) -> ServiceResult<Vec<ImageResponse>> {
        let event = EventService::new(self.ctx).get_event_entity(event_id).await?;

        let max_bytes = self.ctx.max_upload_bytes();
        for upload in &uploads {
            if !is_image_upload(upload.content_type.as_deref(), &upload.file_name) {
                return Err(DomainError::UnsupportedUpload(upload.file_name.clone()).into());
            }
            if upload.bytes.len() > max_bytes {
                return Err(DomainError::FileTooLarge { max_bytes }.into());
            }
        }

        let today = Utc::now().date_naive();
        let mut stored = Vec::with_capacity(uploads.len());

        for upload in uploads {
            let original_name = match upload.file_name.trim() {
                "" => "upload".to_string(),
                name => name.to_string(),
            };
            let path = storage_path(today, &stored_file_name(&original_name));

            self.ctx.media_store().save(&path, &upload.bytes).await?;

            let image = match self
                .ctx
                .image_repo()
                .create(event.id, &path, &original_name, Some(user_id))
                .await
            {
                Ok(image) => image,
                Err(e) => {
                    if let Err(cleanup) = self.ctx.media_store().delete(&path).await {
                        warn!(path = %path, error = %cleanup, "Failed to remove orphaned upload");
                    }
                    return Err(e.into());
                }
            };

            info!(event_id = %event.id, image_id = %image.id, path = %path, "Image uploaded");
            stored.push(ImageResponse::with_url(&image, self.ctx.media_store().url(&path)));
        }

        Ok(stored)
    }

    /// Delete selected images the user may remove. Ids of other events are
    /// ignored; forbidden or failing images are reported as skipped.
    #[instrument(skip(self, request), fields(selected = request.image_ids.len()))]
    pub async fn delete_images(
        &self,
        event_id: EventId,
        user_id: UserId,
        request: ImageSelectionRequest,
    ) -> ServiceResult<BulkDeleteResponse> {
        let event = EventService::new(self.ctx).get_event_entity(event_id).await?;
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        let images = self
            .ctx
            .image_repo()
            .find_in_event(event.id, &request.image_ids)
            .await?;

        let mut result = BulkDeleteResponse::default();

        for image in images {
            if !can_delete_image(&event, &image, &user) {
                warn!(
                    image_id = %image.id,
                    user_id = %user_id,
                    "Image delete not permitted, skipping"
                );
                result.skipped.push(image.id);
                continue;
            }

            if let Err(e) = self.ctx.media_store().delete(&image.file_path).await {
                warn!(image_id = %image.id, error = %e, "Failed to delete image file, skipping");
                result.skipped.push(image.id);
                continue;
            }

            if let Err(e) = self.ctx.image_repo().delete(image.id).await {
                warn!(image_id = %image.id, error = %e, "Failed to delete image record, skipping");
                result.skipped.push(image.id);
                continue;
            }

            result.deleted.push(image.id);
        }

        info!(
            event_id = %event.id,
            deleted = result.deleted.len(),
            skipped = result.skipped.len(),
            "Bulk image delete finished"
        );

        Ok(result)
    }

    /// Bundle selected images of the event into one ZIP archive.
    /// Unreadable files are left out.
    #[instrument(skip(self, request), fields(selected = request.image_ids.len()))]
    pub async fn download_images(
        &self,
        event_id: EventId,
        request: ImageSelectionRequest,
    ) -> ServiceResult<ImageArchive> {
        let event = EventService::new(self.ctx).get_event_entity(event_id).await?;

        if request.image_ids.is_empty() {
            return Err(ServiceError::validation("No images selected"));
        }

        let images = self
            .ctx
            .image_repo()
            .find_in_event(event.id, &request.image_ids)
            .await?;
        if images.is_empty() {
            return Err(ServiceError::validation("No images of this event selected"));
        }

        let names = archive_entry_names(&images);
        let mut archive = ArchiveBuilder::new();

        for (image, name) in images.iter().zip(names) {
            match self.ctx.media_store().read(&image.file_path).await {
                Ok(bytes) => archive.add_file(&name, &bytes).map_err(DomainError::from)?,
                Err(e) => {
                    warn!(image_id = %image.id, error = %e, "Failed to read image file, skipping");
                }
            }
        }

        let entries = archive.len();
        let bytes = archive.finish().map_err(DomainError::from)?;

        info!(event_id = %event.id, entries, size = bytes.len(), "Image archive built");

        Ok(ImageArchive {
            file_name: format!("event_{}_images.zip", event.id),
            bytes,
            entries,
        })
    }
}
