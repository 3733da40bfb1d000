//! Gallery handlers
//!
//! Listing, multipart upload, bulk delete and ZIP download of event images.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use calendar_common::AppError;
use calendar_service::{
    BulkDeleteResponse, GalleryService, ImageResponse, ImageSelectionRequest, ImageUpload,
};

use crate::extractors::{AuthUser, EventPath, JsonBody};
use crate::response::{ApiError, ApiResult, Created, ZipDownload};
use crate::state::AppState;

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::App(AppError::PayloadTooLarge(err.body_text()))
    } else {
        ApiError::InvalidUpload(err.body_text())
    }
}

/// Read every file part of a multipart body
async fn read_uploads(multipart: &mut Multipart) -> ApiResult<Vec<ImageUpload>> {
    let mut uploads = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;

        uploads.push(ImageUpload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    Ok(uploads)
}

/// GET /events/{event_id}/images
pub async fn list_images(
    State(state): State<AppState>,
    EventPath(event_id): EventPath,
) -> ApiResult<Json<Vec<ImageResponse>>> {
    let service = GalleryService::new(state.service_context());
    Ok(Json(service.list_images(event_id).await?))
}

/// Upload one or more images as multipart file parts
///
/// POST /events/{event_id}/images
pub async fn upload_images(
    State(state): State<AppState>,
    auth: AuthUser,
    EventPath(event_id): EventPath,
    mut multipart: Multipart,
) -> ApiResult<Created<Json<Vec<ImageResponse>>>> {
    let uploads = read_uploads(&mut multipart).await?;
    if uploads.is_empty() {
        return Err(ApiError::InvalidUpload("No files in request".to_string()));
    }

    let service = GalleryService::new(state.service_context());
    let stored = service.upload_images(event_id, auth.user_id, uploads).await?;
    Ok(Created(Json(stored)))
}

/// POST /events/{event_id}/images/delete
pub async fn delete_images(
    State(state): State<AppState>,
    auth: AuthUser,
    EventPath(event_id): EventPath,
    JsonBody(request): JsonBody<ImageSelectionRequest>,
) -> ApiResult<Json<BulkDeleteResponse>> {
    let service = GalleryService::new(state.service_context());
    Ok(Json(service.delete_images(event_id, auth.user_id, request).await?))
}

/// POST /events/{event_id}/images/download
pub async fn download_images(
    State(state): State<AppState>,
    EventPath(event_id): EventPath,
    JsonBody(request): JsonBody<ImageSelectionRequest>,
) -> ApiResult<ZipDownload> {
    let service = GalleryService::new(state.service_context());
    Ok(ZipDownload(service.download_images(event_id, request).await?))
}
