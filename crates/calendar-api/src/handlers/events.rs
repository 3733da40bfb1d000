//! Event handlers
//!
//! Create, read, edit, soft-delete and join/leave.

use axum::{extract::State, Json};
use calendar_service::{
    CreateEventRequest, EventDetailResponse, EventResponse, EventService, ParticipateRequest,
    ParticipationResponse, UpdateEventRequest,
};

use crate::extractors::{AuthUser, EventPath, JsonBody, OptionalAuthUser};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// POST /events
pub async fn create_event(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(request): JsonBody<CreateEventRequest>,
) -> ApiResult<Created<Json<EventResponse>>> {
    let service = EventService::new(state.service_context());
    let response = service.create_event(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// GET /events/{event_id}
pub async fn get_event(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    EventPath(event_id): EventPath,
) -> ApiResult<Json<EventDetailResponse>> {
    let service = EventService::new(state.service_context());
    Ok(Json(service.get_event_detail(event_id, auth.user_id()).await?))
}

/// PATCH /events/{event_id}
pub async fn update_event(
    State(state): State<AppState>,
    auth: AuthUser,
    EventPath(event_id): EventPath,
    JsonBody(request): JsonBody<UpdateEventRequest>,
) -> ApiResult<Json<EventResponse>> {
    let service = EventService::new(state.service_context());
    Ok(Json(service.update_event(event_id, auth.user_id, request).await?))
}

/// DELETE /events/{event_id}
pub async fn delete_event(
    State(state): State<AppState>,
    auth: AuthUser,
    EventPath(event_id): EventPath,
) -> ApiResult<NoContent> {
    let service = EventService::new(state.service_context());
    service.delete_event(event_id, auth.user_id).await?;
    Ok(NoContent)
}

/// Join or leave
///
/// POST /events/{event_id}/participate
///
/// Authentication is optional at the extractor level: the service answers
/// 404 for a missing event before it answers 401.
pub async fn participate(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    EventPath(event_id): EventPath,
    JsonBody(request): JsonBody<ParticipateRequest>,
) -> ApiResult<Json<ParticipationResponse>> {
    let service = EventService::new(state.service_context());
    Ok(Json(service.participate(event_id, auth.user_id(), request).await?))
}
