//! Attendance handlers

use axum::{extract::State, Json};
use calendar_service::{AttendanceResponse, AttendanceService, MarkAttendanceRequest};

use crate::extractors::{AuthUser, EventPath, JsonBody};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /events/{event_id}/attendance
pub async fn get_attendance(
    State(state): State<AppState>,
    auth: AuthUser,
    EventPath(event_id): EventPath,
) -> ApiResult<Json<AttendanceResponse>> {
    let service = AttendanceService::new(state.service_context());
    Ok(Json(service.get_attendance(event_id, auth.user_id).await?))
}

/// Replace the attendee set
///
/// PUT /events/{event_id}/attendance
pub async fn mark_attendance(
    State(state): State<AppState>,
    auth: AuthUser,
    EventPath(event_id): EventPath,
    JsonBody(request): JsonBody<MarkAttendanceRequest>,
) -> ApiResult<Json<AttendanceResponse>> {
    let service = AttendanceService::new(state.service_context());
    Ok(Json(service.mark_attendance(event_id, auth.user_id, request).await?))
}
