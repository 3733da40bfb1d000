//! User handlers
//!
//! The current user's account, profile defaults and event lists.

use axum::{extract::State, Json};
use calendar_service::{
    AuthService, CurrentUserResponse, EventResponse, MyEventsResponse, ProfileResponse,
    UpdateProfileRequest, UserService,
};

use crate::extractors::{AuthUser, JsonBody};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = AuthService::new(state.service_context());
    Ok(Json(service.current_user(auth.user_id).await?))
}

/// GET /users/@me/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ProfileResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.get_profile(auth.user_id).await?))
}

/// PATCH /users/@me/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(request): JsonBody<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.update_profile(auth.user_id, request).await?))
}

/// Upcoming events the user hosts or participates in
///
/// GET /users/@me/events
pub async fn my_events(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<MyEventsResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.my_events(auth.user_id).await?))
}

/// GET /users/@me/events/participated
pub async fn participated_events(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<EventResponse>>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.participated_events(auth.user_id).await?))
}

/// GET /users/@me/events/organized
pub async fn organized_events(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<EventResponse>>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.organized_events(auth.user_id).await?))
}
