//! Calendar feed handlers

use axum::{
    extract::{Query, State},
    Json,
};
use calendar_service::{CalendarFiltersResponse, FeedParams, FeedService, OccurrenceResponse};

use crate::extractors::OptionalAuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// Occurrence feed for the calendar view
///
/// GET /events/feed?country=&community=&start=&end=
///
/// Unparseable filter values are ignored rather than rejected.
pub async fn get_feed(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Query(params): Query<FeedParams>,
) -> ApiResult<Json<Vec<OccurrenceResponse>>> {
    let service = FeedService::new(state.service_context());
    Ok(Json(service.feed(params, auth.user_id()).await?))
}

/// Filter options for the calendar page
///
/// GET /calendar/filters
pub async fn get_filters(
    State(state): State<AppState>,
) -> ApiResult<Json<CalendarFiltersResponse>> {
    let service = FeedService::new(state.service_context());
    Ok(Json(service.filters().await?))
}
