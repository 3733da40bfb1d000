//! Lookup tables: countries, communities and event types

use axum::{extract::State, Json};
use calendar_service::{
    CommunityResponse, CountryResponse, CreateCommunityRequest, CreateCountryRequest,
    CreateEventTypeRequest, EventTypeResponse, LookupService,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// GET /countries
pub async fn list_countries(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CountryResponse>>> {
    let service = LookupService::new(state.service_context());
    Ok(Json(service.list_countries().await?))
}

/// GET /communities
pub async fn list_communities(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CommunityResponse>>> {
    let service = LookupService::new(state.service_context());
    Ok(Json(service.list_communities().await?))
}

/// GET /event-types
pub async fn list_event_types(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<EventTypeResponse>>> {
    let service = LookupService::new(state.service_context());
    Ok(Json(service.list_event_types().await?))
}

/// POST /admin/countries
pub async fn create_country(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateCountryRequest>,
) -> ApiResult<Created<Json<CountryResponse>>> {
    let service = LookupService::new(state.service_context());
    Ok(Created(Json(service.create_country(auth.user_id, request).await?)))
}

/// POST /admin/communities
pub async fn create_community(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateCommunityRequest>,
) -> ApiResult<Created<Json<CommunityResponse>>> {
    let service = LookupService::new(state.service_context());
    Ok(Created(Json(service.create_community(auth.user_id, request).await?)))
}

/// POST /admin/event-types
pub async fn create_event_type(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateEventTypeRequest>,
) -> ApiResult<Created<Json<EventTypeResponse>>> {
    let service = LookupService::new(state.service_context());
    Ok(Created(Json(service.create_event_type(auth.user_id, request).await?)))
}
