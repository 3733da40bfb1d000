//! Path parameter extractors

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use calendar_core::EventId;

use crate::response::ApiError;

/// The `:event_id` segment of event-scoped routes
#[derive(Debug, Clone, Copy)]
pub struct EventPath(pub EventId);

#[async_trait]
impl<S> FromRequestParts<S> for EventPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        EventId::parse(&raw)
            .map(EventPath)
            .map_err(|_| ApiError::invalid_path("Invalid event_id format"))
    }
}
