//! Lookup service
//!
//! Countries, communities and event types. Listing is public; creation is
//! reserved to administrators.

use calendar_core::{DomainError, UserId};
use tracing::{info, instrument};

use crate::dto::{
    CommunityResponse, CountryResponse, CreateCommunityRequest, CreateCountryRequest,
    CreateEventTypeRequest, EventTypeResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Lookup service
pub struct LookupService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LookupService<'a> {
    /// Create a new LookupService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list_countries(&self) -> ServiceResult<Vec<CountryResponse>> {
        let countries = self.ctx.country_repo().list().await?;
        Ok(countries.iter().map(CountryResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn list_communities(&self) -> ServiceResult<Vec<CommunityResponse>> {
        let communities = self.ctx.community_repo().list().await?;
        Ok(communities.iter().map(CommunityResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn list_event_types(&self) -> ServiceResult<Vec<EventTypeResponse>> {
        let event_types = self.ctx.event_type_repo().list().await?;
        Ok(event_types.iter().map(EventTypeResponse::from).collect())
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_country(
        &self,
        user_id: UserId,
        request: CreateCountryRequest,
    ) -> ServiceResult<CountryResponse> {
        self.require_admin(user_id).await?;

        let country = self.ctx.country_repo().create(request.name.trim()).await?;
        info!(country_id = %country.id, "Country created");

        Ok(CountryResponse::from(&country))
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_community(
        &self,
        user_id: UserId,
        request: CreateCommunityRequest,
    ) -> ServiceResult<CommunityResponse> {
        self.require_admin(user_id).await?;

        if let Some(country_id) = request.country_id {
            if self.ctx.country_repo().find_by_id(country_id).await?.is_none() {
                return Err(ServiceError::validation(format!("Unknown country: {country_id}")));
            }
        }

        let community = self
            .ctx
            .community_repo()
            .create(request.name.trim(), request.country_id)
            .await?;
        info!(community_id = %community.id, "Community created");

        Ok(CommunityResponse::from(&community))
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_event_type(
        &self,
        user_id: UserId,
        request: CreateEventTypeRequest,
    ) -> ServiceResult<EventTypeResponse> {
        self.require_admin(user_id).await?;

        let event_type = self
            .ctx
            .event_type_repo()
            .create(request.name.trim(), request.description.trim())
            .await?;
        info!(event_type_id = %event_type.id, "Event type created");

        Ok(EventTypeResponse::from(&event_type))
    }

    async fn require_admin(&self, user_id: UserId) -> ServiceResult<()> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        if user.is_admin {
            Ok(())
        } else {
            Err(DomainError::NotAdmin.into())
        }
    }
}
