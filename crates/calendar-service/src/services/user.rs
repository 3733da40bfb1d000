//! User service
//!
//! Profile defaults and the per-user event lists.

use calendar_core::{CommunityId, CountryId, UserId};
use chrono::Utc;
use tracing::{info, instrument};

use crate::dto::{EventResponse, MyEventsResponse, ProfileResponse, UpdateProfileRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get the profile, creating an empty one on first access
    #[instrument(skip(self))]
    pub async fn get_profile(&self, user_id: UserId) -> ServiceResult<ProfileResponse> {
        let profile = self.ctx.profile_repo().get_or_create(user_id).await?;
        Ok(ProfileResponse::from(&profile))
    }

    /// Update profile defaults
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        user_id: UserId,
        request: UpdateProfileRequest,
    ) -> ServiceResult<ProfileResponse> {
        let mut profile = self.ctx.profile_repo().get_or_create(user_id).await?;

        if let Some(country_id) = request.country_id {
            if let Some(id) = country_id {
                self.require_country(id).await?;
            }
            profile.country_id = country_id;
        }
        if let Some(community_id) = request.community_id {
            if let Some(id) = community_id {
                self.require_community(id).await?;
            }
            profile.community_id = community_id;
        }

        let profile = self.ctx.profile_repo().update(&profile).await?;

        info!(user_id = %user_id, "Profile updated");

        Ok(ProfileResponse::from(&profile))
    }

    /// Upcoming events the user hosts or has joined
    #[instrument(skip(self))]
    pub async fn my_events(&self, user_id: UserId) -> ServiceResult<MyEventsResponse> {
        let now = Utc::now();
        let hosting = self.ctx.event_repo().hosted_upcoming(user_id, now).await?;
        let participating = self
            .ctx
            .event_repo()
            .participating_upcoming(user_id, now)
            .await?;

        Ok(MyEventsResponse {
            hosting: hosting.into_iter().map(EventResponse::from).collect(),
            participating: participating.into_iter().map(EventResponse::from).collect(),
        })
    }

    /// Past events the user joined, most recent first
    #[instrument(skip(self))]
    pub async fn participated_events(&self, user_id: UserId) -> ServiceResult<Vec<EventResponse>> {
        let events = self
            .ctx
            .event_repo()
            .participated_past(user_id, Utc::now())
            .await?;
        Ok(events.into_iter().map(EventResponse::from).collect())
    }

    /// Past events the user owned or organized, most recent first
    #[instrument(skip(self))]
    pub async fn organized_events(&self, user_id: UserId) -> ServiceResult<Vec<EventResponse>> {
        let events = self
            .ctx
            .event_repo()
            .organized_past(user_id, Utc::now())
            .await?;
        Ok(events.into_iter().map(EventResponse::from).collect())
    }

    async fn require_country(&self, id: CountryId) -> ServiceResult<()> {
        match self.ctx.country_repo().find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::validation(format!("Unknown country: {id}"))),
        }
    }

    async fn require_community(&self, id: CommunityId) -> ServiceResult<()> {
        if self.ctx.community_repo().find_by_ids(&[id]).await?.is_empty() {
            Err(ServiceError::validation(format!("Unknown community: {id}")))
        } else {
            Ok(())
        }
    }
}
