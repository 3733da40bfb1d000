//! Calendar feed service
//!
//! Turns raw query values into a repository filter, then expands the selected
//! events into per-day occurrences.

use calendar_core::feed::build_feed;
use calendar_core::region::{parse_country_filter, CommunityFilter};
use calendar_core::{FeedQuery, FeedWindow, UserId};
use tracing::{debug, instrument};

use crate::dto::{
    CalendarFiltersResponse, CommunityResponse, CountryResponse, FeedParams, OccurrenceResponse,
    RegionOptionResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Calendar feed service
pub struct FeedService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FeedService<'a> {
    /// Create a new FeedService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Occurrences visible for the given filters, ordered by event start then date
    #[instrument(skip(self))]
    pub async fn feed(
        &self,
        params: FeedParams,
        viewer: Option<UserId>,
    ) -> ServiceResult<Vec<OccurrenceResponse>> {
        let query = self.build_query(&params, viewer).await?;
        let window = FeedWindow::from_query(params.start.as_deref(), params.end.as_deref());

        let events = self.ctx.event_repo().feed(&query).await?;
        debug!(events = events.len(), "Feed events selected");

        Ok(build_feed(events, &window, self.ctx.max_recurrence_instances())
            .into_iter()
            .map(OccurrenceResponse::from)
            .collect())
    }

    /// Countries, communities and the region option for the filter bar
    #[instrument(skip(self))]
    pub async fn filters(&self) -> ServiceResult<CalendarFiltersResponse> {
        let countries = self.ctx.country_repo().list().await?;
        let communities = self.ctx.community_repo().list().await?;

        Ok(CalendarFiltersResponse {
            countries: countries.iter().map(CountryResponse::from).collect(),
            communities: communities.iter().map(CommunityResponse::from).collect(),
            region: RegionOptionResponse::from(self.ctx.region()),
        })
    }

    async fn build_query(
        &self,
        params: &FeedParams,
        viewer: Option<UserId>,
    ) -> ServiceResult<FeedQuery> {
        let region = self.ctx.region();

        let community_ids = match CommunityFilter::parse(params.community.as_deref(), region) {
            None => None,
            Some(CommunityFilter::Community(id)) => Some(vec![id]),
            Some(CommunityFilter::Region) => Some(
                self.ctx
                    .community_repo()
                    .find_by_names(&region.community_names)
                    .await?
                    .into_iter()
                    .map(|c| c.id)
                    .collect(),
            ),
        };

        Ok(FeedQuery {
            country_id: parse_country_filter(params.country.as_deref()),
            community_ids,
            viewer,
        })
    }
}
