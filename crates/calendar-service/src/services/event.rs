//! Event service
//!
//! Creation, editing, soft deletion, detail and join/leave. Every lookup goes
//! through [`EventService::get_event_entity`], so a soft-deleted event is
//! "not found" for every operation and every user.

use std::borrow::Cow;
use std::collections::HashSet;

use calendar_common::AppError;
use calendar_core::entities::Event;
use calendar_core::lifecycle::{ensure_can_edit, ensure_owner, validate_draft};
use calendar_core::region::resolve_targets;
use calendar_core::{CommunityId, EventDraft, EventId, Recurrence, UserId};
use chrono::Utc;
use tracing::{info, instrument};
use validator::{ValidationError, ValidationErrors};

use crate::dto::{
    CommunityTarget, CreateEventRequest, EventDetailResponse, EventResponse, ImageResponse,
    ParticipateRequest, ParticipationAction, ParticipationResponse, UpdateEventRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

fn field_error(code: &'static str, message: String) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Owned(message));
    err
}

/// Field errors found outside the draft rules (unknown references and the like)
type FieldIssues = Vec<(&'static str, ValidationError)>;

/// Drop repeated ids, keeping the first occurrence
fn dedup_ids<T: Copy + Eq + std::hash::Hash>(ids: &[T]) -> Vec<T> {
    let mut seen = HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Event service
pub struct EventService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EventService<'a> {
    /// Create a new EventService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get an active event by ID
    #[instrument(skip(self))]
    pub async fn get_event_entity(&self, event_id: EventId) -> ServiceResult<Event> {
        self.ctx
            .event_repo()
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Event", event_id.to_string()))
    }

    /// Create an event owned by `owner_id`
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create_event(
        &self,
        owner_id: UserId,
        request: CreateEventRequest,
    ) -> ServiceResult<EventResponse> {
        let mut issues = FieldIssues::new();

        let community_ids = self
            .resolve_communities(&request.targeted_communities, &mut issues)
            .await?;

        let draft = EventDraft {
            title: request.title,
            description: request.description,
            location: request.location,
            start_time: request.start_time,
            end_time: request.end_time,
            country_id: request.country_id,
            event_type_id: request.event_type_id,
            community_ids,
            organizer_ids: dedup_ids(&request.organizer_ids),
            recurrence: request.recurrence.map_or_else(Recurrence::none, Recurrence::from),
        };

        self.check_draft(&draft, issues).await?;

        let event = self.ctx.event_repo().create(owner_id, &draft).await?;

        info!(event_id = %event.id, owner_id = %owner_id, "Event created");

        Ok(EventResponse::from(&event))
    }

    /// Event detail for an optional viewer
    #[instrument(skip(self))]
    pub async fn get_event_detail(
        &self,
        event_id: EventId,
        viewer: Option<UserId>,
    ) -> ServiceResult<EventDetailResponse> {
        let event = self.get_event_entity(event_id).await?;

        let participants = self.ctx.event_repo().participant_count(event.id).await?;
        let joined = match viewer {
            Some(user_id) => self.ctx.event_repo().is_participant(event.id, user_id).await?,
            None => false,
        };

        let images = self
            .ctx
            .image_repo()
            .find_by_event(event.id)
            .await?
            .iter()
            .map(|image| {
                ImageResponse::with_url(image, self.ctx.media_store().url(&image.file_path))
            })
            .collect();

        Ok(EventDetailResponse {
            participants,
            joined,
            is_owner: viewer.is_some_and(|id| event.is_owner(id)),
            can_edit: viewer.is_some_and(|id| event.is_organizer(id)),
            has_ended: event.has_ended(Utc::now()),
            images,
            event: EventResponse::from(&event),
        })
    }

    /// Edit an event. Owner or organizers; only the owner may change organizers.
    #[instrument(skip(self, request))]
    pub async fn update_event(
        &self,
        event_id: EventId,
        user_id: UserId,
        request: UpdateEventRequest,
    ) -> ServiceResult<EventResponse> {
        let event = self.get_event_entity(event_id).await?;
        ensure_can_edit(&event, user_id)?;

        let mut draft = EventDraft::from_event(&event);
        let mut issues = FieldIssues::new();

        if let Some(organizer_ids) = &request.organizer_ids {
            let requested = dedup_ids(organizer_ids);
            let current: HashSet<UserId> = event.organizer_ids.iter().copied().collect();
            if requested.iter().copied().collect::<HashSet<_>>() != current {
                ensure_owner(&event, user_id)?;
            }
            draft.organizer_ids = requested;
        }

        if let Some(targets) = &request.targeted_communities {
            draft.community_ids = self.resolve_communities(targets, &mut issues).await?;
        }

        if let Some(title) = request.title {
            draft.title = title;
        }
        if let Some(description) = request.description {
            draft.description = description;
        }
        if let Some(location) = request.location {
            draft.location = location;
        }
        if let Some(start_time) = request.start_time {
            draft.start_time = start_time;
        }
        if let Some(end_time) = request.end_time {
            draft.end_time = end_time;
        }
        if let Some(country_id) = request.country_id {
            draft.country_id = country_id;
        }
        if let Some(event_type_id) = request.event_type_id {
            draft.event_type_id = event_type_id;
        }
        if let Some(recurrence) = request.recurrence {
            draft.recurrence = recurrence.into();
        }

        self.check_draft(&draft, issues).await?;

        let updated = self.ctx.event_repo().update(event.id, &draft).await?;

        info!(event_id = %event.id, user_id = %user_id, "Event updated");

        Ok(EventResponse::from(&updated))
    }

    /// Soft-delete an event. Owner only.
    #[instrument(skip(self))]
    pub async fn delete_event(&self, event_id: EventId, user_id: UserId) -> ServiceResult<()> {
        let event = self.get_event_entity(event_id).await?;
        ensure_owner(&event, user_id)?;

        self.ctx
            .event_repo()
            .soft_delete(event.id, user_id, Utc::now())
            .await?;

        info!(event_id = %event.id, user_id = %user_id, "Event soft-deleted");
        Ok(())
    }

    /// Join or leave. The event is resolved before authentication is required.
    #[instrument(skip(self, request), fields(action = %request.action))]
    pub async fn participate(
        &self,
        event_id: EventId,
        viewer: Option<UserId>,
        request: ParticipateRequest,
    ) -> ServiceResult<ParticipationResponse> {
        let event = self.get_event_entity(event_id).await?;
        let user_id = viewer.ok_or(ServiceError::App(AppError::MissingAuth))?;

        match ParticipationAction::parse(&request.action) {
            Some(ParticipationAction::Join) => {
                self.ctx.event_repo().add_participant(event.id, user_id).await?;
                info!(event_id = %event.id, user_id = %user_id, "Joined event");
            }
            Some(ParticipationAction::Leave) => {
                self.ctx
                    .event_repo()
                    .remove_participant(event.id, user_id)
                    .await?;
                info!(event_id = %event.id, user_id = %user_id, "Left event");
            }
            None => {
                return Err(ServiceError::validation(
                    "Invalid action: expected 'join' or 'leave'",
                ))
            }
        }

        Ok(ParticipationResponse {
            joined: self.ctx.event_repo().is_participant(event.id, user_id).await?,
            participants: self.ctx.event_repo().participant_count(event.id).await?,
        })
    }

    /// Resolve targeted-community values, expanding the region token.
    /// Unparseable values are recorded as a field error.
    async fn resolve_communities(
        &self,
        targets: &[CommunityTarget],
        issues: &mut FieldIssues,
    ) -> ServiceResult<Vec<CommunityId>> {
        let raw: Vec<String> = targets.iter().map(CommunityTarget::raw).collect();
        let region = self.ctx.region();

        let region_ids = if raw.iter().any(|value| region.matches(value)) {
            self.ctx
                .community_repo()
                .find_by_names(&region.community_names)
                .await?
                .into_iter()
                .map(|c| c.id)
                .collect()
        } else {
            Vec::new()
        };

        match resolve_targets(&raw, region, &region_ids) {
            Ok(ids) => Ok(ids),
            Err(e) => {
                issues.push((
                    "targeted_communities",
                    field_error("invalid", format!("Unknown community: {}", e.0)),
                ));
                Ok(Vec::new())
            }
        }
    }

    /// Run the draft rules and check that every referenced row exists
    async fn check_draft(&self, draft: &EventDraft, mut issues: FieldIssues) -> ServiceResult<()> {
        if let Some(country_id) = draft.country_id {
            if self.ctx.country_repo().find_by_id(country_id).await?.is_none() {
                issues.push((
                    "country_id",
                    field_error("unknown", format!("Unknown country: {country_id}")),
                ));
            }
        }

        if let Some(event_type_id) = draft.event_type_id {
            if self.ctx.event_type_repo().find_by_id(event_type_id).await?.is_none() {
                issues.push((
                    "event_type_id",
                    field_error("unknown", format!("Unknown event type: {event_type_id}")),
                ));
            }
        }

        if !draft.community_ids.is_empty() {
            let found: HashSet<CommunityId> = self
                .ctx
                .community_repo()
                .find_by_ids(&draft.community_ids)
                .await?
                .into_iter()
                .map(|c| c.id)
                .collect();
            if let Some(missing) = draft.community_ids.iter().find(|id| !found.contains(id)) {
                issues.push((
                    "targeted_communities",
                    field_error("unknown", format!("Unknown community: {missing}")),
                ));
            }
        }

        if !draft.organizer_ids.is_empty() {
            let found: HashSet<UserId> = self
                .ctx
                .user_repo()
                .find_by_ids(&draft.organizer_ids)
                .await?
                .into_iter()
                .map(|u| u.id)
                .collect();
            if let Some(missing) = draft.organizer_ids.iter().find(|id| !found.contains(id)) {
                issues.push((
                    "organizer_ids",
                    field_error("unknown", format!("Unknown user: {missing}")),
                ));
            }
        }

        let mut errors = validate_draft(draft).err().unwrap_or_else(ValidationErrors::new);
        for (field, error) in issues {
            errors.add(field, error);
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(ServiceError::Fields(errors))
        }
    }
}
