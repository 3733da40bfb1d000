//! Attendance service
//!
//! The owner marks which participants attended, once the event has ended.

use calendar_core::lifecycle::ensure_attendance_open;
use calendar_core::{EventId, UserId};
use chrono::Utc;
use tracing::{info, instrument};

use crate::dto::{AttendanceResponse, MarkAttendanceRequest, UserSummaryResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::event::EventService;

/// Attendance service
pub struct AttendanceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AttendanceService<'a> {
    /// Create a new AttendanceService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Participants and current attendees
    #[instrument(skip(self))]
    pub async fn get_attendance(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> ServiceResult<AttendanceResponse> {
        let event = EventService::new(self.ctx).get_event_entity(event_id).await?;
        ensure_attendance_open(&event, user_id, Utc::now())?;

        let attendee_ids = self.ctx.event_repo().attendee_ids(event.id).await?;
        self.response(event_id, attendee_ids).await
    }

    /// Replace the attendee set with the submitted participants.
    /// Submitted ids that are not participants are dropped.
    #[instrument(skip(self, request))]
    pub async fn mark_attendance(
        &self,
        event_id: EventId,
        user_id: UserId,
        request: MarkAttendanceRequest,
    ) -> ServiceResult<AttendanceResponse> {
        let event = EventService::new(self.ctx).get_event_entity(event_id).await?;
        ensure_attendance_open(&event, user_id, Utc::now())?;

        let attendees = self
            .ctx
            .event_repo()
            .set_attendees(event.id, &request.user_ids)
            .await?;

        info!(
            event_id = %event.id,
            submitted = request.user_ids.len(),
            stored = attendees.len(),
            "Attendance updated"
        );

        self.response(event_id, attendees).await
    }

    async fn response(
        &self,
        event_id: EventId,
        attendee_ids: Vec<UserId>,
    ) -> ServiceResult<AttendanceResponse> {
        let participant_ids = self.ctx.event_repo().participant_ids(event_id).await?;
        let participants = self.ctx.user_repo().find_by_ids(&participant_ids).await?;

        Ok(AttendanceResponse {
            event_id,
            participants: participants.iter().map(UserSummaryResponse::from).collect(),
            attendee_ids,
        })
    }
}
