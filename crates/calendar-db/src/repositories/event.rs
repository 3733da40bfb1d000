//! PostgreSQL implementation of EventRepository
//!
//! Communities, organizers, participants and attendees live in join tables.
//! Every read filters `is_deleted = FALSE`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{info, instrument};

use calendar_core::entities::Event;
use calendar_core::error::DomainError;
use calendar_core::feed::FeedEvent;
use calendar_core::lifecycle::EventDraft;
use calendar_core::traits::{EventRepository, FeedQuery, RepoResult};
use calendar_core::value_objects::{EventId, UserId};

use crate::mappers::{user_ids, EventInsert};
use crate::models::{EventModel, FeedEventModel};

use super::error::{map_constraint_violation, map_db_error};

const EVENT_COLUMNS: &str = r"
    e.id, e.owner_id, e.title, e.description, e.location, e.start_time, e.end_time,
    e.country_id, e.event_type_id, e.recurrence_pattern, e.recurrence_interval,
    e.recurrence_end_date, e.is_deleted, e.deleted_at, e.deleted_by, e.created_at, e.updated_at,
    ARRAY(SELECT ec.community_id FROM event_communities ec
          WHERE ec.event_id = e.id ORDER BY ec.community_id) AS community_ids,
    ARRAY(SELECT eo.user_id FROM event_organizers eo
          WHERE eo.event_id = e.id ORDER BY eo.user_id) AS organizer_ids
";

/// PostgreSQL implementation of EventRepository
#[derive(Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_list(
        &self,
        filter: &str,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> RepoResult<Vec<Event>> {
        let sql =
            format!("SELECT {EVENT_COLUMNS} FROM events e WHERE e.is_deleted = FALSE AND {filter}");
        let rows = sqlx::query_as::<_, EventModel>(&sql)
            .bind(user_id.into_inner())
            .bind(now)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Event::from).collect())
    }

    async fn fetch_required(&self, id: EventId) -> RepoResult<Event> {
        self.find_by_id(id)
            .await?
            .ok_or(DomainError::EventNotFound(id))
    }
}

/// Replace the community and organizer rows of an event
async fn replace_links(
    tx: &mut Transaction<'_, Postgres>,
    event_id: i64,
    insert: &EventInsert<'_>,
) -> RepoResult<()> {
    sqlx::query("DELETE FROM event_communities WHERE event_id = $1")
        .bind(event_id)
        .execute(&mut **tx)
        .await
        .map_err(map_db_error)?;

    sqlx::query(
        r"
        INSERT INTO event_communities (event_id, community_id)
        SELECT $1, UNNEST($2::BIGINT[])
        ON CONFLICT DO NOTHING
        ",
    )
    .bind(event_id)
    .bind(&insert.community_ids)
    .execute(&mut **tx)
    .await
    .map_err(map_constraint_violation)?;

    sqlx::query("DELETE FROM event_organizers WHERE event_id = $1")
        .bind(event_id)
        .execute(&mut **tx)
        .await
        .map_err(map_db_error)?;

    sqlx::query(
        r"
        INSERT INTO event_organizers (event_id, user_id)
        SELECT $1, UNNEST($2::BIGINT[])
        ON CONFLICT DO NOTHING
        ",
    )
    .bind(event_id)
    .bind(&insert.organizer_ids)
    .execute(&mut **tx)
    .await
    .map_err(map_constraint_violation)?;

    Ok(())
}

#[async_trait]
impl EventRepository for PgEventRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: EventId) -> RepoResult<Option<Event>> {
        let sql = format!(
            "SELECT {EVENT_COLUMNS} FROM events e WHERE e.id = $1 AND e.is_deleted = FALSE"
        );
        let result = sqlx::query_as::<_, EventModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Event::from))
    }

    #[instrument(skip(self))]
    async fn feed(&self, query: &FeedQuery) -> RepoResult<Vec<FeedEvent>> {
        let community_ids: Option<Vec<i64>> = query
            .community_ids
            .as_ref()
            .map(|ids| ids.iter().map(|id| id.into_inner()).collect());

        let rows = sqlx::query_as::<_, FeedEventModel>(
            r"
            SELECT e.id, e.title, e.description, e.location, e.start_time, e.end_time,
                   e.recurrence_pattern, e.recurrence_interval, e.recurrence_end_date,
                   t.name AS event_type,
                   (SELECT COUNT(*) FROM event_participants p
                    WHERE p.event_id = e.id) AS participant_count,
                   EXISTS(SELECT 1 FROM event_participants p
                          WHERE p.event_id = e.id AND p.user_id = $3) AS joined
            FROM events e
            LEFT JOIN event_types t ON t.id = e.event_type_id
            WHERE e.is_deleted = FALSE
              AND ($1::BIGINT IS NULL OR e.country_id = $1)
              AND ($2::BIGINT[] IS NULL OR EXISTS(
                    SELECT 1 FROM event_communities ec
                    WHERE ec.event_id = e.id AND ec.community_id = ANY($2)))
            ORDER BY e.start_time, e.id
            ",
        )
        .bind(query.country_id.map(|id| id.into_inner()))
        .bind(community_ids)
        .bind(query.viewer.map(|id| id.into_inner()))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(FeedEvent::from).collect())
    }

    #[instrument(skip(self, draft), fields(title = %draft.title))]
    async fn create(&self, owner_id: UserId, draft: &EventDraft) -> RepoResult<Event> {
        let insert = EventInsert::new(draft);
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let id = sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO events (owner_id, title, description, location, start_time, end_time,
                                country_id, event_type_id, recurrence_pattern,
                                recurrence_interval, recurrence_end_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id
            ",
        )
        .bind(owner_id.into_inner())
        .bind(insert.title)
        .bind(insert.description)
        .bind(insert.location)
        .bind(insert.start_time)
        .bind(insert.end_time)
        .bind(insert.country_id)
        .bind(insert.event_type_id)
        .bind(insert.recurrence_pattern)
        .bind(insert.recurrence_interval)
        .bind(insert.recurrence_end_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_constraint_violation)?;

        replace_links(&mut tx, id, &insert).await?;
        tx.commit().await.map_err(map_db_error)?;

        info!(event_id = id, "Event row created");
        self.fetch_required(EventId::new(id)).await
    }

    #[instrument(skip(self, draft))]
    async fn update(&self, id: EventId, draft: &EventDraft) -> RepoResult<Event> {
        let insert = EventInsert::new(draft);
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query(
            r"
            UPDATE events
            SET title = $2, description = $3, location = $4, start_time = $5, end_time = $6,
                country_id = $7, event_type_id = $8, recurrence_pattern = $9,
                recurrence_interval = $10, recurrence_end_date = $11, updated_at = NOW()
            WHERE id = $1 AND is_deleted = FALSE
            ",
        )
        .bind(id.into_inner())
        .bind(insert.title)
        .bind(insert.description)
        .bind(insert.location)
        .bind(insert.start_time)
        .bind(insert.end_time)
        .bind(insert.country_id)
        .bind(insert.event_type_id)
        .bind(insert.recurrence_pattern)
        .bind(insert.recurrence_interval)
        .bind(insert.recurrence_end_date)
        .execute(&mut *tx)
        .await
        .map_err(map_constraint_violation)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::EventNotFound(id));
        }

        replace_links(&mut tx, id.into_inner(), &insert).await?;
        tx.commit().await.map_err(map_db_error)?;

        self.fetch_required(id).await
    }

    #[instrument(skip(self))]
    async fn soft_delete(
        &self,
        id: EventId,
        deleted_by: UserId,
        at: DateTime<Utc>,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE events
            SET is_deleted = TRUE, deleted_at = $3, deleted_by = $2, updated_at = NOW()
            WHERE id = $1 AND is_deleted = FALSE
            ",
        )
        .bind(id.into_inner())
        .bind(deleted_by.into_inner())
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::EventNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn add_participant(&self, id: EventId, user_id: UserId) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO event_participants (event_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            ",
        )
        .bind(id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_participant(&self, id: EventId, user_id: UserId) -> RepoResult<()> {
        sqlx::query("DELETE FROM event_participants WHERE event_id = $1 AND user_id = $2")
            .bind(id.into_inner())
            .bind(user_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn is_participant(&self, id: EventId, user_id: UserId) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM event_participants WHERE event_id = $1 AND user_id = $2
            )
            ",
        )
        .bind(id.into_inner())
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn participant_count(&self, id: EventId) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM event_participants WHERE event_id = $1")
            .bind(id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn participant_ids(&self, id: EventId) -> RepoResult<Vec<UserId>> {
        let raw = sqlx::query_scalar::<_, i64>(
            "SELECT user_id FROM event_participants WHERE event_id = $1 ORDER BY joined_at, user_id",
        )
        .bind(id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(user_ids(raw))
    }

    #[instrument(skip(self))]
    async fn attendee_ids(&self, id: EventId) -> RepoResult<Vec<UserId>> {
        let raw = sqlx::query_scalar::<_, i64>(
            "SELECT user_id FROM event_attendees WHERE event_id = $1 ORDER BY user_id",
        )
        .bind(id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(user_ids(raw))
    }

    #[instrument(skip(self, submitted), fields(count = submitted.len()))]
    async fn set_attendees(&self, id: EventId, submitted: &[UserId]) -> RepoResult<Vec<UserId>> {
        let raw: Vec<i64> = submitted.iter().map(|u| u.into_inner()).collect();
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query("DELETE FROM event_attendees WHERE event_id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        // Participant rows stay locked until commit so a concurrent leave
        // cannot slip between the check and the insert
        let mut stored = sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO event_attendees (event_id, user_id)
            SELECT p.event_id, p.user_id
            FROM event_participants p
            WHERE p.event_id = $1 AND p.user_id = ANY($2::BIGINT[])
            FOR SHARE
            RETURNING user_id
            ",
        )
        .bind(id.into_inner())
        .bind(&raw)
        .fetch_all(&mut *tx)
        .await
        .map_err(map_constraint_violation)?;

        tx.commit().await.map_err(map_db_error)?;

        stored.sort_unstable();
        Ok(user_ids(stored))
    }

    #[instrument(skip(self))]
    async fn hosted_upcoming(&self, user_id: UserId, now: DateTime<Utc>) -> RepoResult<Vec<Event>> {
        self.fetch_list(
            "e.owner_id = $1 AND e.end_time >= $2 ORDER BY e.start_time, e.id",
            user_id,
            now,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn participating_upcoming(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> RepoResult<Vec<Event>> {
        self.fetch_list(
            r"EXISTS(SELECT 1 FROM event_participants p WHERE p.event_id = e.id AND p.user_id = $1)
              AND e.end_time >= $2
              ORDER BY e.start_time, e.id",
            user_id,
            now,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn participated_past(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> RepoResult<Vec<Event>> {
        self.fetch_list(
            r"EXISTS(SELECT 1 FROM event_participants p WHERE p.event_id = e.id AND p.user_id = $1)
              AND e.end_time < $2
              ORDER BY e.start_time DESC, e.id DESC",
            user_id,
            now,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn organized_past(&self, user_id: UserId, now: DateTime<Utc>) -> RepoResult<Vec<Event>> {
        self.fetch_list(
            r"(e.owner_id = $1 OR EXISTS(
                  SELECT 1 FROM event_organizers o WHERE o.event_id = e.id AND o.user_id = $1))
              AND e.end_time < $2
              ORDER BY e.start_time DESC, e.id DESC",
            user_id,
            now,
        )
        .await
    }
}
