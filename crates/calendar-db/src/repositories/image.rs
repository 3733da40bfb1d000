//! PostgreSQL implementation of EventImageRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use calendar_core::entities::EventImage;
use calendar_core::error::DomainError;
use calendar_core::traits::{EventImageRepository, RepoResult};
use calendar_core::value_objects::{EventId, ImageId, UserId};

use crate::models::EventImageModel;

use super::error::{map_constraint_violation, map_db_error};

/// PostgreSQL implementation of EventImageRepository
#[derive(Clone)]
pub struct PgEventImageRepository {
    pool: PgPool,
}

impl PgEventImageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventImageRepository for PgEventImageRepository {
    #[instrument(skip(self))]
    async fn find_by_event(&self, event_id: EventId) -> RepoResult<Vec<EventImage>> {
        let rows = sqlx::query_as::<_, EventImageModel>(
            r"
            SELECT id, event_id, file_path, original_name, uploaded_by, created_at
            FROM event_images
            WHERE event_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(event_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(EventImage::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_in_event(
        &self,
        event_id: EventId,
        ids: &[ImageId],
    ) -> RepoResult<Vec<EventImage>> {
        let raw: Vec<i64> = ids.iter().map(|id| id.into_inner()).collect();
        let rows = sqlx::query_as::<_, EventImageModel>(
            r"
            SELECT id, event_id, file_path, original_name, uploaded_by, created_at
            FROM event_images
            WHERE event_id = $1 AND id = ANY($2)
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(event_id.into_inner())
        .bind(&raw)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(EventImage::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(
        &self,
        event_id: EventId,
        file_path: &str,
        original_name: &str,
        uploaded_by: Option<UserId>,
    ) -> RepoResult<EventImage> {
        let row = sqlx::query_as::<_, EventImageModel>(
            r"
            INSERT INTO event_images (event_id, file_path, original_name, uploaded_by)
            VALUES ($1, $2, $3, $4)
            RETURNING id, event_id, file_path, original_name, uploaded_by, created_at
            ",
        )
        .bind(event_id.into_inner())
        .bind(file_path)
        .bind(original_name)
        .bind(uploaded_by.map(UserId::into_inner))
        .fetch_one(&self.pool)
        .await
        .map_err(map_constraint_violation)?;

        Ok(EventImage::from(row))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ImageId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM event_images WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ImageNotFound(id));
        }

        Ok(())
    }
}
