//! PostgreSQL implementation of ProfileRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use calendar_core::entities::Profile;
use calendar_core::traits::{ProfileRepository, RepoResult};
use calendar_core::value_objects::{CommunityId, CountryId, UserId};

use crate::models::ProfileModel;

use super::error::{map_constraint_violation, map_db_error};

#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    #[instrument(skip(self))]
    async fn get_or_create(&self, user_id: UserId) -> RepoResult<Profile> {
        sqlx::query("INSERT INTO profiles (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_constraint_violation)?;

        let row = sqlx::query_as::<_, ProfileModel>(
            "SELECT user_id, country_id, community_id FROM profiles WHERE user_id = $1",
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Profile::from(row))
    }

    #[instrument(skip(self))]
    async fn update(&self, profile: &Profile) -> RepoResult<Profile> {
        let row = sqlx::query_as::<_, ProfileModel>(
            r"
            INSERT INTO profiles (user_id, country_id, community_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE
            SET country_id = EXCLUDED.country_id, community_id = EXCLUDED.community_id
            RETURNING user_id, country_id, community_id
            ",
        )
        .bind(profile.user_id.into_inner())
        .bind(profile.country_id.map(CountryId::into_inner))
        .bind(profile.community_id.map(CommunityId::into_inner))
        .fetch_one(&self.pool)
        .await
        .map_err(map_constraint_violation)?;

        Ok(Profile::from(row))
    }
}
