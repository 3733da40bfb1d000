//! PostgreSQL implementations of the lookup repositories

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use calendar_core::entities::{Community, Country, EventType};
use calendar_core::error::DomainError;
use calendar_core::traits::{
    CommunityRepository, CountryRepository, EventTypeRepository, RepoResult,
};
use calendar_core::value_objects::{CommunityId, CountryId, EventTypeId};

use crate::models::{CommunityModel, CountryModel, EventTypeModel};

use super::error::{map_constraint_violation, map_db_error, map_unique_violation};

// ============================================================================
// Countries
// ============================================================================

#[derive(Clone)]
pub struct PgCountryRepository {
    pool: PgPool,
}

impl PgCountryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CountryRepository for PgCountryRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Country>> {
        let rows = sqlx::query_as::<_, CountryModel>("SELECT id, name FROM countries ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Country::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: CountryId) -> RepoResult<Option<Country>> {
        let row = sqlx::query_as::<_, CountryModel>("SELECT id, name FROM countries WHERE id = $1")
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(row.map(Country::from))
    }

    #[instrument(skip(self))]
    async fn create(&self, name: &str) -> RepoResult<Country> {
        let name = name.trim();
        let row = sqlx::query_as::<_, CountryModel>(
            "INSERT INTO countries (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::NameAlreadyExists(name.to_string())))?;

        Ok(Country::from(row))
    }
}

// ============================================================================
// Communities
// ============================================================================

#[derive(Clone)]
pub struct PgCommunityRepository {
    pool: PgPool,
}

impl PgCommunityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommunityRepository for PgCommunityRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Community>> {
        let rows = sqlx::query_as::<_, CommunityModel>(
            "SELECT id, name, country_id FROM communities ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Community::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_ids(&self, ids: &[CommunityId]) -> RepoResult<Vec<Community>> {
        let raw: Vec<i64> = ids.iter().map(|id| id.into_inner()).collect();
        let rows = sqlx::query_as::<_, CommunityModel>(
            "SELECT id, name, country_id FROM communities WHERE id = ANY($1) ORDER BY name",
        )
        .bind(&raw)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Community::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_names(&self, names: &[String]) -> RepoResult<Vec<Community>> {
        let rows = sqlx::query_as::<_, CommunityModel>(
            "SELECT id, name, country_id FROM communities WHERE name = ANY($1) ORDER BY name",
        )
        .bind(names)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Community::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, name: &str, country_id: Option<CountryId>) -> RepoResult<Community> {
        let name = name.trim();
        let row = sqlx::query_as::<_, CommunityModel>(
            r"
            INSERT INTO communities (name, country_id)
            VALUES ($1, $2)
            RETURNING id, name, country_id
            ",
        )
        .bind(name)
        .bind(country_id.map(CountryId::into_inner))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let is_unique = e
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation());
            if is_unique {
                DomainError::NameAlreadyExists(name.to_string())
            } else {
                map_constraint_violation(e)
            }
        })?;

        Ok(Community::from(row))
    }
}

// ============================================================================
// Event types
// ============================================================================

#[derive(Clone)]
pub struct PgEventTypeRepository {
    pool: PgPool,
}

impl PgEventTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventTypeRepository for PgEventTypeRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<EventType>> {
        let rows = sqlx::query_as::<_, EventTypeModel>(
            "SELECT id, name, description FROM event_types ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(EventType::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: EventTypeId) -> RepoResult<Option<EventType>> {
        let row = sqlx::query_as::<_, EventTypeModel>(
            "SELECT id, name, description FROM event_types WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.map(EventType::from))
    }

    #[instrument(skip(self))]
    async fn create(&self, name: &str, description: &str) -> RepoResult<EventType> {
        let name = name.trim();
        let row = sqlx::query_as::<_, EventTypeModel>(
            r"
            INSERT INTO event_types (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description
            ",
        )
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::NameAlreadyExists(name.to_string())))?;

        Ok(EventType::from(row))
    }
}
