//! Service context - dependency container for services
//!
//! Holds all repositories, the media store, and the settings services need.

use std::sync::Arc;

use calendar_common::{CalendarConfig, JwtService};
use calendar_core::traits::{
    CommunityRepository, CountryRepository, EventImageRepository, EventRepository,
    EventTypeRepository, MediaStore, ProfileRepository, UserRepository,
};
use calendar_core::AggregateRegion;
use calendar_db::PgPool;

use super::error::{ServiceError, ServiceResult};

/// Default upload limit when none is configured (10 MiB)
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - Media storage for gallery files
/// - JWT service for authentication
/// - Calendar settings (aggregate region, recurrence cap, upload limit)
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool, absent when running against other repository backends
    pool: Option<PgPool>,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    event_repo: Arc<dyn EventRepository>,
    image_repo: Arc<dyn EventImageRepository>,
    country_repo: Arc<dyn CountryRepository>,
    community_repo: Arc<dyn CommunityRepository>,
    event_type_repo: Arc<dyn EventTypeRepository>,
    profile_repo: Arc<dyn ProfileRepository>,

    // Storage
    media_store: Arc<dyn MediaStore>,

    // Services
    jwt_service: Arc<JwtService>,

    // Settings
    region: AggregateRegion,
    max_recurrence_instances: u32,
    max_upload_bytes: usize,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool, if one is configured
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn event_repo(&self) -> &dyn EventRepository {
        self.event_repo.as_ref()
    }

    pub fn image_repo(&self) -> &dyn EventImageRepository {
        self.image_repo.as_ref()
    }

    pub fn country_repo(&self) -> &dyn CountryRepository {
        self.country_repo.as_ref()
    }

    pub fn community_repo(&self) -> &dyn CommunityRepository {
        self.community_repo.as_ref()
    }

    pub fn event_type_repo(&self) -> &dyn EventTypeRepository {
        self.event_type_repo.as_ref()
    }

    pub fn profile_repo(&self) -> &dyn ProfileRepository {
        self.profile_repo.as_ref()
    }

    // === Storage ===

    /// Get the media store used for gallery files
    pub fn media_store(&self) -> &dyn MediaStore {
        self.media_store.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    // === Settings ===

    /// Aggregate region used by feed filters and targeted communities
    pub fn region(&self) -> &AggregateRegion {
        &self.region
    }

    /// Upper bound on series instances expanded per recurring event
    pub fn max_recurrence_instances(&self) -> u32 {
        self.max_recurrence_instances
    }

    /// Largest accepted image upload in bytes
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.as_ref().map(|_| "PgPool"))
            .field("repositories", &"...")
            .field("region", &self.region.token)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    event_repo: Option<Arc<dyn EventRepository>>,
    image_repo: Option<Arc<dyn EventImageRepository>>,
    country_repo: Option<Arc<dyn CountryRepository>>,
    community_repo: Option<Arc<dyn CommunityRepository>>,
    event_type_repo: Option<Arc<dyn EventTypeRepository>>,
    profile_repo: Option<Arc<dyn ProfileRepository>>,
    media_store: Option<Arc<dyn MediaStore>>,
    jwt_service: Option<Arc<JwtService>>,
    calendar: CalendarConfig,
    max_upload_bytes: usize,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            user_repo: None,
            event_repo: None,
            image_repo: None,
            country_repo: None,
            community_repo: None,
            event_type_repo: None,
            profile_repo: None,
            media_store: None,
            jwt_service: None,
            calendar: CalendarConfig::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn event_repo(mut self, repo: Arc<dyn EventRepository>) -> Self {
        self.event_repo = Some(repo);
        self
    }

    pub fn image_repo(mut self, repo: Arc<dyn EventImageRepository>) -> Self {
        self.image_repo = Some(repo);
        self
    }

    pub fn country_repo(mut self, repo: Arc<dyn CountryRepository>) -> Self {
        self.country_repo = Some(repo);
        self
    }

    pub fn community_repo(mut self, repo: Arc<dyn CommunityRepository>) -> Self {
        self.community_repo = Some(repo);
        self
    }

    pub fn event_type_repo(mut self, repo: Arc<dyn EventTypeRepository>) -> Self {
        self.event_type_repo = Some(repo);
        self
    }

    pub fn profile_repo(mut self, repo: Arc<dyn ProfileRepository>) -> Self {
        self.profile_repo = Some(repo);
        self
    }

    pub fn media_store(mut self, store: Arc<dyn MediaStore>) -> Self {
        self.media_store = Some(store);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn calendar(mut self, calendar: CalendarConfig) -> Self {
        self.calendar = calendar;
        self
    }

    pub fn max_upload_bytes(mut self, bytes: usize) -> Self {
        self.max_upload_bytes = bytes;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::validation(format!("{name} is required")))
        }

        Ok(ServiceContext {
            region: self.calendar.region(),
            max_recurrence_instances: self.calendar.max_recurrence_instances.max(1),
            max_upload_bytes: self.max_upload_bytes,
            pool: self.pool,
            user_repo: required(self.user_repo, "user_repo")?,
            event_repo: required(self.event_repo, "event_repo")?,
            image_repo: required(self.image_repo, "image_repo")?,
            country_repo: required(self.country_repo, "country_repo")?,
            community_repo: required(self.community_repo, "community_repo")?,
            event_type_repo: required(self.event_type_repo, "event_type_repo")?,
            profile_repo: required(self.profile_repo, "profile_repo")?,
            media_store: required(self.media_store, "media_store")?,
            jwt_service: required(self.jwt_service, "jwt_service")?,
        })
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
