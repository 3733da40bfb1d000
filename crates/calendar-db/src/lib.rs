//! # calendar-db
//!
//! Database layer implementing the `calendar-core` repository traits with
//! PostgreSQL via SQLx. It handles:
//!
//! - Connection pool management and start-up migrations
//! - Database models with SQLx `FromRow` derives
//! - Model -> entity mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use calendar_common::AppConfig;
//! use calendar_db::{create_pool, run_migrations, PgEventRepository};
//!
//! async fn example(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&config.database).await?;
//!     run_migrations(&pool, &config.database.migrations_dir).await?;
//!     let events = PgEventRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, PgPool};
pub use repositories::{
    PgCommunityRepository, PgCountryRepository, PgEventImageRepository, PgEventRepository,
    PgEventTypeRepository, PgProfileRepository, PgUserRepository,
};
