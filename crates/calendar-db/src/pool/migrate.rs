//! Start-up schema migrations
//!
//! Migrations are plain SQL files read from disk at run time
//! (`crates/calendar-db/migrations` by default).

use std::path::PathBuf;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::PgPool;
use tracing::info;

/// Apply every pending migration found in `dir`
pub async fn run_migrations(pool: &PgPool, dir: &str) -> Result<(), MigrateError> {
    let migrator = Migrator::new(PathBuf::from(dir)).await?;
    info!(dir, count = migrator.iter().count(), "Applying database migrations");
    migrator.run(pool).await
}
