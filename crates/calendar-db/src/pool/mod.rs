//! Database connection pool management

mod migrate;
mod postgres;

pub use migrate::run_migrations;
pub use postgres::create_pool;

// Re-export PgPool for convenience
pub use sqlx::postgres::PgPool;
