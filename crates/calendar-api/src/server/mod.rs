//! Server setup and initialization
//!
//! Provides the application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use calendar_common::{AppConfig, AppError, JwtService};
use calendar_db::{
    create_pool, run_migrations, PgCommunityRepository, PgCountryRepository,
    PgEventImageRepository, PgEventRepository, PgEventTypeRepository, PgProfileRepository,
    PgUserRepository,
};
use calendar_service::ServiceContextBuilder;
use calendar_storage::LocalMediaStore;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::{info, warn};

use crate::middleware::{apply_middleware, body_limit_for, MiddlewareSettings};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();

    let settings = MiddlewareSettings {
        rate_limit: &config.rate_limit,
        cors: &config.cors,
        is_production: config.app.env.is_production(),
        body_limit: body_limit_for(config.storage.max_file_size_bytes()),
    };
    let api = apply_middleware(create_router(), &settings);

    let mut router = health_routes().merge(api);

    let media_url = config.storage.media_url.trim_end_matches('/');
    if media_url.starts_with('/') && media_url.len() > 1 {
        router = router.nest_service(media_url, ServeDir::new(&config.storage.upload_dir));
    } else {
        warn!(
            media_url = %config.storage.media_url,
            "Media URL is not a local path, media files are not served"
        );
    }

    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&config.database)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool, &config.database.migrations_dir)
            .await
            .map_err(|e| AppError::Database(format!("Migration failed: {e}")))?;
        info!("Database migrations applied");
    }

    let media_store = LocalMediaStore::from_config(&config.storage);
    media_store
        .ensure_root()
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;
    info!(root = %media_store.root().display(), "Media storage ready");

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));

    let service_context = ServiceContextBuilder::new()
        .pool(pool.clone())
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .event_repo(Arc::new(PgEventRepository::new(pool.clone())))
        .image_repo(Arc::new(PgEventImageRepository::new(pool.clone())))
        .country_repo(Arc::new(PgCountryRepository::new(pool.clone())))
        .community_repo(Arc::new(PgCommunityRepository::new(pool.clone())))
        .event_type_repo(Arc::new(PgEventTypeRepository::new(pool.clone())))
        .profile_repo(Arc::new(PgProfileRepository::new(pool)))
        .media_store(Arc::new(media_store))
        .jwt_service(jwt_service)
        .calendar(config.calendar.clone())
        .max_upload_bytes(config.storage.max_file_size_bytes())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server until Ctrl+C
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let address = config.api.address();
    let addr = tokio::net::lookup_host(&address)
        .await
        .ok()
        .and_then(|mut addrs| addrs.next())
        .ok_or_else(|| AppError::Config(format!("Invalid listen address: {address}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}
