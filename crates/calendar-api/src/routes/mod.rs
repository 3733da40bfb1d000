//! Route definitions
//!
//! API routes are mounted under /api/v1; health checks live at the root.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{attendance, auth, events, feed, gallery, health, lookups, users};
use crate::state::AppState;

/// Create the main API router (health routes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes, kept outside the rate limiter
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(calendar_routes())
        .merge(event_routes())
        .merge(gallery_routes())
        .merge(lookup_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/@me", get(users::get_current_user))
        .route(
            "/users/@me/profile",
            get(users::get_profile).patch(users::update_profile),
        )
        .route("/users/@me/events", get(users::my_events))
        .route("/users/@me/events/participated", get(users::participated_events))
        .route("/users/@me/events/organized", get(users::organized_events))
}

fn calendar_routes() -> Router<AppState> {
    Router::new()
        .route("/calendar/filters", get(feed::get_filters))
        .route("/events/feed", get(feed::get_feed))
}

fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/events", post(events::create_event))
        .route(
            "/events/:event_id",
            get(events::get_event)
                .patch(events::update_event)
                .delete(events::delete_event),
        )
        .route("/events/:event_id/participate", post(events::participate))
        .route(
            "/events/:event_id/attendance",
            get(attendance::get_attendance).put(attendance::mark_attendance),
        )
}

fn gallery_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/events/:event_id/images",
            get(gallery::list_images).post(gallery::upload_images),
        )
        .route("/events/:event_id/images/delete", post(gallery::delete_images))
        .route("/events/:event_id/images/download", post(gallery::download_images))
}

fn lookup_routes() -> Router<AppState> {
    Router::new()
        .route("/countries", get(lookups::list_countries))
        .route("/communities", get(lookups::list_communities))
        .route("/event-types", get(lookups::list_event_types))
        .route("/admin/countries", post(lookups::create_country))
        .route("/admin/communities", post(lookups::create_community))
        .route("/admin/event-types", post(lookups::create_event_type))
}
