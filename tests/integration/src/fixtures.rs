//! Test fixtures and data generators

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::helpers::{assert_json, TestServer, API};

static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique suffix for test data; mixes in the process id so reruns against
/// the same database do not collide
pub fn unique_suffix() -> String {
    format!("{}x{}", std::process::id(), COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// Registration request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("member{suffix}"),
            email: format!("member{suffix}@example.com"),
            password: "Calendar-Pass-42".to_string(),
            first_name: "Test".to_string(),
            last_name: "Member".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
}

/// Current user
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
}

/// Stored event, as returned by create and edit
#[derive(Debug, Deserialize)]
pub struct EventResponse {
    pub id: i64,
    pub owner_id: Option<i64>,
    pub title: String,
    pub community_ids: Vec<i64>,
    pub organizer_ids: Vec<i64>,
}

/// Feed occurrence
#[derive(Debug, Deserialize)]
pub struct OccurrenceResponse {
    pub id: String,
    pub orig_id: i64,
    pub title: String,
    pub start: String,
    pub end: String,
    pub participants: i64,
    pub joined: bool,
}

/// Gallery image
#[derive(Debug, Deserialize)]
pub struct ImageResponse {
    pub id: i64,
    pub url: String,
    pub original_name: String,
}

/// Event creation body with a given title and time range
pub fn event_body(title: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Value {
    json!({
        "title": title,
        "description": "Integration test event",
        "location": "Bucharest",
        "start_time": start,
        "end_time": end,
    })
}

/// Register a fresh user and return the auth response
pub async fn register_user(server: &TestServer) -> Result<(RegisterRequest, AuthResponse)> {
    let request = RegisterRequest::unique();
    let response = server
        .post(&format!("{API}/auth/register"), None, &request)
        .await?;
    let auth = assert_json(response, StatusCode::CREATED).await?;
    Ok((request, auth))
}

/// Register a user and grant admin rights directly in the database
pub async fn register_admin(server: &TestServer) -> Result<AuthResponse> {
    let (_, auth) = register_user(server).await?;
    sqlx::query("UPDATE users SET is_admin = TRUE WHERE id = $1")
        .bind(auth.user.id)
        .execute(server.pool())
        .await?;
    Ok(auth)
}

/// Create an event as `token`
pub async fn create_event(server: &TestServer, token: &str, body: &Value) -> Result<EventResponse> {
    let response = server.post(&format!("{API}/events"), Some(token), body).await?;
    assert_json(response, StatusCode::CREATED).await
}

/// An event that ended an hour ago
pub fn past_event_body(title: &str) -> Value {
    let end = Utc::now() - Duration::hours(1);
    event_body(title, end - Duration::hours(2), end)
}

/// An event starting tomorrow
pub fn future_event_body(title: &str) -> Value {
    let start = Utc::now() + Duration::days(1);
    event_body(title, start, start + Duration::hours(2))
}

/// Smallest valid PNG (1x1, transparent)
pub const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];
