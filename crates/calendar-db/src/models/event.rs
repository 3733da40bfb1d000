//! Event database models

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Events row with its community and organizer id arrays
#[derive(Debug, Clone, FromRow)]
pub struct EventModel {
    pub id: i64,
    pub owner_id: Option<i64>,
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub country_id: Option<i64>,
    pub event_type_id: Option<i64>,
    pub recurrence_pattern: String,
    pub recurrence_interval: i32,
    pub recurrence_end_date: Option<NaiveDate>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub community_ids: Vec<i64>,
    pub organizer_ids: Vec<i64>,
}

/// Feed projection: event summary plus per-viewer counters
#[derive(Debug, Clone, FromRow)]
pub struct FeedEventModel {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub recurrence_pattern: String,
    pub recurrence_interval: i32,
    pub recurrence_end_date: Option<NaiveDate>,
    pub event_type: Option<String>,
    pub participant_count: i64,
    pub joined: bool,
}
