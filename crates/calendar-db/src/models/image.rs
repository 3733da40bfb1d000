//! Event image database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct EventImageModel {
    pub id: i64,
    pub event_id: i64,
    pub file_path: String,
    pub original_name: String,
    pub uploaded_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}
