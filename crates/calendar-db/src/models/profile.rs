//! Profile database model

use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ProfileModel {
    pub user_id: i64,
    pub country_id: Option<i64>,
    pub community_id: Option<i64>,
}
