//! Lookup table models

use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct CountryModel {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct CommunityModel {
    pub id: i64,
    pub name: String,
    pub country_id: Option<i64>,
}

#[derive(Debug, Clone, FromRow)]
pub struct EventTypeModel {
    pub id: i64,
    pub name: String,
    pub description: String,
}
