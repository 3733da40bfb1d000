//! Admin-managed lookup tables

use crate::value_objects::{CommunityId, CountryId, EventTypeId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    pub id: CountryId,
    pub name: String,
}

/// Community, optionally scoped to a country
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Community {
    pub id: CommunityId,
    pub name: String,
    pub country_id: Option<CountryId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventType {
    pub id: EventTypeId,
    pub name: String,
    pub description: String,
}
