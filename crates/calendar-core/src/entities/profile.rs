//! Profile entity - per-user defaults for the calendar filters

use crate::value_objects::{CommunityId, CountryId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub user_id: UserId,
    pub country_id: Option<CountryId>,
    pub community_id: Option<CommunityId>,
}

impl Profile {
    /// Empty profile, as created on first access
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            country_id: None,
            community_id: None,
        }
    }
}
