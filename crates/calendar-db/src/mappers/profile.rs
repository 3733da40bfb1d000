//! Profile model -> entity mapper

use calendar_core::entities::Profile;
use calendar_core::value_objects::{CommunityId, CountryId, UserId};

use crate::models::ProfileModel;

impl From<ProfileModel> for Profile {
    fn from(model: ProfileModel) -> Self {
        Profile {
            user_id: UserId::new(model.user_id),
            country_id: model.country_id.map(CountryId::new),
            community_id: model.community_id.map(CommunityId::new),
        }
    }
}
