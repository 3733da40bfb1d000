//! Lookup model -> entity mappers

use calendar_core::entities::{Community, Country, EventType};
use calendar_core::value_objects::{CommunityId, CountryId, EventTypeId};

use crate::models::{CommunityModel, CountryModel, EventTypeModel};

impl From<CountryModel> for Country {
    fn from(model: CountryModel) -> Self {
        Country {
            id: CountryId::new(model.id),
            name: model.name,
        }
    }
}

impl From<CommunityModel> for Community {
    fn from(model: CommunityModel) -> Self {
        Community {
            id: CommunityId::new(model.id),
            name: model.name,
            country_id: model.country_id.map(CountryId::new),
        }
    }
}

impl From<EventTypeModel> for EventType {
    fn from(model: EventTypeModel) -> Self {
        EventType {
            id: EventTypeId::new(model.id),
            name: model.name,
            description: model.description,
        }
    }
}
