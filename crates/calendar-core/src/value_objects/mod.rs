//! Value objects - immutable types that represent domain concepts

mod ids;
mod recurrence;

pub use ids::{CommunityId, CountryId, EventId, EventTypeId, IdParseError, ImageId, UserId};
pub use recurrence::{Recurrence, RecurrencePattern};
