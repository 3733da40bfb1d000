//! Database models
//!
//! Row structs mirroring the PostgreSQL tables, decoded with `sqlx::FromRow`.

mod event;
mod image;
mod lookup;
mod profile;
mod user;

pub use event::{EventModel, FeedEventModel};
pub use image::EventImageModel;
pub use lookup::{CommunityModel, CountryModel, EventTypeModel};
pub use profile::ProfileModel;
pub use user::UserModel;
