//! Domain entities

mod event;
mod image;
mod lookup;
mod profile;
mod user;

pub use event::Event;
pub use image::EventImage;
pub use lookup::{Community, Country, EventType};
pub use profile::Profile;
pub use user::User;
