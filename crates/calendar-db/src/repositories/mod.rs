//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in calendar-core.

mod error;
mod event;
mod image;
mod lookup;
mod profile;
mod user;

pub use event::PgEventRepository;
pub use image::PgEventImageRepository;
pub use lookup::{PgCommunityRepository, PgCountryRepository, PgEventTypeRepository};
pub use profile::PgProfileRepository;
pub use user::PgUserRepository;
