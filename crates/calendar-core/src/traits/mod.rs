//! Ports implemented by the infrastructure crates

mod repositories;
mod storage;

pub use repositories::{
    CommunityRepository, CountryRepository, EventImageRepository, EventRepository,
    EventTypeRepository, FeedQuery, NewUser, ProfileRepository, RepoResult, UserRepository,
};
pub use storage::MediaStore;
