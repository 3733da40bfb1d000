//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod attendance;
pub mod auth;
pub mod context;
pub mod error;
pub mod event;
pub mod feed;
pub mod gallery;
pub mod lookup;
pub mod user;

// Re-export all services for convenience
pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use event::EventService;
pub use feed::FeedService;
pub use gallery::GalleryService;
pub use lookup::LookupService;
pub use user::UserService;
