//! # calendar-service
//!
//! Application layer containing the calendar use cases, request/response DTOs
//! and the service context that wires repositories together.

pub mod dto;
pub mod services;

pub use dto::*;
pub use services::*;
