//! Model -> entity mappers
//!
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - `EventInsert`: Prepare draft data for binding

mod event;
mod image;
mod lookup;
mod profile;
mod user;

pub use event::{recurrence_from_columns, EventInsert};
pub use user::user_ids;
