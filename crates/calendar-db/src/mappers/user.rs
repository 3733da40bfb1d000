//! User model -> entity mapper

use calendar_core::entities::User;
use calendar_core::value_objects::UserId;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::new(model.id),
            username: model.username,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            is_admin: model.is_admin,
            created_at: model.created_at,
        }
    }
}

/// Typed ids from a raw id column
pub fn user_ids(raw: Vec<i64>) -> Vec<UserId> {
    raw.into_iter().map(UserId::new).collect()
}
