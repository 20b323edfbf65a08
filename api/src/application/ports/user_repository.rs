use async_trait::async_trait;

use crate::domain::users::user::User;

/// Unique column a write collided with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Username,
    Email,
}

impl UniqueField {
    pub fn as_str(&self) -> &'static str {
        match self {
            UniqueField::Username => "username",
            UniqueField::Email => "email",
        }
    }
}

/// Raised by repositories (inside `anyhow::Error`) when the store rejects a
/// write because of a uniqueness constraint.
#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("{} already exists", .field.as_str())]
pub struct StoreConflict {
    pub field: UniqueField,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Commits a freshly registered user. Fails with [`StoreConflict`] on a
    /// duplicate username or email.
    async fn insert_user(&self, user: &User) -> anyhow::Result<User>;
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>>;
    async fn email_exists(&self, email: &str) -> anyhow::Result<bool>;
    /// Deletes the user and every feedback row it owns.
    async fn delete_user(&self, username: &str) -> anyhow::Result<bool>;
}
