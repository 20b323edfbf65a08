//! In-process store used for development and tests.
//!
//! Enforces the same constraints as the PostgreSQL schema: unique username,
//! unique email, feedback owners must exist, and deleting a user deletes its
//! feedback in the same critical section.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::feedback_repository::FeedbackRepository;
use crate::application::ports::health_probe::HealthProbe;
use crate::application::ports::user_repository::{
    StoreConflict, UniqueField, UserRepository,
};
use crate::domain::feedback::feedback::{Feedback, NewFeedback};
use crate::domain::users::user::User;

#[derive(Default)]
struct Tables {
    users: BTreeMap<String, User>,
    feedback: BTreeMap<i32, Feedback>,
    last_feedback_id: i32,
}

#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert_user(&self, user: &User) -> anyhow::Result<User> {
        let mut t = self.tables.write().await;
        if t.users.contains_key(&user.username) {
            return Err(StoreConflict {
                field: UniqueField::Username,
            }
            .into());
        }
        if t.users.values().any(|u| u.email == user.email) {
            return Err(StoreConflict {
                field: UniqueField::Email,
            }
            .into());
        }
        t.users.insert(user.username.clone(), user.clone());
        Ok(user.clone())
    }

    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        Ok(self.tables.read().await.users.get(username).cloned())
    }

    async fn email_exists(&self, email: &str) -> anyhow::Result<bool> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .any(|u| u.email == email))
    }

    async fn delete_user(&self, username: &str) -> anyhow::Result<bool> {
        let mut t = self.tables.write().await;
        if !t.users.contains_key(username) {
            return Ok(false);
        }
        t.feedback
            .retain(|_, f| f.username.as_deref() != Some(username));
        t.users.remove(username);
        Ok(true)
    }
}

#[async_trait]
impl FeedbackRepository for InMemoryStore {
    async fn create(&self, new: &NewFeedback) -> anyhow::Result<Option<Feedback>> {
        let mut t = self.tables.write().await;
        if let Some(owner) = &new.username {
            if !t.users.contains_key(owner) {
                return Ok(None);
            }
        }
        t.last_feedback_id += 1;
        let row = Feedback {
            id: t.last_feedback_id,
            title: new.title.clone(),
            content: new.content.clone(),
            username: new.username.clone(),
        };
        t.feedback.insert(row.id, row.clone());
        Ok(Some(row))
    }

    async fn get(&self, id: i32) -> anyhow::Result<Option<Feedback>> {
        Ok(self.tables.read().await.feedback.get(&id).cloned())
    }

    async fn list_for_user(&self, username: &str) -> anyhow::Result<Vec<Feedback>> {
        Ok(self
            .tables
            .read()
            .await
            .feedback
            .values()
            .filter(|f| f.is_owned_by(username))
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: i32,
        title: &str,
        content: &str,
    ) -> anyhow::Result<Option<Feedback>> {
        let mut t = self.tables.write().await;
        Ok(t.feedback.get_mut(&id).map(|f| {
            f.title = title.to_string();
            f.content = content.to_string();
            f.clone()
        }))
    }

    async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        Ok(self.tables.write().await.feedback.remove(&id).is_some())
    }
}

#[async_trait]
impl HealthProbe for InMemoryStore {
    async fn store_ok(&self) -> bool {
        true
    }
}
