use async_trait::async_trait;

use crate::domain::feedback::feedback::{Feedback, NewFeedback};

#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// `None` when `new.username` names a user that does not exist.
    async fn create(&self, new: &NewFeedback) -> anyhow::Result<Option<Feedback>>;
    async fn get(&self, id: i32) -> anyhow::Result<Option<Feedback>>;
    async fn list_for_user(&self, username: &str) -> anyhow::Result<Vec<Feedback>>;
    async fn update(&self, id: i32, title: &str, content: &str)
    -> anyhow::Result<Option<Feedback>>;
    async fn delete(&self, id: i32) -> anyhow::Result<bool>;
}
