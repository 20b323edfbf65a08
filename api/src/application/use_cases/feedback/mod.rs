pub mod create_feedback;
pub mod delete_feedback;
pub mod get_feedback;
pub mod update_feedback;

use crate::application::forms::ValidatedForm;

/// Result of an operation on a feedback row on behalf of a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnedAccess<T> {
    Granted(T),
    NotFound,
    Forbidden,
}

#[derive(Debug, Clone)]
pub struct FeedbackInput {
    pub title: String,
    pub content: String,
}

impl From<ValidatedForm> for FeedbackInput {
    fn from(mut form: ValidatedForm) -> Self {
        Self {
            title: form.take("title"),
            content: form.take("content"),
        }
    }
}
