use super::OwnedAccess;
use crate::application::ports::feedback_repository::FeedbackRepository;
use crate::domain::feedback::feedback::Feedback;

pub struct GetFeedback<'a, R: FeedbackRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: FeedbackRepository + ?Sized> GetFeedback<'a, R> {
    pub async fn execute(&self, id: i32, actor: &str) -> anyhow::Result<OwnedAccess<Feedback>> {
        Ok(match self.repo.get(id).await? {
            None => OwnedAccess::NotFound,
            Some(f) if f.is_owned_by(actor) => OwnedAccess::Granted(f),
            Some(_) => OwnedAccess::Forbidden,
        })
    }
}
