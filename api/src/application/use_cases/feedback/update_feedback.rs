use super::{FeedbackInput, OwnedAccess};
use crate::application::ports::feedback_repository::FeedbackRepository;
use crate::domain::feedback::feedback::Feedback;

pub struct UpdateFeedback<'a, R: FeedbackRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: FeedbackRepository + ?Sized> UpdateFeedback<'a, R> {
    pub async fn execute(
        &self,
        id: i32,
        actor: &str,
        input: FeedbackInput,
    ) -> anyhow::Result<OwnedAccess<Feedback>> {
        match self.repo.get(id).await? {
            None => return Ok(OwnedAccess::NotFound),
            Some(f) if !f.is_owned_by(actor) => return Ok(OwnedAccess::Forbidden),
            Some(_) => {}
        }
        Ok(
            match self.repo.update(id, &input.title, &input.content).await? {
                Some(updated) => OwnedAccess::Granted(updated),
                None => OwnedAccess::NotFound,
            },
        )
    }
}
