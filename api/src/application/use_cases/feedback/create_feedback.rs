use super::FeedbackInput;
use crate::application::ports::feedback_repository::FeedbackRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::feedback::feedback::{Feedback, NewFeedback};

pub struct CreateFeedback<'a, UR, FR>
where
    UR: UserRepository + ?Sized,
    FR: FeedbackRepository + ?Sized,
{
    pub users: &'a UR,
    pub feedback: &'a FR,
}

impl<'a, UR, FR> CreateFeedback<'a, UR, FR>
where
    UR: UserRepository + ?Sized,
    FR: FeedbackRepository + ?Sized,
{
    /// `None` when the author no longer exists.
    pub async fn execute(
        &self,
        username: &str,
        input: FeedbackInput,
    ) -> anyhow::Result<Option<Feedback>> {
        if self.users.find_by_username(username).await?.is_none() {
            return Ok(None);
        }
        let Some(created) = self
            .feedback
            .create(&NewFeedback {
                title: input.title,
                content: input.content,
                username: Some(username.to_string()),
            })
            .await?
        else {
            return Ok(None);
        };
        tracing::debug!(username = %username, feedback_id = created.id, "feedback_created");
        Ok(Some(created))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::users::user::User;
    use crate::infrastructure::memory::InMemoryStore;

    fn input() -> FeedbackInput {
        FeedbackInput {
            title: "t".into(),
            content: "c".into(),
        }
    }

    #[tokio::test]
    async fn missing_author_is_none() {
        let store = InMemoryStore::new();
        let uc = CreateFeedback {
            users: &store,
            feedback: &store,
        };
        assert!(uc.execute("ghost", input()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn author_removed_before_insert_is_none() {
        // The user lookup sees alice, the feedback store no longer does.
        let users = InMemoryStore::new();
        users
            .insert_user(&User {
                username: "alice".into(),
                password_hash: "$argon2id$stub".into(),
                email: "a@x.com".into(),
                first_name: "A".into(),
                last_name: "A".into(),
            })
            .await
            .unwrap();
        let feedback = InMemoryStore::new();
        let uc = CreateFeedback {
            users: &users,
            feedback: &feedback,
        };
        assert!(uc.execute("alice", input()).await.unwrap().is_none());
        assert!(feedback.list_for_user("alice").await.unwrap().is_empty());
    }
}
