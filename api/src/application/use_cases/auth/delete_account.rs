use crate::application::ports::user_repository::UserRepository;

pub struct DeleteAccount<'a, UR: UserRepository + ?Sized> {
    pub user_repo: &'a UR,
}

impl<'a, UR: UserRepository + ?Sized> DeleteAccount<'a, UR> {
    /// Removes the account; the store drops the user's feedback with it.
    pub async fn execute(&self, username: &str) -> anyhow::Result<bool> {
        let deleted = self.user_repo.delete_user(username).await?;
        if deleted {
            tracing::info!(username = %username, "account_deleted");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::feedback_repository::FeedbackRepository;
    use crate::domain::feedback::feedback::NewFeedback;
    use crate::domain::users::user::User;
    use crate::infrastructure::memory::InMemoryStore;

    fn user(username: &str, email: &str) -> User {
        User {
            username: username.into(),
            password_hash: "$argon2id$stub".into(),
            email: email.into(),
            first_name: "F".into(),
            last_name: "L".into(),
        }
    }

    fn note(owner: &str, title: &str) -> NewFeedback {
        NewFeedback {
            title: title.into(),
            content: "body".into(),
            username: Some(owner.into()),
        }
    }

    #[tokio::test]
    async fn deleting_a_user_removes_only_their_feedback() {
        let store = InMemoryStore::new();
        store.insert_user(&user("alice", "a@x.com")).await.unwrap();
        store.insert_user(&user("bob", "b@x.com")).await.unwrap();
        store.create(&note("alice", "one")).await.unwrap();
        store.create(&note("alice", "two")).await.unwrap();
        let kept = store.create(&note("bob", "three")).await.unwrap().unwrap();

        let uc = DeleteAccount { user_repo: &store };
        assert!(uc.execute("alice").await.unwrap());

        assert!(store.find_by_username("alice").await.unwrap().is_none());
        assert!(store.list_for_user("alice").await.unwrap().is_empty());
        assert_eq!(store.list_for_user("bob").await.unwrap(), vec![kept]);
    }

    #[tokio::test]
    async fn deleting_a_missing_user_reports_false() {
        let store = InMemoryStore::new();
        let uc = DeleteAccount { user_repo: &store };
        assert!(!uc.execute("ghost").await.unwrap());
    }
}
