use super::OwnedAccess;
use crate::application::ports::feedback_repository::FeedbackRepository;

pub struct DeleteFeedback<'a, R: FeedbackRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: FeedbackRepository + ?Sized> DeleteFeedback<'a, R> {
    pub async fn execute(&self, id: i32, actor: &str) -> anyhow::Result<OwnedAccess<()>> {
        match self.repo.get(id).await? {
            None => Ok(OwnedAccess::NotFound),
            Some(f) if !f.is_owned_by(actor) => Ok(OwnedAccess::Forbidden),
            Some(_) => {
                if self.repo.delete(id).await? {
                    tracing::debug!(feedback_id = id, username = %actor, "feedback_deleted");
                    Ok(OwnedAccess::Granted(()))
                } else {
                    Ok(OwnedAccess::NotFound)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::user_repository::UserRepository;
    use crate::application::use_cases::feedback::FeedbackInput;
    use crate::application::use_cases::feedback::create_feedback::CreateFeedback;
    use crate::application::use_cases::feedback::get_feedback::GetFeedback;
    use crate::application::use_cases::feedback::update_feedback::UpdateFeedback;
    use crate::domain::users::user::User;
    use crate::infrastructure::memory::InMemoryStore;

    async fn store_with(users: &[&str]) -> InMemoryStore {
        let store = InMemoryStore::new();
        for name in users {
            store
                .insert_user(&User {
                    username: name.to_string(),
                    password_hash: "$argon2id$stub".into(),
                    email: format!("{name}@x.com"),
                    first_name: "F".into(),
                    last_name: "L".into(),
                })
                .await
                .unwrap();
        }
        store
    }

    fn input(title: &str) -> FeedbackInput {
        FeedbackInput {
            title: title.into(),
            content: "content".into(),
        }
    }

    #[tokio::test]
    async fn owner_can_read_update_and_delete() {
        let store = store_with(&["alice"]).await;
        let created = CreateFeedback {
            users: &store,
            feedback: &store,
        }
        .execute("alice", input("first"))
        .await
        .unwrap()
        .unwrap();
        assert_eq!(created.username.as_deref(), Some("alice"));

        let got = GetFeedback { repo: &store }
            .execute(created.id, "alice")
            .await
            .unwrap();
        assert_eq!(got, OwnedAccess::Granted(created.clone()));

        let updated = UpdateFeedback { repo: &store }
            .execute(created.id, "alice", input("renamed"))
            .await
            .unwrap();
        match updated {
            OwnedAccess::Granted(f) => assert_eq!(f.title, "renamed"),
            other => panic!("unexpected {other:?}"),
        }

        let deleted = DeleteFeedback { repo: &store }
            .execute(created.id, "alice")
            .await
            .unwrap();
        assert_eq!(deleted, OwnedAccess::Granted(()));
        assert_eq!(
            GetFeedback { repo: &store }
                .execute(created.id, "alice")
                .await
                .unwrap(),
            OwnedAccess::NotFound
        );
    }

    #[tokio::test]
    async fn other_users_are_forbidden() {
        let store = store_with(&["alice", "bob"]).await;
        let created = CreateFeedback {
            users: &store,
            feedback: &store,
        }
        .execute("alice", input("mine"))
        .await
        .unwrap()
        .unwrap();

        let uc = DeleteFeedback { repo: &store };
        assert_eq!(
            uc.execute(created.id, "bob").await.unwrap(),
            OwnedAccess::Forbidden
        );
        assert_eq!(
            UpdateFeedback { repo: &store }
                .execute(created.id, "bob", input("hijack"))
                .await
                .unwrap(),
            OwnedAccess::Forbidden
        );
        assert_eq!(
            GetFeedback { repo: &store }.execute(created.id, "alice").await.unwrap(),
            OwnedAccess::Granted(created)
        );
    }

    #[tokio::test]
    async fn creating_for_a_missing_user_returns_none() {
        let store = store_with(&[]).await;
        let created = CreateFeedback {
            users: &store,
            feedback: &store,
        }
        .execute("ghost", input("orphan"))
        .await
        .unwrap();
        assert!(created.is_none());
    }
}
