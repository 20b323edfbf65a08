use crate::application::dto::users::UserProfileDto;
use crate::application::ports::feedback_repository::FeedbackRepository;
use crate::application::ports::user_repository::UserRepository;

pub struct GetProfile<'a, UR, FR>
where
    UR: UserRepository + ?Sized,
    FR: FeedbackRepository + ?Sized,
{
    pub users: &'a UR,
    pub feedback: &'a FR,
}

impl<'a, UR, FR> GetProfile<'a, UR, FR>
where
    UR: UserRepository + ?Sized,
    FR: FeedbackRepository + ?Sized,
{
    pub async fn execute(&self, username: &str) -> anyhow::Result<Option<UserProfileDto>> {
        let Some(user) = self.users.find_by_username(username).await? else {
            return Ok(None);
        };
        let feedback = self.feedback.list_for_user(&user.username).await?;
        Ok(Some(UserProfileDto { user, feedback }))
    }
}
