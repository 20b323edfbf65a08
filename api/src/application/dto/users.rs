use crate::domain::feedback::feedback::Feedback;
use crate::domain::users::user::User;

#[derive(Debug, Clone)]
pub struct UserProfileDto {
    pub user: User,
    pub feedback: Vec<Feedback>,
}
