use crate::application::ports::password_hasher::PasswordHashPort;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::User;

pub struct Login<'a, R, H>
where
    R: UserRepository + ?Sized,
    H: PasswordHashPort + ?Sized,
{
    pub repo: &'a R,
    pub hasher: &'a H,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Authenticated(User),
    UnknownUser,
    BadPassword,
}

impl AuthOutcome {
    /// Collapses both failure modes into `None`.
    pub fn into_user(self) -> Option<User> {
        match self {
            AuthOutcome::Authenticated(user) => Some(user),
            AuthOutcome::UnknownUser | AuthOutcome::BadPassword => None,
        }
    }
}

impl<'a, R, H> Login<'a, R, H>
where
    R: UserRepository + ?Sized,
    H: PasswordHashPort + ?Sized,
{
    pub async fn execute(&self, req: &LoginRequest) -> anyhow::Result<AuthOutcome> {
        let user = match self.repo.find_by_username(&req.username).await? {
            Some(u) => u,
            None => {
                self.hasher.verify_decoy(&req.password);
                tracing::debug!(username = %req.username, "login_unknown_user");
                return Ok(AuthOutcome::UnknownUser);
            }
        };
        if self.hasher.verify(&user.password_hash, &req.password)? {
            Ok(AuthOutcome::Authenticated(user))
        } else {
            tracing::debug!(username = %req.username, "login_bad_password");
            Ok(AuthOutcome::BadPassword)
        }
    }
}
