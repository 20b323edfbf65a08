use crate::application::forms::ValidatedForm;
use crate::application::ports::password_hasher::PasswordHashPort;
use crate::application::ports::user_repository::{StoreConflict, UniqueField, UserRepository};
use crate::domain::users::user::User;

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<ValidatedForm> for RegisterRequest {
    fn from(mut form: ValidatedForm) -> Self {
        Self {
            username: form.take("username"),
            password: form.take("password"),
            email: form.take("email"),
            first_name: form.take("first_name"),
            last_name: form.take("last_name"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("{} is already taken", .0.as_str())]
    Conflict(UniqueField),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Hashes the password and builds the user record. Nothing is persisted.
pub fn register_user<H: PasswordHashPort + ?Sized>(
    hasher: &H,
    req: &RegisterRequest,
) -> anyhow::Result<User> {
    let password_hash = hasher.hash(&req.password)?;
    Ok(User {
        username: req.username.clone(),
        password_hash,
        email: req.email.clone(),
        first_name: req.first_name.clone(),
        last_name: req.last_name.clone(),
    })
}

pub struct Register<'a, R, H>
where
    R: UserRepository + ?Sized,
    H: PasswordHashPort + ?Sized,
{
    pub repo: &'a R,
    pub hasher: &'a H,
}

impl<'a, R, H> Register<'a, R, H>
where
    R: UserRepository + ?Sized,
    H: PasswordHashPort + ?Sized,
{
    pub async fn execute(&self, req: &RegisterRequest) -> Result<User, RegisterError> {
        if self.repo.find_by_username(&req.username).await?.is_some() {
            return Err(RegisterError::Conflict(UniqueField::Username));
        }
        if self.repo.email_exists(&req.email).await? {
            return Err(RegisterError::Conflict(UniqueField::Email));
        }
        let user = register_user(self.hasher, req)?;
        // A concurrent registration can still win between the checks and the
        // insert; the store's constraint is authoritative.
        match self.repo.insert_user(&user).await {
            Ok(user) => {
                tracing::info!(username = %user.username, "user_registered");
                Ok(user)
            }
            Err(err) => match err.downcast_ref::<StoreConflict>() {
                Some(conflict) => Err(RegisterError::Conflict(conflict.field)),
                None => Err(err.into()),
            },
        }
    }
}
