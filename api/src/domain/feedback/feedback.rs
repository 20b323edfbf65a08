pub const TITLE_MAX_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub id: i32,
    pub title: String,
    pub content: String,
    /// Owning user; `None` once detached from an account.
    pub username: Option<String>,
}

impl Feedback {
    pub fn is_owned_by(&self, username: &str) -> bool {
        self.username.as_deref() == Some(username)
    }
}

/// Fields of a feedback row that is not yet stored.
#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub title: String,
    pub content: String,
    pub username: Option<String>,
}
