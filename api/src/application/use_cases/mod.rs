pub mod auth;
pub mod feedback;
pub mod users;
