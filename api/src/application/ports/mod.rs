pub mod feedback_repository;
pub mod health_probe;
pub mod password_hasher;
pub mod user_repository;
