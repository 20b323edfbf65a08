pub mod feedback_repository_sqlx;
pub mod health_probe_sqlx;
pub mod user_repository_sqlx;
