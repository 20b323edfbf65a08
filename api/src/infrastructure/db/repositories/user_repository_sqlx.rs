use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::user_repository::{
    StoreConflict, UniqueField, UserRepository,
};
use crate::domain::users::user::User;
use crate::infrastructure::db::PgPool;

/// Name of the unique constraint on `users.email` in the initial migration.
const EMAIL_CONSTRAINT: &str = "users_email_key";

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(r: &PgRow) -> User {
    User {
        username: r.get("username"),
        password_hash: r.get("password"),
        email: r.get("email"),
        first_name: r.get("first_name"),
        last_name: r.get("last_name"),
    }
}

/// The users table has two unique keys: the primary key and the email constraint.
fn conflict_field(constraint: Option<&str>) -> UniqueField {
    match constraint {
        Some(EMAIL_CONSTRAINT) => UniqueField::Email,
        _ => UniqueField::Username,
    }
}

fn map_insert_error(err: sqlx::Error) -> anyhow::Error {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            let field = conflict_field(db.constraint());
            return StoreConflict { field }.into();
        }
    }
    err.into()
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn insert_user(&self, user: &User) -> anyhow::Result<User> {
        let row = sqlx::query(
            r#"INSERT INTO users (username, password, email, first_name, last_name)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING username, password, email, first_name, last_name"#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;
        Ok(user_from_row(&row))
    }

    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(
            r#"SELECT username, password, email, first_name, last_name
               FROM users WHERE username = $1"#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(user_from_row))
    }

    async fn email_exists(&self, email: &str) -> anyhow::Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn delete_user(&self, username: &str) -> anyhow::Result<bool> {
        // feedback rows go with it via ON DELETE CASCADE
        let res = sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(username)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_constraint_maps_to_email_conflict() {
        assert_eq!(conflict_field(Some("users_email_key")), UniqueField::Email);
    }

    #[test]
    fn other_unique_violations_are_username_conflicts() {
        assert_eq!(conflict_field(Some("users_pkey")), UniqueField::Username);
        assert_eq!(conflict_field(None), UniqueField::Username);
    }

    #[test]
    fn non_database_errors_pass_through() {
        let err = map_insert_error(sqlx::Error::RowNotFound);
        assert!(err.downcast_ref::<StoreConflict>().is_none());
    }
}
