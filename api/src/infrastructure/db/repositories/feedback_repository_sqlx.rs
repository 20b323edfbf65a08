use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::feedback_repository::FeedbackRepository;
use crate::domain::feedback::feedback::{Feedback, NewFeedback};
use crate::infrastructure::db::PgPool;

pub struct SqlxFeedbackRepository {
    pub pool: PgPool,
}

impl SqlxFeedbackRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn feedback_from_row(r: &PgRow) -> Feedback {
    Feedback {
        id: r.get("id"),
        title: r.get("title"),
        content: r.get("content"),
        username: r.get("username"),
    }
}

#[async_trait]
impl FeedbackRepository for SqlxFeedbackRepository {
    async fn create(&self, new: &NewFeedback) -> anyhow::Result<Option<Feedback>> {
        let res = sqlx::query(
            r#"INSERT INTO feedback (title, content, username) VALUES ($1, $2, $3)
               RETURNING id, title, content, username"#,
        )
        .bind(&new.title)
        .bind(&new.content)
        .bind(new.username.as_deref())
        .fetch_one(&self.pool)
        .await;
        match res {
            Ok(row) => Ok(Some(feedback_from_row(&row))),
            Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => {
                tracing::debug!(username = ?new.username, "feedback_owner_missing");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get(&self, id: i32) -> anyhow::Result<Option<Feedback>> {
        let row = sqlx::query(r#"SELECT id, title, content, username FROM feedback WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(feedback_from_row))
    }

    async fn list_for_user(&self, username: &str) -> anyhow::Result<Vec<Feedback>> {
        let rows = sqlx::query(
            r#"SELECT id, title, content, username FROM feedback
               WHERE username = $1 ORDER BY id ASC"#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(feedback_from_row).collect())
    }

    async fn update(
        &self,
        id: i32,
        title: &str,
        content: &str,
    ) -> anyhow::Result<Option<Feedback>> {
        let row = sqlx::query(
            r#"UPDATE feedback SET title = $2, content = $3 WHERE id = $1
               RETURNING id, title, content, username"#,
        )
        .bind(id)
        .bind(title)
        .bind(content)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(feedback_from_row))
    }

    async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM feedback WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
