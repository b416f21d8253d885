use crate::error::CoreError;
use crate::models::{FeedItem, NewLedgerEvent, TaskCompletion};
use crate::repository::users::is_unique_violation;
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

#[async_trait]
impl super::CompletionStore for SqliteRepository {
    async fn insert_completion(&self, completion: &TaskCompletion) -> Result<Uuid, CoreError> {
        let result = sqlx::query(
            r#"INSERT INTO task_completions (id, task_id, user_id, completed_on, completed_at, points_awarded, streak_after)
            VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
        )
        .bind(completion.id)
        .bind(completion.task_id)
        .bind(completion.user_id)
        .bind(completion.completed_on)
        .bind(completion.completed_at)
        .bind(completion.points_awarded)
        .bind(completion.streak_after)
        .execute(self.pool())
        .await;

        match result {
            Ok(_) => Ok(completion.id),
            Err(e) if is_unique_violation(&e) => Err(CoreError::DuplicateCompletion),
            Err(e) => Err(e.into()),
        }
    }

    async fn last_completion_bucket(
        &self,
        task_id: Uuid,
    ) -> Result<Option<NaiveDate>, CoreError> {
        let bucket = sqlx::query_scalar(
            "SELECT completed_on FROM task_completions WHERE task_id = $1 ORDER BY completed_on DESC LIMIT 1",
        )
        .bind(task_id)
        .fetch_optional(self.pool())
        .await?;
        Ok(bucket)
    }

    async fn has_completion_in_bucket(
        &self,
        task_id: Uuid,
        bucket: NaiveDate,
    ) -> Result<bool, CoreError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM task_completions WHERE task_id = $1 AND completed_on = $2",
        )
        .bind(task_id)
        .bind(bucket)
        .fetch_one(self.pool())
        .await?;
        Ok(count > 0)
    }

    async fn completions_since(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<TaskCompletion>, CoreError> {
        let completions = sqlx::query_as(
            r#"SELECT * FROM task_completions
            WHERE user_id = $1 AND completed_at >= $2
            ORDER BY completed_at"#,
        )
        .bind(user_id)
        .bind(since)
        .fetch_all(self.pool())
        .await?;
        Ok(completions)
    }
}

#[async_trait]
impl super::LedgerStore for SqliteRepository {
    async fn insert_ledger_event(&self, event: NewLedgerEvent) -> Result<Uuid, CoreError> {
        let id = Uuid::now_v7();
        sqlx::query(
            r#"INSERT INTO ledger_events (id, user_id, delta, cause, task_id, bucket, meta, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"#,
        )
        .bind(id)
        .bind(event.user_id)
        .bind(event.delta)
        .bind(event.cause)
        .bind(event.task_id)
        .bind(event.bucket)
        .bind(event.meta.map(|m| m.to_string()))
        .bind(Utc::now())
        .execute(self.pool())
        .await?;
        Ok(id)
    }

    async fn insert_penalty_event(&self, event: NewLedgerEvent) -> Result<bool, CoreError> {
        let result = sqlx::query(
            r#"INSERT INTO ledger_events (id, user_id, delta, cause, task_id, bucket, meta, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"#,
        )
        .bind(Uuid::now_v7())
        .bind(event.user_id)
        .bind(event.delta)
        .bind(event.cause)
        .bind(event.task_id)
        .bind(event.bucket)
        .bind(event.meta.map(|m| m.to_string()))
        .bind(Utc::now())
        .execute(self.pool())
        .await;

        match result {
            Ok(_) => Ok(true),
            // Another settlement run won the race for this (task, bucket).
            Err(e) if is_unique_violation(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn apply_score_delta(&self, user_id: Uuid, delta: i64) -> Result<i64, CoreError> {
        let total = sqlx::query_scalar(
            "UPDATE users SET score = score + $1 WHERE id = $2 RETURNING score",
        )
        .bind(delta)
        .bind(user_id)
        .fetch_optional(self.pool())
        .await?
        .ok_or_else(|| CoreError::UserNotFound(user_id.to_string()))?;
        Ok(total)
    }

    async fn recent_ledger_events(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<FeedItem>, CoreError> {
        let items = sqlx::query_as(
            r#"SELECT e.id, e.delta, e.cause, t.title AS task_title, e.created_at
            FROM ledger_events e
            LEFT JOIN tasks t ON e.task_id = t.id
            WHERE e.user_id = $1
            ORDER BY e.created_at DESC
            LIMIT $2"#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(self.pool())
        .await?;
        Ok(items)
    }
}
