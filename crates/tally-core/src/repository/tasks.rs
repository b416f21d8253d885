use crate::error::CoreError;
use crate::models::{Frequency, NewTaskData, Task, UpdateTaskData};
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

const TITLE_MIN: usize = 2;
const TITLE_MAX: usize = 80;

fn validate_title(title: &str) -> Result<(), CoreError> {
    let len = title.chars().count();
    if !(TITLE_MIN..=TITLE_MAX).contains(&len) {
        return Err(CoreError::InvalidInput(format!(
            "Task title must be {}-{} characters, got {}",
            TITLE_MIN, TITLE_MAX, len
        )));
    }
    Ok(())
}

#[async_trait]
impl super::TaskStore for SqliteRepository {
    async fn add_task(&self, data: NewTaskData) -> Result<Task, CoreError> {
        validate_title(&data.title)?;

        let task = Task {
            id: Uuid::now_v7(),
            user_id: data.user_id,
            title: data.title,
            frequency: data.frequency.unwrap_or(Frequency::None),
            is_active: true,
            last_penalized_on: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        sqlx::query(
            r#"INSERT INTO tasks (id, user_id, title, frequency, is_active, last_penalized_on, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"#,
        )
        .bind(task.id)
        .bind(task.user_id)
        .bind(&task.title)
        .bind(task.frequency)
        .bind(task.is_active)
        .bind(task.last_penalized_on)
        .bind(task.created_at)
        .bind(task.updated_at)
        .execute(self.pool())
        .await?;

        Ok(task)
    }

    async fn find_task_by_id(&self, id: Uuid) -> Result<Option<Task>, CoreError> {
        let task = sqlx::query_as("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(task)
    }

    async fn find_tasks_by_short_id_prefix(&self, short_id: &str) -> Result<Vec<Task>, CoreError> {
        // Ids are stored as 16-byte blobs; compare against their hex form.
        let mut pattern = short_id.replace('-', "").to_uppercase();
        pattern.push('%');

        let tasks: Vec<Task> = sqlx::query_as("SELECT * FROM tasks WHERE hex(id) LIKE $1")
            .bind(pattern)
            .fetch_all(self.pool())
            .await?;
        Ok(tasks)
    }

    async fn update_task(&self, id: Uuid, data: UpdateTaskData) -> Result<Task, CoreError> {
        let mut task = self
            .find_task_by_id(id)
            .await?
            .ok_or_else(|| CoreError::TaskNotFound(id.to_string()))?;

        if let Some(title) = data.title {
            validate_title(&title)?;
            task.title = title;
        }
        if let Some(frequency) = data.frequency {
            task.frequency = frequency;
        }
        if let Some(is_active) = data.is_active {
            task.is_active = is_active;
        }
        task.updated_at = Utc::now();

        sqlx::query(
            "UPDATE tasks SET title = $1, frequency = $2, is_active = $3, updated_at = $4 WHERE id = $5",
        )
        .bind(&task.title)
        .bind(task.frequency)
        .bind(task.is_active)
        .bind(task.updated_at)
        .bind(task.id)
        .execute(self.pool())
        .await?;

        Ok(task)
    }

    async fn delete_task(&self, id: Uuid) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::TaskNotFound(id.to_string()));
        }
        Ok(())
    }

    async fn list_tasks(&self, user_id: Uuid) -> Result<Vec<Task>, CoreError> {
        let tasks = sqlx::query_as("SELECT * FROM tasks WHERE user_id = $1 ORDER BY created_at")
            .bind(user_id)
            .fetch_all(self.pool())
            .await?;
        Ok(tasks)
    }

    async fn list_active_tasks(
        &self,
        user_id: Uuid,
        frequency: Frequency,
    ) -> Result<Vec<Task>, CoreError> {
        let tasks = sqlx::query_as(
            "SELECT * FROM tasks WHERE user_id = $1 AND is_active = 1 AND frequency = $2 ORDER BY created_at",
        )
        .bind(user_id)
        .bind(frequency)
        .fetch_all(self.pool())
        .await?;
        Ok(tasks)
    }

    async fn advance_watermark(&self, task_id: Uuid, bucket: NaiveDate) -> Result<(), CoreError> {
        // The guard keeps the watermark monotonic; an already-ahead row is
        // left untouched and that is not an error.
        sqlx::query(
            r#"UPDATE tasks SET last_penalized_on = $1, updated_at = $2
            WHERE id = $3 AND (last_penalized_on IS NULL OR last_penalized_on < $1)"#,
        )
        .bind(bucket)
        .bind(Utc::now())
        .bind(task_id)
        .execute(self.pool())
        .await?;
        Ok(())
    }
}
