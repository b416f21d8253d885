use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{
    FeedItem, Frequency, NewLedgerEvent, NewTaskData, Task, TaskCompletion, UpdateTaskData, User,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

// Re-export domain modules
pub mod ledger;
pub mod tasks;
pub mod users;

// Traits are defined in this module and implemented in respective domain modules

/// Domain-specific trait for user/profile operations
#[async_trait]
pub trait UserStore {
    async fn create_user(&self, username: &str, timezone: &str) -> Result<User, CoreError>;
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, CoreError>;
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, CoreError>;
    async fn find_users(&self) -> Result<Vec<User>, CoreError>;
    async fn update_timezone(&self, id: Uuid, timezone: &str) -> Result<(), CoreError>;
}

/// Domain-specific trait for task operations
#[async_trait]
pub trait TaskStore {
    async fn add_task(&self, data: NewTaskData) -> Result<Task, CoreError>;
    async fn find_task_by_id(&self, id: Uuid) -> Result<Option<Task>, CoreError>;
    async fn find_tasks_by_short_id_prefix(&self, short_id: &str) -> Result<Vec<Task>, CoreError>;
    async fn update_task(&self, id: Uuid, data: UpdateTaskData) -> Result<Task, CoreError>;
    async fn delete_task(&self, id: Uuid) -> Result<(), CoreError>;
    async fn list_tasks(&self, user_id: Uuid) -> Result<Vec<Task>, CoreError>;
    async fn list_active_tasks(
        &self,
        user_id: Uuid,
        frequency: Frequency,
    ) -> Result<Vec<Task>, CoreError>;
    /// Advance the penalty watermark. Only ever moves it forward: a bucket
    /// at or behind the stored one leaves the row unchanged.
    async fn advance_watermark(&self, task_id: Uuid, bucket: NaiveDate) -> Result<(), CoreError>;
}

/// Domain-specific trait for completion records
#[async_trait]
pub trait CompletionStore {
    /// Insert a completion row. Fails with `DuplicateCompletion` when the
    /// (task, bucket) pair already exists.
    async fn insert_completion(&self, completion: &TaskCompletion) -> Result<Uuid, CoreError>;
    async fn last_completion_bucket(&self, task_id: Uuid)
        -> Result<Option<NaiveDate>, CoreError>;
    async fn has_completion_in_bucket(
        &self,
        task_id: Uuid,
        bucket: NaiveDate,
    ) -> Result<bool, CoreError>;
    async fn completions_since(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<TaskCompletion>, CoreError>;
}

/// Domain-specific trait for the score ledger
#[async_trait]
pub trait LedgerStore {
    async fn insert_ledger_event(&self, event: NewLedgerEvent) -> Result<Uuid, CoreError>;
    /// Insert a missed-period penalty event. Returns false when another
    /// settlement run already recorded a penalty for this (task, bucket);
    /// a losing race is a no-op, not an error.
    async fn insert_penalty_event(&self, event: NewLedgerEvent) -> Result<bool, CoreError>;
    /// Atomically add `delta` to the user's aggregate score and return the
    /// new total. Safe with respect to concurrent callers.
    async fn apply_score_delta(&self, user_id: Uuid, delta: i64) -> Result<i64, CoreError>;
    async fn recent_ledger_events(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<FeedItem>, CoreError>;
}

/// Main repository trait that composes all domain traits
#[async_trait]
pub trait Repository: UserStore + TaskStore + CompletionStore + LedgerStore + Send + Sync {}

/// SQLite implementation of the repository pattern
pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the database pool for internal use across modules
    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl Repository for SqliteRepository {}
