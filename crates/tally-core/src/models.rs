use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// How often a task is expected to recur. One-off tasks use `None`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    None,
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frequency::Daily => write!(f, "daily"),
            Frequency::Weekly => write!(f, "weekly"),
            Frequency::None => write!(f, "none"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid frequency: {0}")]
pub struct ParseFrequencyError(String);

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "none" | "once" => Ok(Frequency::None),
            _ => Err(ParseFrequencyError(s.to_string())),
        }
    }
}

/// Why a ledger event was recorded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LedgerCause {
    TaskCompletion,
    TaskMissed,
}

impl std::fmt::Display for LedgerCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerCause::TaskCompletion => write!(f, "task_completion"),
            LedgerCause::TaskMissed => write!(f, "task_missed"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    #[serde(with = "uuid::serde::compact")]
    pub id: Uuid,
    pub username: String,
    /// IANA timezone name (e.g., "Europe/Berlin")
    pub timezone: String,
    /// Aggregate score. Reconciles against the ledger event sum; mutated
    /// only through atomic increments at the store.
    pub score: i64,
    pub created_at: DateTime<Utc>,
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: Uuid::now_v7(),
            username: String::new(),
            timezone: "UTC".to_string(),
            score: 0,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub frequency: Frequency,
    pub is_active: bool,
    /// Penalty watermark: the most recent closed bucket already evaluated
    /// for a missed-period penalty. Monotonically non-decreasing; advanced
    /// only by settlement.
    pub last_penalized_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Task {
    fn default() -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id: Uuid::now_v7(),
            title: String::new(),
            frequency: Frequency::None,
            is_active: true,
            last_penalized_on: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

/// One completion of a task, attributed to a calendar bucket.
/// At most one row exists per (task_id, completed_on).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TaskCompletion {
    pub id: Uuid,
    pub task_id: Uuid,
    pub user_id: Uuid,
    /// The day or week-start bucket this completion counts toward.
    pub completed_on: NaiveDate,
    /// The raw instant the completion was reported at.
    pub completed_at: DateTime<Utc>,
    pub points_awarded: i64,
    pub streak_after: i64,
}

/// Append-only audit record of a score delta. Never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LedgerEvent {
    pub id: Uuid,
    pub user_id: Uuid,
    pub delta: i64,
    pub cause: LedgerCause,
    pub task_id: Option<Uuid>,
    /// For penalties, the closed bucket the penalty refers to.
    pub bucket: Option<NaiveDate>,
    /// Free-form JSON context (frequency, timezone).
    pub meta: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewTaskData {
    pub user_id: Uuid,
    pub title: String,
    pub frequency: Option<Frequency>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTaskData {
    pub title: Option<String>,
    pub frequency: Option<Frequency>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct NewLedgerEvent {
    pub user_id: Uuid,
    pub delta: i64,
    pub cause: LedgerCause,
    pub task_id: Option<Uuid>,
    pub bucket: Option<NaiveDate>,
    pub meta: Option<serde_json::Value>,
}

/// Result of recording a completion.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionReceipt {
    #[serde(with = "uuid::serde::compact")]
    pub completion_id: Uuid,
    pub points_awarded: i64,
    pub streak_after: i64,
}

/// Result of a settlement run.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SettlementReport {
    /// The most recently closed daily bucket (yesterday, local).
    pub daily_bucket: NaiveDate,
    /// The most recently closed weekly bucket (Monday of the prior ISO week).
    pub weekly_bucket: NaiveDate,
    pub penalized_daily: u32,
    pub penalized_weekly: u32,
}

/// Dashboard row: a task with its current-period completion state.
#[derive(Debug, Clone)]
pub struct TodayItem {
    pub task: Task,
    /// Whether the current bucket already has a completion.
    pub completed_for_period: bool,
    /// The streak a completion right now would record.
    pub streak_if_completed: i64,
}

/// A ledger event joined with its task title for display.
#[derive(Debug, Clone, FromRow)]
pub struct FeedItem {
    pub id: Uuid,
    pub delta: i64,
    pub cause: LedgerCause,
    pub task_title: Option<String>,
    pub created_at: DateTime<Utc>,
}
