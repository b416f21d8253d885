//! # Tally Core Library
//!
//! The scoring and settlement engine behind the tally habit tracker:
//! deterministic calendar bucketing, streak continuation, point awards, an
//! idempotent completion ledger, and missed-period penalty settlement.
//!
//! ## Features
//!
//! - **Calendar Bucketing**: timezone-aware day and ISO-week buckets
//!   (weeks always start on Monday)
//! - **Streak Awards**: a continuation rule derived from the immediately
//!   preceding bucket, feeding two scoring policies (bounded reputation,
//!   unbounded XP with levels)
//! - **Idempotent Ledger**: at most one completion per (task, bucket) and
//!   at most one penalty per (task, closed bucket), enforced by store
//!   constraints and a per-task watermark
//! - **Lazy Settlement**: `settle` is an on-demand, retry-safe operation
//!   with no background scheduler
//!
//! ## Core Modules
//!
//! - [`db`]: Database connection and migration management
//! - [`models`]: Core data structures and transfer objects
//! - [`repository`]: Data access layer with Repository pattern
//! - [`calendar`]: Bucket key computation
//! - [`scoring`]: Streak evaluation and award policies
//! - [`engine`]: Completion and settlement orchestration
//! - [`timezone`]: Timezone resolution and validation
//! - [`error`]: Error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use tally_core::{
//!     db, engine::ScoreEngine, models::NewTaskData,
//!     repository::{SqliteRepository, TaskStore, UserStore},
//!     scoring::ScoringPolicy,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), tally_core::error::CoreError> {
//!     let pool = db::establish_connection("tally.db").await?;
//!     let engine = ScoreEngine::new(SqliteRepository::new(pool), ScoringPolicy::Reputation);
//!
//!     let user = engine.repo().create_user("jo", "Europe/Berlin").await?;
//!     let task = engine
//!         .repo()
//!         .add_task(NewTaskData {
//!             user_id: user.id,
//!             title: "Morning run".to_string(),
//!             frequency: Some("daily".parse().unwrap()),
//!         })
//!         .await?;
//!
//!     let receipt = engine.complete(task.id, user.id, None, None).await?;
//!     println!("+{} points, streak {}", receipt.points_awarded, receipt.streak_after);
//!
//!     Ok(())
//! }
//! ```

pub mod calendar;
pub mod db;
pub mod engine;
pub mod error;
pub mod models;
pub mod repository;
pub mod scoring;
pub mod timezone;
