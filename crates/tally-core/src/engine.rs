use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde_json::json;
use uuid::Uuid;

use crate::calendar;
use crate::error::CoreError;
use crate::models::{
    CompletionReceipt, Frequency, LedgerCause, NewLedgerEvent, SettlementReport, Task,
    TaskCompletion, TodayItem,
};
use crate::repository::Repository;
use crate::scoring::{self, ScoringPolicy};
use crate::timezone::resolve_timezone;

/// Orchestrates completion recording and missed-period settlement on top of
/// the repository. Holds no state beyond the configured scoring policy; all
/// idempotency guarantees live at the store (unique constraints and the
/// per-task penalty watermark).
pub struct ScoreEngine<R: Repository> {
    repo: R,
    policy: ScoringPolicy,
}

impl<R: Repository> ScoreEngine<R> {
    pub fn new(repo: R, policy: ScoringPolicy) -> Self {
        Self { repo, policy }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn policy(&self) -> ScoringPolicy {
        self.policy
    }

    /// Record one completion of a task.
    ///
    /// The completion is attributed to the calendar bucket the instant falls
    /// in (day bucket for daily/one-off tasks, ISO week bucket for weekly
    /// ones). At most one completion can exist per (task, bucket); a second
    /// attempt surfaces `DuplicateCompletion` before any score is touched.
    ///
    /// The ledger insert and the aggregate increment are separate writes
    /// after the completion row commits. A store failure between them leaves
    /// the completion recorded; retrying the whole call is safe because the
    /// completion insert is the idempotency gate.
    pub async fn complete(
        &self,
        task_id: Uuid,
        user_id: Uuid,
        occurred_at: Option<DateTime<Utc>>,
        timezone: Option<&str>,
    ) -> Result<CompletionReceipt, CoreError> {
        let task = self
            .repo
            .find_task_by_id(task_id)
            .await?
            .ok_or_else(|| CoreError::TaskNotFound(task_id.to_string()))?;
        if task.user_id != user_id {
            return Err(CoreError::Forbidden);
        }

        let user = self
            .repo
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| CoreError::UserNotFound(user_id.to_string()))?;
        let tz = resolve_timezone(timezone, Some(&user.timezone))?;

        let occurred_at = occurred_at.unwrap_or_else(Utc::now);
        let bucket = calendar::bucket_for(task.frequency, occurred_at, tz);

        let last_bucket = self.repo.last_completion_bucket(task_id).await?;
        let streak_after = scoring::streak_after(task.frequency, last_bucket, bucket);
        let points_awarded = self.policy.award(task.frequency, streak_after);

        let completion = TaskCompletion {
            id: Uuid::now_v7(),
            task_id,
            user_id,
            completed_on: bucket,
            completed_at: occurred_at,
            points_awarded,
            streak_after,
        };
        let completion_id = self.repo.insert_completion(&completion).await?;

        self.repo
            .insert_ledger_event(NewLedgerEvent {
                user_id,
                delta: points_awarded,
                cause: LedgerCause::TaskCompletion,
                task_id: Some(task_id),
                bucket: Some(bucket),
                meta: Some(json!({ "freq": task.frequency, "tz": tz.name() })),
            })
            .await?;
        self.repo.apply_score_delta(user_id, points_awarded).await?;

        Ok(CompletionReceipt {
            completion_id,
            points_awarded,
            streak_after,
        })
    }

    /// Settle missed periods for a user: penalize every active recurring
    /// task with no completion in its most recently closed bucket, exactly
    /// once per (task, bucket).
    ///
    /// Safe to invoke at any cadence and from concurrent callers. The
    /// per-task watermark skips already-settled buckets and the store's
    /// unique penalty constraint absorbs racing inserts.
    pub async fn settle(
        &self,
        user_id: Uuid,
        timezone: Option<&str>,
    ) -> Result<SettlementReport, CoreError> {
        let user = self
            .repo
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| CoreError::UserNotFound(user_id.to_string()))?;
        let tz = resolve_timezone(timezone, Some(&user.timezone))?;

        let now = Utc::now();
        let daily_bucket = calendar::closed_day_bucket(now, tz);
        let weekly_bucket = calendar::closed_week_bucket(now, tz);

        let penalized_daily = self
            .settle_class(user_id, Frequency::Daily, daily_bucket, tz)
            .await?;
        let penalized_weekly = self
            .settle_class(user_id, Frequency::Weekly, weekly_bucket, tz)
            .await?;

        Ok(SettlementReport {
            daily_bucket,
            weekly_bucket,
            penalized_daily,
            penalized_weekly,
        })
    }

    /// Settle one frequency class against its closed bucket. A store error
    /// aborts the remainder of the class; tasks not yet reached stay
    /// unsettled and are picked up by the next invocation.
    async fn settle_class(
        &self,
        user_id: Uuid,
        frequency: Frequency,
        closed_bucket: chrono::NaiveDate,
        tz: Tz,
    ) -> Result<u32, CoreError> {
        let tasks = self.repo.list_active_tasks(user_id, frequency).await?;
        let mut penalized = 0u32;

        for task in tasks {
            if task.last_penalized_on.is_some_and(|w| w >= closed_bucket) {
                continue;
            }

            if !self
                .repo
                .has_completion_in_bucket(task.id, closed_bucket)
                .await?
            {
                let recorded = self
                    .repo
                    .insert_penalty_event(NewLedgerEvent {
                        user_id,
                        delta: self.policy.penalty(frequency),
                        cause: LedgerCause::TaskMissed,
                        task_id: Some(task.id),
                        bucket: Some(closed_bucket),
                        meta: Some(json!({ "freq": frequency, "tz": tz.name() })),
                    })
                    .await?;
                if recorded {
                    self.repo
                        .apply_score_delta(user_id, self.policy.penalty(frequency))
                        .await?;
                    penalized += 1;
                }
            }

            self.repo.advance_watermark(task.id, closed_bucket).await?;
        }

        Ok(penalized)
    }

    /// Dashboard view: every task of the user with its current-period
    /// completion state and the streak a completion right now would record.
    pub async fn today(
        &self,
        user_id: Uuid,
        timezone: Option<&str>,
    ) -> Result<Vec<TodayItem>, CoreError> {
        let user = self
            .repo
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| CoreError::UserNotFound(user_id.to_string()))?;
        let tz = resolve_timezone(timezone, Some(&user.timezone))?;
        let now = Utc::now();

        let mut items = Vec::new();
        for task in self.repo.list_tasks(user_id).await? {
            if !task.is_active {
                continue;
            }
            let item = self.today_item(task, now, tz).await?;
            items.push(item);
        }
        Ok(items)
    }

    async fn today_item(
        &self,
        task: Task,
        now: DateTime<Utc>,
        tz: Tz,
    ) -> Result<TodayItem, CoreError> {
        let bucket = calendar::bucket_for(task.frequency, now, tz);
        // One-off tasks are never "done for the period" in the dashboard;
        // the duplicate guard still applies when completing them.
        let completed_for_period = match task.frequency {
            Frequency::None => false,
            _ => self.repo.has_completion_in_bucket(task.id, bucket).await?,
        };
        let last_bucket = self.repo.last_completion_bucket(task.id).await?;
        let streak_if_completed = scoring::streak_after(task.frequency, last_bucket, bucket);

        Ok(TodayItem {
            task,
            completed_for_period,
            streak_if_completed,
        })
    }
}
