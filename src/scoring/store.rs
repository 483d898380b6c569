//! Data-store contract consumed by the contest pipeline

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{CompletedActivity, Contest, ContestEntry, ContestPhase},
};

/// Computed percentages written back onto an entry
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct EntryScores {
    pub completion_percent: f64,
    pub photo_percent: f64,
    pub score: f64,
}

/// Read and write operations the scoring, ranking and enrollment
/// procedures perform against the shared store.
///
/// Every call is an independent round trip; implementations provide no
/// isolation across calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContestStore: Send + Sync {
    // Contests

    async fn find_contest(&self, contest_id: Uuid) -> AppResult<Option<Contest>>;

    /// Active contests in accumulation whose end date is at or before `now`,
    /// optionally narrowed to a single contest.
    async fn list_contests_due_for_preselection(
        &self,
        now: DateTime<Utc>,
        only: Option<Uuid>,
    ) -> AppResult<Vec<Contest>>;

    async fn update_contest_phase(&self, contest_id: Uuid, phase: ContestPhase) -> AppResult<()>;

    // Entries

    async fn find_entry(&self, contest_id: Uuid, user_id: Uuid) -> AppResult<Option<ContestEntry>>;

    async fn list_entries(&self, contest_id: Uuid) -> AppResult<Vec<ContestEntry>>;

    /// Insert the entry or, if (contest, user) already exists, only refresh
    /// its terms acceptance.
    async fn upsert_entry_terms(
        &self,
        contest_id: Uuid,
        user_id: Uuid,
        accepted_at: DateTime<Utc>,
    ) -> AppResult<ContestEntry>;

    async fn update_entry_scores(&self, entry_id: Uuid, scores: EntryScores) -> AppResult<()>;

    async fn update_entry_rank(&self, entry_id: Uuid, rank: i32) -> AppResult<()>;

    async fn update_entry_video(
        &self,
        entry_id: Uuid,
        video_url: &str,
        uploaded_at: DateTime<Utc>,
    ) -> AppResult<()>;

    /// Clear rank and preselection marks on every entry of the contest
    async fn reset_preselection(&self, contest_id: Uuid) -> AppResult<()>;

    /// Mark every entry ranked at or above `max_rank` as preselected,
    /// returning how many were marked.
    async fn mark_preselected(
        &self,
        contest_id: Uuid,
        max_rank: i32,
        at: DateTime<Utc>,
    ) -> AppResult<u64>;

    // Training progress

    async fn current_plan_id(&self, user_id: Uuid) -> AppResult<Option<Uuid>>;

    async fn list_plan_week_ids(&self, plan_id: Uuid) -> AppResult<Vec<Uuid>>;

    /// Activities under the given weeks whose type is not rest
    async fn list_scorable_activity_ids(&self, week_ids: &[Uuid]) -> AppResult<Vec<Uuid>>;

    /// Completed logs of the user restricted to `activity_ids`
    async fn list_completed_activities(
        &self,
        user_id: Uuid,
        activity_ids: &[Uuid],
    ) -> AppResult<Vec<CompletedActivity>>;
}
