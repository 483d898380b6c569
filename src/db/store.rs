//! Postgres-backed `ContestStore`

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::{
    db::repositories::{ContestRepository, EntryRepository, TrainingRepository},
    error::AppResult,
    models::{CompletedActivity, Contest, ContestEntry, ContestPhase},
    scoring::store::{ContestStore, EntryScores},
};

/// Delegates every store operation to the repositories
#[derive(Clone)]
pub struct PgContestStore {
    pool: PgPool,
}

impl PgContestStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContestStore for PgContestStore {
    async fn find_contest(&self, contest_id: Uuid) -> AppResult<Option<Contest>> {
        ContestRepository::find_by_id(&self.pool, &contest_id).await
    }

    async fn list_contests_due_for_preselection(
        &self,
        now: DateTime<Utc>,
        only: Option<Uuid>,
    ) -> AppResult<Vec<Contest>> {
        ContestRepository::list_due_for_preselection(&self.pool, now, only.as_ref()).await
    }

    async fn update_contest_phase(&self, contest_id: Uuid, phase: ContestPhase) -> AppResult<()> {
        let advanced = ContestRepository::advance_phase(&self.pool, &contest_id, phase).await?;
        if !advanced {
            debug!(contest_id = %contest_id, %phase, "Contest already at or past phase");
        }
        Ok(())
    }

    async fn find_entry(&self, contest_id: Uuid, user_id: Uuid) -> AppResult<Option<ContestEntry>> {
        EntryRepository::find(&self.pool, &contest_id, &user_id).await
    }

    async fn list_entries(&self, contest_id: Uuid) -> AppResult<Vec<ContestEntry>> {
        EntryRepository::list_by_contest(&self.pool, &contest_id).await
    }

    async fn upsert_entry_terms(
        &self,
        contest_id: Uuid,
        user_id: Uuid,
        accepted_at: DateTime<Utc>,
    ) -> AppResult<ContestEntry> {
        EntryRepository::upsert_terms(&self.pool, &contest_id, &user_id, accepted_at).await
    }

    async fn update_entry_scores(&self, entry_id: Uuid, scores: EntryScores) -> AppResult<()> {
        EntryRepository::update_scores(&self.pool, &entry_id, scores).await
    }

    async fn update_entry_rank(&self, entry_id: Uuid, rank: i32) -> AppResult<()> {
        EntryRepository::update_rank(&self.pool, &entry_id, rank).await
    }

    async fn update_entry_video(
        &self,
        entry_id: Uuid,
        video_url: &str,
        uploaded_at: DateTime<Utc>,
    ) -> AppResult<()> {
        EntryRepository::update_video(&self.pool, &entry_id, video_url, uploaded_at).await
    }

    async fn reset_preselection(&self, contest_id: Uuid) -> AppResult<()> {
        EntryRepository::reset_preselection(&self.pool, &contest_id).await
    }

    async fn mark_preselected(
        &self,
        contest_id: Uuid,
        max_rank: i32,
        at: DateTime<Utc>,
    ) -> AppResult<u64> {
        EntryRepository::mark_preselected(&self.pool, &contest_id, max_rank, at).await
    }

    async fn current_plan_id(&self, user_id: Uuid) -> AppResult<Option<Uuid>> {
        let profile = TrainingRepository::find_profile(&self.pool, &user_id).await?;
        Ok(profile.and_then(|p| p.current_plan_id))
    }

    async fn list_plan_week_ids(&self, plan_id: Uuid) -> AppResult<Vec<Uuid>> {
        TrainingRepository::list_week_ids(&self.pool, &plan_id).await
    }

    async fn list_scorable_activity_ids(&self, week_ids: &[Uuid]) -> AppResult<Vec<Uuid>> {
        TrainingRepository::list_scorable_activity_ids(&self.pool, week_ids).await
    }

    async fn list_completed_activities(
        &self,
        user_id: Uuid,
        activity_ids: &[Uuid],
    ) -> AppResult<Vec<CompletedActivity>> {
        TrainingRepository::list_completed(&self.pool, &user_id, activity_ids).await
    }
}
