//! Contest service

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::ContestRepository,
    error::{AppError, AppResult},
    handlers::contests::response::{ContestResponse, EntryResponse, LeaderboardResponse, LeaderboardRow},
    models::{Contest, ContestPhase},
    scoring::{self, ContestStore, PreselectionReport, StandingsReport},
};

/// Contest service for business logic
pub struct ContestService;

impl ContestService {
    /// List active contests
    pub async fn list_contests(pool: &PgPool) -> AppResult<Vec<ContestResponse>> {
        let contests = ContestRepository::list_active(pool).await?;
        Ok(contests.into_iter().map(ContestResponse::from).collect())
    }

    /// Get contest by ID
    pub async fn get_contest(pool: &PgPool, id: &Uuid) -> AppResult<ContestResponse> {
        Self::find_contest(pool, id).await.map(ContestResponse::from)
    }

    async fn find_contest(pool: &PgPool, id: &Uuid) -> AppResult<Contest> {
        ContestRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Contest not found".to_string()))
    }

    /// Get leaderboard, ranked entries first
    pub async fn get_leaderboard(
        pool: &PgPool,
        contest_id: &Uuid,
        page: u32,
        per_page: u32,
    ) -> AppResult<LeaderboardResponse> {
        let contest = Self::find_contest(pool, contest_id).await?;

        let offset = i64::from(page.saturating_sub(1)) * i64::from(per_page);
        let limit = i64::from(per_page);

        let entries = sqlx::query_as::<_, LeaderboardRow>(
            r#"
            SELECT
                e.user_id,
                p.display_name,
                e.rank,
                e.score,
                e.completion_percent,
                e.photo_percent,
                e.is_preselected,
                (e.video_url IS NOT NULL) AS has_video
            FROM contest_entries e
            LEFT JOIN user_profiles p ON p.id = e.user_id
            WHERE e.contest_id = $1
            ORDER BY e.rank ASC NULLS LAST, e.created_at ASC, e.id ASC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(contest_id)
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM contest_entries WHERE contest_id = $1"#,
        )
        .bind(contest_id)
        .fetch_one(pool)
        .await?;

        Ok(LeaderboardResponse {
            contest_id: *contest_id,
            phase: contest.current_phase,
            entries,
            total,
            page,
            per_page,
        })
    }

    /// Refresh standings, then return the caller's entry
    pub async fn get_my_entry(
        store: &dyn ContestStore,
        contest_id: &Uuid,
        user_id: &Uuid,
    ) -> AppResult<EntryResponse> {
        let contest = store
            .find_contest(*contest_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Contest not found".to_string()))?;

        if store.find_entry(*contest_id, *user_id).await?.is_none() {
            return Err(AppError::NotFound("Not enrolled in this contest".to_string()));
        }

        scoring::refresh_standings_after_action(store, &contest).await;

        let entry = store
            .find_entry(*contest_id, *user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Not enrolled in this contest".to_string()))?;

        Ok(EntryResponse::new(entry, contest.current_phase))
    }

    /// Enroll the caller
    pub async fn enroll(
        store: &dyn ContestStore,
        contest_id: &Uuid,
        user_id: &Uuid,
    ) -> AppResult<EntryResponse> {
        let entry = scoring::enroll(store, *contest_id, *user_id, Utc::now()).await?;
        let phase = Self::current_phase(store, contest_id).await?;
        Ok(EntryResponse::new(entry, phase))
    }

    /// Record the caller's uploaded video
    pub async fn submit_video(
        store: &dyn ContestStore,
        contest_id: &Uuid,
        user_id: &Uuid,
        video_url: &str,
    ) -> AppResult<EntryResponse> {
        let entry =
            scoring::submit_video(store, *contest_id, *user_id, video_url, Utc::now()).await?;
        let phase = Self::current_phase(store, contest_id).await?;
        Ok(EntryResponse::new(entry, phase))
    }

    /// Score-then-rank for one contest on administrative request
    pub async fn recalculate(store: &dyn ContestStore, contest_id: &Uuid) -> AppResult<StandingsReport> {
        let contest = store
            .find_contest(*contest_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Contest not found".to_string()))?;

        if !contest.current_phase.accepts_standings_refresh() {
            return Err(AppError::Conflict(format!(
                "Standings are frozen in phase {}",
                contest.current_phase
            )));
        }

        scoring::refresh_standings(store, contest.id).await
    }

    /// Preselection transition on administrative request
    pub async fn run_preselection(
        store: &dyn ContestStore,
        contest_id: Option<Uuid>,
    ) -> AppResult<PreselectionReport> {
        scoring::run_preselection(store, Utc::now(), contest_id).await
    }

    async fn current_phase(
        store: &dyn ContestStore,
        contest_id: &Uuid,
    ) -> AppResult<ContestPhase> {
        store
            .find_contest(*contest_id)
            .await?
            .map(|c| c.current_phase)
            .ok_or_else(|| AppError::NotFound("Contest not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::memory_store::MemoryStore;

    #[tokio::test]
    async fn test_my_entry_requires_enrollment() {
        let store = MemoryStore::new();
        let contest = store.add_contest(|_| {});
        let user = store.add_user(None);

        let result = ContestService::get_my_entry(&store, &contest, &user).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_my_entry_reflects_fresh_progress() {
        let store = MemoryStore::new();
        let contest = store.add_contest(|_| {});
        let plan = store.add_plan(&[10]);
        let user = store.add_user(Some(plan));
        store.add_entry(contest, user);
        store.complete_activities(user, plan, 10, 5);

        let entry = ContestService::get_my_entry(&store, &contest, &user).await.unwrap();
        assert_eq!(entry.completion_percent, 100.0);
        assert_eq!(entry.photo_percent, 50.0);
        assert_eq!(entry.score, 75.0);
        assert_eq!(entry.rank, Some(1));
        assert_eq!(entry.phase, ContestPhase::Accumulation);
    }

    #[tokio::test]
    async fn test_recalculate_refuses_frozen_contests() {
        let store = MemoryStore::new();
        let contest = store.add_contest(|c| c.current_phase = ContestPhase::WinnersAnnounced);

        let result = ContestService::recalculate(&store, &contest).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));

        let missing = ContestService::recalculate(&store, &Uuid::new_v4()).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }
}
