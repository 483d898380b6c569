//! Contest repository

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Contest, ContestPhase},
};

/// Repository for contest database operations
pub struct ContestRepository;

impl ContestRepository {
    /// Find contest by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Contest>> {
        let contest = sqlx::query_as::<_, Contest>(r#"SELECT * FROM contests WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(contest)
    }

    /// List active contests, most recent first
    pub async fn list_active(pool: &PgPool) -> AppResult<Vec<Contest>> {
        let contests = sqlx::query_as::<_, Contest>(
            r#"SELECT * FROM contests WHERE is_active = TRUE ORDER BY start_date DESC"#,
        )
        .fetch_all(pool)
        .await?;

        Ok(contests)
    }

    /// Contests whose accumulation window has closed but are not yet preselected
    pub async fn list_due_for_preselection(
        pool: &PgPool,
        now: DateTime<Utc>,
        only: Option<&Uuid>,
    ) -> AppResult<Vec<Contest>> {
        let contests = sqlx::query_as::<_, Contest>(
            r#"
            SELECT * FROM contests
            WHERE is_active = TRUE
                AND current_phase = $1
                AND end_date <= $2
                AND ($3::uuid IS NULL OR id = $3)
            ORDER BY end_date
            "#,
        )
        .bind(ContestPhase::Accumulation)
        .bind(now)
        .bind(only)
        .fetch_all(pool)
        .await?;

        Ok(contests)
    }

    /// Move a contest forward to `phase`.
    ///
    /// Only forward moves are applied; the enum's declaration order is the
    /// phase order.
    pub async fn advance_phase(pool: &PgPool, id: &Uuid, phase: ContestPhase) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE contests
            SET current_phase = $2
            WHERE id = $1 AND current_phase < $2
            "#,
        )
        .bind(id)
        .bind(phase)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
