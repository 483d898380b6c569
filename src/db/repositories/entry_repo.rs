//! Contest entry repository

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppResult, models::ContestEntry, scoring::EntryScores};

/// Repository for contest entry database operations
pub struct EntryRepository;

impl EntryRepository {
    /// Find the entry of a user in a contest
    pub async fn find(
        pool: &PgPool,
        contest_id: &Uuid,
        user_id: &Uuid,
    ) -> AppResult<Option<ContestEntry>> {
        let entry = sqlx::query_as::<_, ContestEntry>(
            r#"SELECT * FROM contest_entries WHERE contest_id = $1 AND user_id = $2"#,
        )
        .bind(contest_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(entry)
    }

    /// All entries of a contest in standings order (score desc, enrollment asc)
    pub async fn list_by_contest(pool: &PgPool, contest_id: &Uuid) -> AppResult<Vec<ContestEntry>> {
        let entries = sqlx::query_as::<_, ContestEntry>(
            r#"
            SELECT * FROM contest_entries
            WHERE contest_id = $1
            ORDER BY score DESC, created_at ASC, id ASC
            "#,
        )
        .bind(contest_id)
        .fetch_all(pool)
        .await?;

        Ok(entries)
    }

    /// Create the entry or refresh its terms acceptance
    pub async fn upsert_terms(
        pool: &PgPool,
        contest_id: &Uuid,
        user_id: &Uuid,
        accepted_at: DateTime<Utc>,
    ) -> AppResult<ContestEntry> {
        let entry = sqlx::query_as::<_, ContestEntry>(
            r#"
            INSERT INTO contest_entries (contest_id, user_id, terms_accepted, terms_accepted_at)
            VALUES ($1, $2, TRUE, $3)
            ON CONFLICT (contest_id, user_id) DO UPDATE
            SET terms_accepted = TRUE,
                terms_accepted_at = EXCLUDED.terms_accepted_at
            RETURNING *
            "#,
        )
        .bind(contest_id)
        .bind(user_id)
        .bind(accepted_at)
        .fetch_one(pool)
        .await?;

        Ok(entry)
    }

    /// Persist recomputed percentages and score
    pub async fn update_scores(pool: &PgPool, id: &Uuid, scores: EntryScores) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE contest_entries
            SET completion_percent = $2, photo_percent = $3, score = $4
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(scores.completion_percent)
        .bind(scores.photo_percent)
        .bind(scores.score)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Persist a rank
    pub async fn update_rank(pool: &PgPool, id: &Uuid, rank: i32) -> AppResult<()> {
        sqlx::query(r#"UPDATE contest_entries SET rank = $2 WHERE id = $1"#)
            .bind(id)
            .bind(rank)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Record an uploaded video
    pub async fn update_video(
        pool: &PgPool,
        id: &Uuid,
        video_url: &str,
        uploaded_at: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE contest_entries
            SET video_url = $2, video_uploaded_at = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(video_url)
        .bind(uploaded_at)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Clear rank and preselection marks for a whole contest
    pub async fn reset_preselection(pool: &PgPool, contest_id: &Uuid) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE contest_entries
            SET is_preselected = FALSE, preselected_at = NULL, rank = NULL
            WHERE contest_id = $1
            "#,
        )
        .bind(contest_id)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Mark entries ranked at or above `max_rank` as preselected
    pub async fn mark_preselected(
        pool: &PgPool,
        contest_id: &Uuid,
        max_rank: i32,
        at: DateTime<Utc>,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE contest_entries
            SET is_preselected = TRUE, preselected_at = $3
            WHERE contest_id = $1 AND rank IS NOT NULL AND rank <= $2
            "#,
        )
        .bind(contest_id)
        .bind(max_rank)
        .bind(at)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }
}
