//! Training plan, profile and activity log repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::REST_ACTIVITY_TYPE,
    error::AppResult,
    models::{CompletedActivity, UserProfile},
};

/// Read-only access to the training data the scoring pipeline consumes
pub struct TrainingRepository;

impl TrainingRepository {
    /// Find a user profile
    pub async fn find_profile(pool: &PgPool, user_id: &Uuid) -> AppResult<Option<UserProfile>> {
        let profile = sqlx::query_as::<_, UserProfile>(
            r#"SELECT id, display_name, current_plan_id FROM user_profiles WHERE id = $1"#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(profile)
    }

    /// Week ids of a plan
    pub async fn list_week_ids(pool: &PgPool, plan_id: &Uuid) -> AppResult<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"SELECT id FROM training_weeks WHERE plan_id = $1 ORDER BY week_number"#,
        )
        .bind(plan_id)
        .fetch_all(pool)
        .await?;

        Ok(ids)
    }

    /// Non-rest activity ids under the given weeks
    pub async fn list_scorable_activity_ids(
        pool: &PgPool,
        week_ids: &[Uuid],
    ) -> AppResult<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT id FROM training_activities
            WHERE week_id = ANY($1) AND activity_type <> $2
            "#,
        )
        .bind(week_ids)
        .bind(REST_ACTIVITY_TYPE)
        .fetch_all(pool)
        .await?;

        Ok(ids)
    }

    /// Completed logs of a user restricted to `activity_ids`
    pub async fn list_completed(
        pool: &PgPool,
        user_id: &Uuid,
        activity_ids: &[Uuid],
    ) -> AppResult<Vec<CompletedActivity>> {
        let logs = sqlx::query_as::<_, CompletedActivity>(
            r#"
            SELECT activity_id, (photo_url IS NOT NULL AND photo_url <> '') AS has_photo
            FROM activity_logs
            WHERE user_id = $1 AND completed = TRUE AND activity_id = ANY($2)
            "#,
        )
        .bind(user_id)
        .bind(activity_ids)
        .fetch_all(pool)
        .await?;

        Ok(logs)
    }
}
