//! Entry Enrollment and video submission
//!
//! Both are client-facing triggers: they write the entrant's own row and
//! then refresh the contest standings. A failed refresh never fails the
//! action itself; the next trigger recomputes everything anyway.

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Contest, ContestEntry, ContestPhase},
    scoring::{ranking::refresh_standings_after_action, store::ContestStore},
};

async fn load_active_contest(store: &dyn ContestStore, contest_id: Uuid) -> AppResult<Contest> {
    let contest = store
        .find_contest(contest_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Contest not found".to_string()))?;

    if !contest.is_active {
        return Err(AppError::Validation("Contest is not active".to_string()));
    }

    Ok(contest)
}

/// Re-read the entry after a refresh so callers see the fresh score and
/// rank, falling back to the copy already in hand.
async fn reload_entry(store: &dyn ContestStore, fallback: ContestEntry) -> ContestEntry {
    match store.find_entry(fallback.contest_id, fallback.user_id).await {
        Ok(Some(entry)) => entry,
        _ => fallback,
    }
}

/// Ensure `user_id` has an entry in `contest_id` with the terms accepted at
/// `now`. Calling it again only moves `terms_accepted_at` forward.
pub async fn enroll(
    store: &dyn ContestStore,
    contest_id: Uuid,
    user_id: Uuid,
    now: DateTime<Utc>,
) -> AppResult<ContestEntry> {
    let contest = load_active_contest(store, contest_id).await?;

    if contest.current_phase != ContestPhase::Accumulation {
        return Err(AppError::Validation(
            "Contest is no longer accepting entries".to_string(),
        ));
    }

    let entry = store.upsert_entry_terms(contest_id, user_id, now).await?;
    info!(
        contest_id = %contest_id,
        user_id = %user_id,
        entry_id = %entry.id,
        "Contest terms accepted"
    );

    refresh_standings_after_action(store, &contest).await;

    Ok(reload_entry(store, entry).await)
}

/// Record an uploaded video on the entrant's row.
///
/// During accumulation any entrant may attach a video; once the contest is
/// in video submission only preselected entrants may.
pub async fn submit_video(
    store: &dyn ContestStore,
    contest_id: Uuid,
    user_id: Uuid,
    video_url: &str,
    now: DateTime<Utc>,
) -> AppResult<ContestEntry> {
    let contest = load_active_contest(store, contest_id).await?;

    let entry = store
        .find_entry(contest_id, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Not enrolled in this contest".to_string()))?;

    match contest.current_phase {
        ContestPhase::Accumulation => {}
        ContestPhase::VideoSubmission if entry.is_preselected => {}
        ContestPhase::VideoSubmission => {
            return Err(AppError::Forbidden(
                "Only preselected entrants can submit a video".to_string(),
            ));
        }
        ContestPhase::CommitteeReview | ContestPhase::WinnersAnnounced => {
            return Err(AppError::Validation(
                "Video submissions are closed".to_string(),
            ));
        }
    }

    store.update_entry_video(entry.id, video_url, now).await?;
    info!(
        contest_id = %contest_id,
        user_id = %user_id,
        entry_id = %entry.id,
        "Contest video recorded"
    );

    refresh_standings_after_action(store, &contest).await;

    Ok(reload_entry(store, entry).await)
}
