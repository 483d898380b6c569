//! Score Calculator
//!
//! Recomputes `completion_percent`, `photo_percent` and `score` for every
//! entry of a contest from the entrant's assigned training plan. Ranking is
//! a separate step (see [`crate::scoring::ranking`]).

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{ContestEntry, PlanProgress},
    scoring::{
        report::{ScoringReport, SkipReason, UnitOutcome},
        store::{ContestStore, EntryScores},
    },
};

/// Derive the three persisted values from progress counts.
///
/// Returns `None` when there is nothing to divide by. No rounding is applied.
pub fn compute_scores(progress: &PlanProgress) -> Option<EntryScores> {
    if progress.total_activities == 0 {
        return None;
    }

    let total = progress.total_activities as f64;
    let completion_percent = 100.0 * progress.completed as f64 / total;
    let photo_percent = 100.0 * progress.completed_with_photo as f64 / total;

    Some(EntryScores {
        completion_percent,
        photo_percent,
        score: (completion_percent + photo_percent) / 2.0,
    })
}

/// Resolve the progress counts of one user against their current plan.
///
/// `Ok(Err(reason))` means the user cannot be scored right now.
pub async fn load_progress(
    store: &dyn ContestStore,
    user_id: Uuid,
) -> AppResult<Result<PlanProgress, SkipReason>> {
    let Some(plan_id) = store.current_plan_id(user_id).await? else {
        return Ok(Err(SkipReason::NoAssignedPlan));
    };

    let week_ids = store.list_plan_week_ids(plan_id).await?;
    if week_ids.is_empty() {
        return Ok(Err(SkipReason::NoScorableActivities));
    }

    let activity_ids = store.list_scorable_activity_ids(&week_ids).await?;
    if activity_ids.is_empty() {
        return Ok(Err(SkipReason::NoScorableActivities));
    }

    let logs = store
        .list_completed_activities(user_id, &activity_ids)
        .await?;

    Ok(Ok(PlanProgress::from_logs(activity_ids.len(), &logs)))
}

async fn score_entry(store: &dyn ContestStore, entry: &ContestEntry) -> AppResult<UnitOutcome> {
    let progress = match load_progress(store, entry.user_id).await? {
        Ok(progress) => progress,
        Err(reason) => return Ok(UnitOutcome::Skipped { reason }),
    };

    let Some(scores) = compute_scores(&progress) else {
        return Ok(UnitOutcome::Skipped {
            reason: SkipReason::NoScorableActivities,
        });
    };

    store.update_entry_scores(entry.id, scores).await?;
    Ok(UnitOutcome::Updated)
}

/// Run the Score Calculator over every entry of `contest_id`.
///
/// Failing to list the entries is an invocation-level error. Anything that
/// goes wrong for a single entry is recorded in the report and the loop
/// moves on; that entry keeps its previous values.
pub async fn recalculate_scores(
    store: &dyn ContestStore,
    contest_id: Uuid,
) -> AppResult<ScoringReport> {
    let entries = store.list_entries(contest_id).await?;
    let mut report = ScoringReport::new(contest_id);

    for entry in &entries {
        let outcome = match score_entry(store, entry).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(
                    contest_id = %contest_id,
                    entry_id = %entry.id,
                    user_id = %entry.user_id,
                    error = %e,
                    "Failed to score contest entry"
                );
                UnitOutcome::Failed {
                    message: e.to_string(),
                }
            }
        };

        if let UnitOutcome::Skipped { reason } = &outcome {
            debug!(
                contest_id = %contest_id,
                entry_id = %entry.id,
                user_id = %entry.user_id,
                %reason,
                "Skipped contest entry"
            );
        }

        report.push(entry.id, entry.user_id, outcome);
    }

    info!(
        contest_id = %contest_id,
        entries = entries.len(),
        updated = report.updated(),
        skipped = report.skipped(),
        failed = report.failed(),
        "Recalculated contest scores"
    );

    Ok(report)
}
