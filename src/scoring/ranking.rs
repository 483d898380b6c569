//! Ranking and preselection
//!
//! Ranks are always a full recomputation over one snapshot of a contest's
//! entries. Preselection freezes the top of that ranking once the
//! accumulation window has closed and moves the contest to video submission.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Contest, ContestEntry, ContestPhase},
    scoring::{
        calculator::recalculate_scores,
        report::{
            ContestTransition, PreselectionReport, RankingReport, StandingsReport,
            TransitionOutcome,
        },
        store::ContestStore,
    },
};

/// The fields ranking looks at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankCandidate {
    pub entry_id: Uuid,
    pub score: f64,
    pub created_at: DateTime<Utc>,
}

impl From<&ContestEntry> for RankCandidate {
    fn from(entry: &ContestEntry) -> Self {
        Self {
            entry_id: entry.id,
            score: entry.score,
            created_at: entry.created_at,
        }
    }
}

/// Score descending, then earlier enrollment, then entry id.
pub fn standings_order(a: &RankCandidate, b: &RankCandidate) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.entry_id.cmp(&b.entry_id))
}

/// Assign 1-based, gap-free ranks. No two entries share a rank.
pub fn rank_entries(mut candidates: Vec<RankCandidate>) -> Vec<(Uuid, i32)> {
    candidates.sort_by(standings_order);
    candidates
        .into_iter()
        .zip(1..)
        .map(|(candidate, rank)| (candidate.entry_id, rank))
        .collect()
}

/// Re-rank every entry of a contest and write the ranks back.
///
/// A failed write for one entry is logged and reported; the others are
/// still written.
pub async fn rerank(store: &dyn ContestStore, contest_id: Uuid) -> AppResult<RankingReport> {
    let entries = store.list_entries(contest_id).await?;
    let ranking = rank_entries(entries.iter().map(RankCandidate::from).collect());

    let mut report = RankingReport {
        contest_id,
        ..Default::default()
    };

    for (entry_id, rank) in ranking {
        match store.update_entry_rank(entry_id, rank).await {
            Ok(()) => report.ranked += 1,
            Err(e) => {
                warn!(
                    contest_id = %contest_id,
                    entry_id = %entry_id,
                    rank,
                    error = %e,
                    "Failed to write entry rank"
                );
                report.failed.push(entry_id);
            }
        }
    }

    info!(
        contest_id = %contest_id,
        ranked = report.ranked,
        failed = report.failed.len(),
        "Re-ranked contest entries"
    );

    Ok(report)
}

/// Score every entry, then re-rank. Ranking is only meaningful after scoring.
pub async fn refresh_standings(
    store: &dyn ContestStore,
    contest_id: Uuid,
) -> AppResult<StandingsReport> {
    let scoring = recalculate_scores(store, contest_id).await?;
    let ranking = rerank(store, contest_id).await?;
    Ok(StandingsReport { scoring, ranking })
}

/// Refresh standings on behalf of a user action.
///
/// Never fails the surrounding action: errors are logged and `None` is
/// returned. Contests past video submission keep their standings as they are.
pub async fn refresh_standings_after_action(
    store: &dyn ContestStore,
    contest: &Contest,
) -> Option<StandingsReport> {
    if !contest.current_phase.accepts_standings_refresh() {
        info!(
            contest_id = %contest.id,
            phase = %contest.current_phase,
            "Standings are frozen, skipping refresh"
        );
        return None;
    }

    match refresh_standings(store, contest.id).await {
        Ok(report) => Some(report),
        Err(e) => {
            warn!(contest_id = %contest.id, error = %e, "Standings refresh failed");
            None
        }
    }
}

/// Run the preselection transition for every eligible contest.
///
/// Eligible means active, still in accumulation and with an end date at or
/// before `now`; `only` narrows the run to a single contest. Contests that
/// already left accumulation are never touched, so re-running is a no-op for
/// them. A failure on one contest is reported and the next one is processed.
pub async fn run_preselection(
    store: &dyn ContestStore,
    now: DateTime<Utc>,
    only: Option<Uuid>,
) -> AppResult<PreselectionReport> {
    let contests = store.list_contests_due_for_preselection(now, only).await?;
    let mut report = PreselectionReport::default();

    for contest in contests
        .iter()
        .filter(|c| c.is_due_for_preselection(now) && only.is_none_or(|id| id == c.id))
    {
        report.contests.push(preselect_contest(store, contest, now).await);
    }

    info!(
        contests = report.contests.len(),
        advanced = report.advanced(),
        failed = report.failed(),
        "Preselection run finished"
    );

    Ok(report)
}

async fn preselect_contest(
    store: &dyn ContestStore,
    contest: &Contest,
    now: DateTime<Utc>,
) -> ContestTransition {
    let mut transition = ContestTransition {
        contest_id: contest.id,
        code: contest.code.clone(),
        preselection_count: contest.effective_preselection_count(),
        preselected: 0,
        scoring: None,
        ranking: None,
        outcome: TransitionOutcome::Failed {
            message: String::new(),
        },
    };

    transition.outcome = match advance_to_video_submission(store, contest, now, &mut transition).await
    {
        Ok(phase) => {
            info!(
                contest_id = %contest.id,
                code = %contest.code,
                preselected = transition.preselected,
                %phase,
                "Contest preselection complete"
            );
            TransitionOutcome::Advanced { phase }
        }
        Err(e) => {
            error!(
                contest_id = %contest.id,
                code = %contest.code,
                error = %e,
                "Contest preselection failed"
            );
            TransitionOutcome::Failed {
                message: e.to_string(),
            }
        }
    };

    transition
}

async fn advance_to_video_submission(
    store: &dyn ContestStore,
    contest: &Contest,
    now: DateTime<Utc>,
    transition: &mut ContestTransition,
) -> AppResult<ContestPhase> {
    let next = contest
        .current_phase
        .next()
        .filter(|phase| *phase == ContestPhase::VideoSubmission)
        .ok_or_else(|| {
            AppError::Conflict(format!("Contest is already in phase {}", contest.current_phase))
        })?;

    transition.scoring = Some(recalculate_scores(store, contest.id).await?);

    store.reset_preselection(contest.id).await?;
    let ranking = rerank(store, contest.id).await?;
    let unranked = ranking.failed.len();
    transition.ranking = Some(ranking);

    // Every entry must hold a rank before marking; the contest never returns
    // to accumulation.
    if unranked > 0 {
        return Err(AppError::Conflict(format!(
            "{unranked} entries could not be ranked, preselection deferred"
        )));
    }

    transition.preselected = store
        .mark_preselected(contest.id, transition.preselection_count, now)
        .await?;

    store.update_contest_phase(contest.id, next).await?;
    Ok(next)
}
