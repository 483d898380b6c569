//! Per-unit outcomes and batch reports
//!
//! Batch procedures never abort on a single failing unit. Each unit records
//! what happened to it and the caller inspects the collected report.

use serde::Serialize;
use uuid::Uuid;

use crate::models::ContestPhase;

/// Why a unit of work was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NoAssignedPlan,
    NoScorableActivities,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoAssignedPlan => write!(f, "user has no assigned training plan"),
            Self::NoScorableActivities => write!(f, "assigned plan has no scorable activities"),
        }
    }
}

/// Result of processing one entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UnitOutcome {
    Updated,
    Skipped { reason: SkipReason },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitReport {
    pub entry_id: Uuid,
    pub user_id: Uuid,
    #[serde(flatten)]
    pub outcome: UnitOutcome,
}

/// Outcome of a Score Calculator pass over one contest
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoringReport {
    pub contest_id: Uuid,
    pub units: Vec<UnitReport>,
}

impl ScoringReport {
    pub fn new(contest_id: Uuid) -> Self {
        Self {
            contest_id,
            units: Vec::new(),
        }
    }

    pub fn push(&mut self, entry_id: Uuid, user_id: Uuid, outcome: UnitOutcome) {
        self.units.push(UnitReport {
            entry_id,
            user_id,
            outcome,
        });
    }

    pub fn updated(&self) -> usize {
        self.count(|o| matches!(o, UnitOutcome::Updated))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, UnitOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, UnitOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&UnitOutcome) -> bool) -> usize {
        self.units.iter().filter(|u| pred(&u.outcome)).count()
    }
}

/// Outcome of a re-rank pass over one contest
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RankingReport {
    pub contest_id: Uuid,
    /// Entries whose new rank was written
    pub ranked: usize,
    /// Entries whose rank write failed
    pub failed: Vec<Uuid>,
}

/// Score-then-rank pipeline result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandingsReport {
    pub scoring: ScoringReport,
    pub ranking: RankingReport,
}

/// What happened to one contest during the preselection transition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TransitionOutcome {
    Advanced { phase: ContestPhase },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContestTransition {
    pub contest_id: Uuid,
    pub code: String,
    pub preselection_count: i32,
    pub preselected: u64,
    pub scoring: Option<ScoringReport>,
    pub ranking: Option<RankingReport>,
    #[serde(flatten)]
    pub outcome: TransitionOutcome,
}

/// Outcome of one preselection run across all eligible contests
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PreselectionReport {
    pub contests: Vec<ContestTransition>,
}

impl PreselectionReport {
    pub fn advanced(&self) -> usize {
        self.contests
            .iter()
            .filter(|c| matches!(c.outcome, TransitionOutcome::Advanced { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.contests.len() - self.advanced()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoring_report_counts() {
        let mut report = ScoringReport::new(Uuid::new_v4());
        report.push(Uuid::new_v4(), Uuid::new_v4(), UnitOutcome::Updated);
        report.push(
            Uuid::new_v4(),
            Uuid::new_v4(),
            UnitOutcome::Skipped {
                reason: SkipReason::NoAssignedPlan,
            },
        );
        report.push(
            Uuid::new_v4(),
            Uuid::new_v4(),
            UnitOutcome::Failed {
                message: "timeout".to_string(),
            },
        );
        report.push(Uuid::new_v4(), Uuid::new_v4(), UnitOutcome::Updated);

        assert_eq!(report.updated(), 2);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.failed(), 1);
    }

    #[test]
    fn test_unit_report_serializes_flat() {
        let unit = UnitReport {
            entry_id: Uuid::nil(),
            user_id: Uuid::nil(),
            outcome: UnitOutcome::Skipped {
                reason: SkipReason::NoScorableActivities,
            },
        };
        let json = serde_json::to_value(&unit).unwrap();
        assert_eq!(json["status"], "skipped");
        assert_eq!(json["reason"], "no_scorable_activities");
    }
}
