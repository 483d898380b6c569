//! Contest and contest entry models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::constants::DEFAULT_PRESELECTION_COUNT;

/// Lifecycle phase of a contest. Transitions only move forward through
/// the variants in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "contest_phase", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ContestPhase {
    Accumulation,
    VideoSubmission,
    CommitteeReview,
    WinnersAnnounced,
}

impl ContestPhase {
    /// The phase that follows this one, if any
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Accumulation => Some(Self::VideoSubmission),
            Self::VideoSubmission => Some(Self::CommitteeReview),
            Self::CommitteeReview => Some(Self::WinnersAnnounced),
            Self::WinnersAnnounced => None,
        }
    }

    /// Whether moving from `self` to `target` respects the one-way order
    pub fn can_advance_to(self, target: Self) -> bool {
        target > self
    }

    /// Whether standings may still be recomputed in this phase
    pub fn accepts_standings_refresh(self) -> bool {
        matches!(self, Self::Accumulation | Self::VideoSubmission)
    }
}

impl std::fmt::Display for ContestPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Accumulation => write!(f, "accumulation"),
            Self::VideoSubmission => write!(f, "video_submission"),
            Self::CommitteeReview => write!(f, "committee_review"),
            Self::WinnersAnnounced => write!(f, "winners_announced"),
        }
    }
}

/// Contest database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Contest {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub terms: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub max_winners: i32,
    pub preselection_count: Option<i32>,
    pub current_phase: ContestPhase,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Contest {
    /// Number of top-ranked entries to preselect
    pub fn effective_preselection_count(&self) -> i32 {
        self.preselection_count.unwrap_or(DEFAULT_PRESELECTION_COUNT)
    }

    /// Whether the preselection transition should fire for this contest at `now`
    pub fn is_due_for_preselection(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.current_phase == ContestPhase::Accumulation && self.end_date <= now
    }
}

/// One user's participation record in a contest
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ContestEntry {
    pub id: Uuid,
    pub contest_id: Uuid,
    pub user_id: Uuid,
    pub terms_accepted: bool,
    pub terms_accepted_at: Option<DateTime<Utc>>,
    pub video_url: Option<String>,
    pub video_uploaded_at: Option<DateTime<Utc>>,
    pub completion_percent: f64,
    pub photo_percent: f64,
    pub score: f64,
    pub rank: Option<i32>,
    pub is_preselected: bool,
    pub preselected_at: Option<DateTime<Utc>>,
    pub committee_selected: bool,
    pub final_winner: bool,
    pub created_at: DateTime<Utc>,
}
