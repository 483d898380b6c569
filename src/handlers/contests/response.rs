//! Contest response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Contest, ContestEntry, ContestPhase};

/// Contest response
#[derive(Debug, Serialize)]
pub struct ContestResponse {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub terms: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub max_winners: i32,
    pub preselection_count: i32,
    pub phase: ContestPhase,
    pub is_active: bool,
}

impl From<Contest> for ContestResponse {
    fn from(contest: Contest) -> Self {
        Self {
            preselection_count: contest.effective_preselection_count(),
            id: contest.id,
            code: contest.code,
            name: contest.name,
            description: contest.description,
            terms: contest.terms,
            start_date: contest.start_date,
            end_date: contest.end_date,
            max_winners: contest.max_winners,
            phase: contest.current_phase,
            is_active: contest.is_active,
        }
    }
}

/// Contest list response
#[derive(Debug, Serialize)]
pub struct ContestsListResponse {
    pub contests: Vec<ContestResponse>,
}

/// The caller's own entry
#[derive(Debug, Serialize)]
pub struct EntryResponse {
    pub id: Uuid,
    pub contest_id: Uuid,
    pub phase: ContestPhase,
    pub terms_accepted_at: Option<DateTime<Utc>>,
    pub video_url: Option<String>,
    pub video_uploaded_at: Option<DateTime<Utc>>,
    pub completion_percent: f64,
    pub photo_percent: f64,
    pub score: f64,
    pub rank: Option<i32>,
    pub is_preselected: bool,
    pub committee_selected: bool,
    pub final_winner: bool,
}

impl EntryResponse {
    pub fn new(entry: ContestEntry, phase: ContestPhase) -> Self {
        Self {
            id: entry.id,
            contest_id: entry.contest_id,
            phase,
            terms_accepted_at: entry.terms_accepted_at,
            video_url: entry.video_url,
            video_uploaded_at: entry.video_uploaded_at,
            completion_percent: entry.completion_percent,
            photo_percent: entry.photo_percent,
            score: entry.score,
            rank: entry.rank,
            is_preselected: entry.is_preselected,
            committee_selected: entry.committee_selected,
            final_winner: entry.final_winner,
        }
    }
}

/// Leaderboard row
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct LeaderboardRow {
    pub user_id: Uuid,
    pub display_name: Option<String>,
    pub rank: Option<i32>,
    pub score: f64,
    pub completion_percent: f64,
    pub photo_percent: f64,
    pub is_preselected: bool,
    pub has_video: bool,
}

/// Leaderboard response
#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub contest_id: Uuid,
    pub phase: ContestPhase,
    pub entries: Vec<LeaderboardRow>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}
