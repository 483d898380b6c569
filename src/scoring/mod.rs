//! Contest scoring pipeline
//!
//! Three cooperating procedures over the shared store:
//! - **Enrollment**: idempotent upsert of a (contest, user) entry
//! - **Score Calculator**: completion and photo percentages from the assigned plan
//! - **Ranking & Preselection**: strict re-rank and the one-way
//!   `accumulation -> video_submission` transition
//!
//! Scoring always precedes ranking; [`ranking::refresh_standings`] runs the two
//! in order.

pub mod calculator;
pub mod enrollment;
pub mod ranking;
pub mod report;
pub mod store;

pub use calculator::{compute_scores, recalculate_scores};
pub use enrollment::{enroll, submit_video};
pub use ranking::{rank_entries, refresh_standings, refresh_standings_after_action, rerank, run_preselection};
pub use report::{PreselectionReport, RankingReport, ScoringReport, StandingsReport};
pub use store::{ContestStore, EntryScores};
