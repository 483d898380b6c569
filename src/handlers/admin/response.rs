//! Admin response DTOs

use serde::Serialize;

use crate::scoring::{PreselectionReport, StandingsReport};

/// Preselection run summary
#[derive(Debug, Serialize)]
pub struct PreselectionResponse {
    pub advanced: usize,
    pub failed: usize,
    #[serde(flatten)]
    pub report: PreselectionReport,
}

impl From<PreselectionReport> for PreselectionResponse {
    fn from(report: PreselectionReport) -> Self {
        Self {
            advanced: report.advanced(),
            failed: report.failed(),
            report,
        }
    }
}

/// Recalculation summary
#[derive(Debug, Serialize)]
pub struct RecalculateResponse {
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
    pub ranked: usize,
    #[serde(flatten)]
    pub report: StandingsReport,
}

impl From<StandingsReport> for RecalculateResponse {
    fn from(report: StandingsReport) -> Self {
        Self {
            updated: report.scoring.updated(),
            skipped: report.scoring.skipped(),
            failed: report.scoring.failed() + report.ranking.failed.len(),
            ranked: report.ranking.ranked,
            report,
        }
    }
}
