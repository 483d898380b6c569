//! Admin request DTOs

use serde::Deserialize;
use uuid::Uuid;

/// Manual preselection trigger; all due contests when `contest_id` is absent
#[derive(Debug, Default, Deserialize)]
pub struct PreselectionRequest {
    pub contest_id: Option<Uuid>,
}

/// Manual score-then-rank for one contest
#[derive(Debug, Deserialize)]
pub struct RecalculateRequest {
    pub contest_id: Option<Uuid>,
}
