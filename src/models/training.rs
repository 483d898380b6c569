//! Training plan progress models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User profile columns the scoring pipeline reads
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub display_name: Option<String>,
    pub current_plan_id: Option<Uuid>,
}

/// A completed activity log restricted to the scorable activity set
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct CompletedActivity {
    pub activity_id: Uuid,
    pub has_photo: bool,
}

/// Counts that feed the completion and photo percentages of one user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlanProgress {
    /// Non-rest activities of the assigned plan
    pub total_activities: usize,
    pub completed: usize,
    pub completed_with_photo: usize,
}

impl PlanProgress {
    /// Build progress counts from the completed logs of a user.
    ///
    /// Several logs for the same activity count once; the activity counts as
    /// photographed if any of its logs carries a photo.
    pub fn from_logs(total_activities: usize, logs: &[CompletedActivity]) -> Self {
        let mut by_activity: std::collections::HashMap<Uuid, bool> =
            std::collections::HashMap::with_capacity(logs.len());
        for log in logs {
            let photo = by_activity.entry(log.activity_id).or_insert(false);
            *photo |= log.has_photo;
        }

        Self {
            total_activities,
            completed: by_activity.len(),
            completed_with_photo: by_activity.values().filter(|p| **p).count(),
        }
    }
}
