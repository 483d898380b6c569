//! Contest request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::MAX_VIDEO_URL_LENGTH;

/// Enrollment request
#[derive(Debug, Deserialize)]
pub struct EnrollRequest {
    /// Must be true; enrollment is acceptance of the contest terms
    pub accept_terms: bool,
}

/// Video submission request; the upload itself happens against object storage
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitVideoRequest {
    #[validate(url, length(min = 1, max = MAX_VIDEO_URL_LENGTH))]
    pub video_url: String,
}

/// Leaderboard query parameters
#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}
