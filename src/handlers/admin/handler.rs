//! Admin handler implementations

use axum::{body::Bytes, extract::State, Json};
use tracing::info;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    services::ContestService,
    state::AppState,
};

use super::{
    request::{PreselectionRequest, RecalculateRequest},
    response::{PreselectionResponse, RecalculateResponse},
};

/// Run the preselection transition now
pub async fn run_preselection(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    body: Bytes,
) -> AppResult<Json<PreselectionResponse>> {
    // An empty body means every due contest
    let request: PreselectionRequest = if body.is_empty() {
        PreselectionRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| AppError::InvalidInput(e.to_string()))?
    };

    info!(
        admin_id = %auth_user.id,
        contest_id = ?request.contest_id,
        "Manual preselection requested"
    );

    let report = ContestService::run_preselection(state.store(), request.contest_id).await?;
    Ok(Json(report.into()))
}

/// Recalculate scores and ranks for one contest
pub async fn recalculate_scores(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<RecalculateRequest>,
) -> AppResult<Json<RecalculateResponse>> {
    let contest_id = payload
        .contest_id
        .ok_or_else(|| AppError::InvalidInput("contest_id is required".to_string()))?;

    info!(
        admin_id = %auth_user.id,
        contest_id = %contest_id,
        "Manual recalculation requested"
    );

    let report = ContestService::recalculate(state.store(), &contest_id).await?;
    Ok(Json(report.into()))
}
