//! Contest handler implementations

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::{DEFAULT_LEADERBOARD_PAGE_SIZE, MAX_PAGE_SIZE},
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    services::ContestService,
    state::AppState,
};

use super::{
    request::{EnrollRequest, LeaderboardQuery, SubmitVideoRequest},
    response::{ContestResponse, ContestsListResponse, EntryResponse, LeaderboardResponse},
};

/// List active contests
pub async fn list_contests(State(state): State<AppState>) -> AppResult<Json<ContestsListResponse>> {
    let contests = ContestService::list_contests(state.db()).await?;
    Ok(Json(ContestsListResponse { contests }))
}

/// Get a specific contest
pub async fn get_contest(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ContestResponse>> {
    let contest = ContestService::get_contest(state.db(), &id).await?;
    Ok(Json(contest))
}

/// Get contest leaderboard
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<LeaderboardQuery>,
) -> AppResult<Json<LeaderboardResponse>> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query
        .per_page
        .unwrap_or(DEFAULT_LEADERBOARD_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let leaderboard = ContestService::get_leaderboard(state.db(), &id, page, per_page).await?;
    Ok(Json(leaderboard))
}

/// Accept the terms and enroll in a contest
pub async fn enroll(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<EnrollRequest>,
) -> AppResult<(StatusCode, Json<EntryResponse>)> {
    if !payload.accept_terms {
        return Err(AppError::Validation(
            "Contest terms must be accepted".to_string(),
        ));
    }

    let entry = ContestService::enroll(state.store(), &id, &auth_user.id).await?;
    Ok((StatusCode::OK, Json(entry)))
}

/// Get the caller's entry with refreshed standings
pub async fn get_my_entry(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<EntryResponse>> {
    let entry = ContestService::get_my_entry(state.store(), &id, &auth_user.id).await?;
    Ok(Json(entry))
}

/// Record the caller's uploaded video
pub async fn submit_video(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SubmitVideoRequest>,
) -> AppResult<Json<EntryResponse>> {
    payload.validate()?;

    let entry =
        ContestService::submit_video(state.store(), &id, &auth_user.id, &payload.video_url)
            .await?;
    Ok(Json(entry))
}
