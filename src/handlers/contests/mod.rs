//! Contest handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// Contest routes
pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(handler::list_contests))
        .route("/{id}", get(handler::get_contest))
        .route("/{id}/leaderboard", get(handler::get_leaderboard));

    let entrant = Router::new()
        .route("/{id}/entries", post(handler::enroll))
        .route("/{id}/entries/me", get(handler::get_my_entry))
        .route("/{id}/entries/me/video", put(handler::submit_video))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(entrant)
}
