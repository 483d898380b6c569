//! Admin handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{middleware, routing::post, Router};

use crate::{
    middleware::auth::{auth_middleware, require_admin},
    state::AppState,
};

/// Admin routes
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/preselection", post(handler::run_preselection))
        .route("/scores/recalculate", post(handler::recalculate_scores))
        // Layers run outermost-last: authentication first, then the role check
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
