//! Marathon Contest - Contest scoring and preselection service
//!
//! Participants of a marathon training platform enroll in contests, earn a
//! score from how much of their assigned training plan they completed (and
//! photographed), and the best-ranked entries are preselected for the video
//! submission round once a contest ends.
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Request-level orchestration
//! - **Scoring**: Score calculation, ranking and the preselection transition
//! - **Repositories**: Database access
//! - **Models**: Domain models

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod scheduler;
pub mod scoring;
pub mod services;
pub mod state;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
