//! Logging middleware

use std::time::Instant;

use axum::{body::Body, extract::Request, middleware::Next, response::Response};
use tracing::{info, warn, Instrument};

/// Request logging middleware
///
/// Runs the request inside a span carrying method and path so that pipeline
/// log lines emitted by handlers are attributed to the triggering request.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let span = tracing::info_span!("request", method = %method, path = %path);
    let response = next.run(request).instrument(span).await;

    let status = response.status();
    let duration_ms = format!("{:.2}", start.elapsed().as_secs_f64() * 1000.0);

    if status.is_server_error() {
        warn!(method = %method, path = %path, status = status.as_u16(), %duration_ms, "Request failed");
    } else {
        info!(method = %method, path = %path, status = status.as_u16(), %duration_ms, "Request completed");
    }

    response
}
