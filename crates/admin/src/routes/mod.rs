//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Health check
//!
//! # Donations (read from the backend)
//! GET  /api/admin/donations             - Recent completed donations
//! GET  /api/admin/donations/stats       - Headline statistics
//! GET  /api/admin/donations/chart       - Chart series (?granularity=)
//! GET  /api/admin/donations/overview    - Stats and chart in one payload
//! ```

pub mod donations;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Build the application routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/admin/donations", get(donations::list))
        .route("/api/admin/donations/stats", get(donations::stats))
        .route("/api/admin/donations/chart", get(donations::chart))
        .route("/api/admin/donations/overview", get(donations::overview))
}

/// Build the routes with state attached, ready to serve.
pub fn build_router(state: AppState) -> Router {
    routes().with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the backend.
async fn health() -> &'static str {
    "ok"
}
