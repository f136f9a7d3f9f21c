//! API Routes for shutterbox
//!
//! This module combines all API routes into a single router.
//!
//! Route structure:
//! - POST /upload - Ingest a single file (multipart)
//! - GET /uploads/:filename - Serve a stored file
//! - GET /health - Health check (public)

pub mod status;
pub mod uploads;

use axum::Router;

use crate::AppState;

/// Build the complete API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Health endpoint (public)
        .merge(status::routes())
        // Upload ingestion and static retrieval
        .merge(uploads::routes())
}
