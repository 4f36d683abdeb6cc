use axum::{
    routing::{get, patch, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::AppState;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Device selection
        .route("/api/devices", get(handlers::list_devices))
        // Recording control
        .route("/api/recordings/start", post(handlers::start_recording))
        .route("/api/recordings/cancel", post(handlers::cancel_selection))
        .route("/api/recordings/stop", post(handlers::stop_recording))
        .route("/api/recordings/reset", post(handlers::reset_session))
        // Live session reads
        .route("/api/recordings/status", get(handlers::recording_status))
        .route(
            "/api/recordings/transcript",
            get(handlers::recording_transcript),
        )
        .route(
            "/api/recordings/insights",
            get(handlers::recording_insights),
        )
        // Speaker correction
        .route(
            "/api/recordings/speakers/:speaker_id",
            put(handlers::rename_speaker),
        )
        // Finalized meetings
        .route("/api/meetings", get(handlers::list_meetings))
        .route("/api/meetings/:meeting_id", get(handlers::get_meeting))
        .route(
            "/api/meetings/:meeting_id/tags",
            patch(handlers::patch_meeting_tags),
        )
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
