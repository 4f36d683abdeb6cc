//! HTTP API server for external control (desktop shell, plugins)
//!
//! This module provides a REST API over the recording session:
//! - GET  /api/devices - enter device selection, fresh device list
//! - POST /api/recordings/start - confirm a device and begin recording
//! - POST /api/recordings/stop - stop and process
//! - GET  /api/recordings/status - session state, duration, audio level
//! - GET  /api/recordings/transcript - resolved live segments
//! - GET  /api/recordings/insights - latest aggregated insight snapshot
//! - PUT  /api/recordings/speakers/:id - in-place speaker rename
//! - GET  /api/meetings, /api/meetings/:id - finalized records
//! - PATCH /api/meetings/:id/tags - tag edits
//! - GET  /health - health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
