use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use super::state::AppState;
use crate::backend::Device;
use crate::session::{
    spawn_event_pump, AttributedSegment, LiveInsightSnapshot, SessionError, SessionStatus,
    SpeakerIdentity,
};
use crate::store::MeetingPatch;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StartRecordingRequest {
    /// Device to record from, as returned by GET /api/devices
    pub device_id: String,

    /// Optional meeting title
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StartRecordingResponse {
    pub session_id: Uuid,
    pub status: SessionStatus,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct DeviceListResponse {
    pub devices: Vec<Device>,
    /// First available device, as a suggestion for the client
    pub default: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecordingStatusResponse {
    pub status: SessionStatus,
    pub duration_seconds: u64,
    pub audio_level: f32,
    pub partial_caption: Option<String>,
    pub last_error: Option<String>,
    pub meeting_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct StatusMessageResponse {
    pub status: SessionStatus,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct RenameSpeakerRequest {
    pub display_name: String,
}

#[derive(Debug, Serialize)]
pub struct RenameSpeakerResponse {
    pub speaker: SpeakerIdentity,
}

#[derive(Debug, Deserialize)]
pub struct PatchTagsRequest {
    #[serde(default)]
    pub add: Vec<String>,
    #[serde(default)]
    pub remove: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, error: impl Into<String>) -> axum::response::Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

/// Map the session error taxonomy onto HTTP status codes.
fn session_error_status(err: &SessionError) -> StatusCode {
    match err {
        SessionError::InvalidTransition { .. } => StatusCode::CONFLICT,
        SessionError::Device(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SessionError::ProviderConfig(_) => StatusCode::PRECONDITION_FAILED,
        SessionError::Channel(_) | SessionError::Lifecycle { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/devices
/// Enter device selection and return the fresh device list
pub async fn list_devices(State(state): State<AppState>) -> impl IntoResponse {
    let mut controller = state.controller.lock().await;

    match controller.select_device().await {
        Ok(devices) => {
            let default = devices.iter().find(|d| d.available).map(|d| d.id.clone());
            (StatusCode::OK, Json(DeviceListResponse { devices, default })).into_response()
        }
        Err(e) => {
            error!("Device listing failed: {}", e);
            error_response(session_error_status(&e), e.to_string())
        }
    }
}

/// POST /api/recordings/start
/// Confirm a device and begin recording
pub async fn start_recording(
    State(state): State<AppState>,
    Json(req): Json<StartRecordingRequest>,
) -> impl IntoResponse {
    info!("Starting recording on device: {}", req.device_id);

    let channel = {
        let mut controller = state.controller.lock().await;
        match controller.confirm_device(&req.device_id, req.title).await {
            Ok(channel) => channel,
            Err(e) => {
                error!("Failed to start recording: {}", e);
                return error_response(session_error_status(&e), e.to_string());
            }
        }
    };

    // Drain this session's events until it reaches a terminal state.
    let pump = spawn_event_pump(state.controller.clone(), channel);
    {
        let mut handle = state.pump.lock().await;
        *handle = Some(pump);
    }

    let controller = state.controller.lock().await;
    let session_id = controller
        .session()
        .map(|s| s.id)
        .unwrap_or_else(Uuid::new_v4);

    (
        StatusCode::OK,
        Json(StartRecordingResponse {
            session_id,
            status: controller.status(),
            message: format!("Recording started on {}", req.device_id),
        }),
    )
        .into_response()
}

/// POST /api/recordings/cancel
/// Leave device selection without starting
pub async fn cancel_selection(State(state): State<AppState>) -> impl IntoResponse {
    let mut controller = state.controller.lock().await;
    controller.cancel_selection();

    (
        StatusCode::OK,
        Json(StatusMessageResponse {
            status: controller.status(),
            message: "Device selection cancelled".to_string(),
        }),
    )
        .into_response()
}

/// POST /api/recordings/stop
/// Stop recording; the session moves to processing
pub async fn stop_recording(State(state): State<AppState>) -> impl IntoResponse {
    let mut controller = state.controller.lock().await;

    if !controller.status().is_open() {
        return error_response(StatusCode::CONFLICT, "No recording in progress");
    }

    match controller.stop().await {
        Ok(()) => (
            StatusCode::OK,
            Json(StatusMessageResponse {
                status: controller.status(),
                message: "Recording stopped, processing audio...".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to stop recording: {}", e);
            error_response(session_error_status(&e), e.to_string())
        }
    }
}

/// POST /api/recordings/reset
/// Return to idle after a completed or failed session
pub async fn reset_session(State(state): State<AppState>) -> impl IntoResponse {
    let mut controller = state.controller.lock().await;

    match controller.reset() {
        Ok(()) => (
            StatusCode::OK,
            Json(StatusMessageResponse {
                status: controller.status(),
                message: "Session reset".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response(session_error_status(&e), e.to_string()),
    }
}

/// GET /api/recordings/status
/// Current session state
pub async fn recording_status(State(state): State<AppState>) -> impl IntoResponse {
    let controller = state.controller.lock().await;

    (
        StatusCode::OK,
        Json(RecordingStatusResponse {
            status: controller.status(),
            duration_seconds: controller.duration_seconds(),
            audio_level: controller.audio_level(),
            partial_caption: controller.partial_caption().map(str::to_string),
            last_error: controller.last_error().map(str::to_string),
            meeting_id: controller.last_meeting_id(),
        }),
    )
        .into_response()
}

/// GET /api/recordings/transcript
/// Speaker-resolved transcript accumulated so far
pub async fn recording_transcript(State(state): State<AppState>) -> impl IntoResponse {
    let controller = state.controller.lock().await;
    let segments: Vec<AttributedSegment> = controller.transcript().resolved(controller.speakers());

    (StatusCode::OK, Json(segments)).into_response()
}

/// GET /api/recordings/insights
/// Latest aggregated insight snapshot
pub async fn recording_insights(State(state): State<AppState>) -> impl IntoResponse {
    let controller = state.controller.lock().await;
    let snapshot: LiveInsightSnapshot = controller.insights().clone();

    (StatusCode::OK, Json(snapshot)).into_response()
}

/// PUT /api/recordings/speakers/:speaker_id
/// Rename a speaker; retroactive over the whole session
pub async fn rename_speaker(
    State(state): State<AppState>,
    Path(speaker_id): Path<String>,
    Json(req): Json<RenameSpeakerRequest>,
) -> impl IntoResponse {
    let mut controller = state.controller.lock().await;

    if !controller.rename_speaker(&speaker_id, &req.display_name) {
        return error_response(
            StatusCode::NOT_FOUND,
            format!("Speaker {} not seen in this session", speaker_id),
        );
    }

    info!("Speaker {} renamed to {}", speaker_id, req.display_name);

    let speaker = controller
        .speakers()
        .get(&speaker_id)
        .cloned()
        .expect("speaker just renamed");
    (StatusCode::OK, Json(RenameSpeakerResponse { speaker })).into_response()
}

/// GET /api/meetings
/// All finalized meetings, most recent first
pub async fn list_meetings(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.list().await {
        Ok(meetings) => (StatusCode::OK, Json(meetings)).into_response(),
        Err(e) => {
            error!("Failed to list meetings: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to list meetings: {e}"),
            )
        }
    }
}

/// GET /api/meetings/:meeting_id
/// One finalized meeting
pub async fn get_meeting(
    State(state): State<AppState>,
    Path(meeting_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.store.get(meeting_id).await {
        Ok(Some(meeting)) => (StatusCode::OK, Json(meeting)).into_response(),
        Ok(None) => error_response(
            StatusCode::NOT_FOUND,
            format!("Meeting {} not found", meeting_id),
        ),
        Err(e) => {
            error!("Failed to fetch meeting: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch meeting: {e}"),
            )
        }
    }
}

/// PATCH /api/meetings/:meeting_id/tags
/// Add or remove tags on a finalized meeting
pub async fn patch_meeting_tags(
    State(state): State<AppState>,
    Path(meeting_id): Path<Uuid>,
    Json(req): Json<PatchTagsRequest>,
) -> impl IntoResponse {
    let patch = MeetingPatch {
        add_tags: req.add,
        remove_tags: req.remove,
        ..MeetingPatch::default()
    };

    match state.store.update(meeting_id, patch).await {
        Ok(Some(meeting)) => (StatusCode::OK, Json(meeting)).into_response(),
        Ok(None) => error_response(
            StatusCode::NOT_FOUND,
            format!("Meeting {} not found", meeting_id),
        ),
        Err(e) => {
            error!("Failed to update meeting: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to update meeting: {e}"),
            )
        }
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
