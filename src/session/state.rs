use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Lifecycle state of the recording session machine.
///
/// ```text
/// idle -> selecting_device -> recording <-> paused
///                 |               |
///               (cancel)        (stop)
///                 v               v
///               idle          processing -> complete | error -> idle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Idle,
    SelectingDevice,
    Recording,
    Paused,
    Processing,
    Complete,
    Error,
}

impl SessionStatus {
    /// Recording or paused: the only states `stop` acts on.
    pub fn is_open(&self) -> bool {
        matches!(self, SessionStatus::Recording | SessionStatus::Paused)
    }

    /// Complete or error: the states `reset` leaves from.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Complete | SessionStatus::Error)
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SessionStatus::Idle => "idle",
            SessionStatus::SelectingDevice => "selecting_device",
            SessionStatus::Recording => "recording",
            SessionStatus::Paused => "paused",
            SessionStatus::Processing => "processing",
            SessionStatus::Complete => "complete",
            SessionStatus::Error => "error",
        };
        f.write_str(s)
    }
}

/// One recording attempt, created when a device is confirmed and discarded
/// once the Meeting artifact is persisted or the session is reset.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub status: SessionStatus,
    pub device_id: String,
    pub title: Option<String>,
}

impl Session {
    pub fn new(device_id: String, title: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            status: SessionStatus::Recording,
            device_id,
            title,
        }
    }
}
