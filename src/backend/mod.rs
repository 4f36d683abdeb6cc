//! Recorder backend interface
//!
//! The audio capture, speech-to-text and diarization layers live behind
//! this trait; the session core only drives their lifecycle and consumes
//! the event channel they feed. `LoopbackBackend` is the in-process
//! implementation used for tests and local development.

pub mod loopback;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::channel::EventSender;
use crate::session::SessionError;

pub use loopback::LoopbackBackend;

/// An audio input device as reported by the capture layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Device {
    pub id: String,
    pub name: String,
    pub available: bool,
}

/// Parameters for the backend `start` call.
#[derive(Debug, Clone, Default)]
pub struct StartOptions {
    pub device_id: String,
    pub title: Option<String>,
}

/// Lifecycle API of the recording backend.
///
/// `stop` is idempotent from the caller's perspective: the controller
/// tolerates an error reply on an already-stopped session without treating
/// it as fatal, since the backend may still be finalizing the recording.
#[async_trait]
pub trait RecorderBackend: Send + Sync {
    /// Enumerate capture devices. Called fresh on every entry into device
    /// selection; availability can change between sessions.
    async fn list_devices(&self) -> Result<Vec<Device>, SessionError>;

    /// Begin capturing on `device_id`, publishing session events to
    /// `events` until stopped.
    async fn start(&self, events: EventSender, opts: StartOptions) -> Result<(), SessionError>;

    /// Stop capturing. The backend finishes its own processing and emits a
    /// terminal `status` event on the channel afterwards.
    async fn stop(&self) -> Result<(), SessionError>;

    /// Backend name for logging.
    fn name(&self) -> &str;
}
