use serde::{Deserialize, Serialize};

use crate::session::insights::LiveInsightSnapshot;
use crate::store::TaskItem;

/// A protocol message on the session event channel.
///
/// The wire form is a JSON envelope `{"type": "...", ...payload}`. Envelopes
/// with a `type` this build does not know decode to [`SessionEvent::Unknown`]
/// and are skipped by the transport, so newer backends can add message kinds
/// without breaking older consumers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A transcript fragment attributed to one speaker.
    ///
    /// Only `is_final: true` fragments are durable; non-final fragments are
    /// ephemeral display hints and never reach the transcript log.
    TranscriptUpdate {
        speaker_id: String,
        /// Human-readable label from the diarization backend, if it has one.
        #[serde(default)]
        speaker_name: Option<String>,
        text: String,
        is_final: bool,
    },

    /// Advisory input level in `0.0..=1.0`. Droppable under backpressure.
    AudioLevel { value: f32 },

    /// An incremental insight snapshot. Merge-only, never a full replace.
    LiveSummary { data: LiveInsightSnapshot },

    /// Lifecycle status from the backend.
    Status {
        value: StatusValue,
        #[serde(default)]
        error: Option<String>,
        /// Backend-computed final analysis, carried on the terminal
        /// `complete` status when the backend produced one.
        #[serde(default)]
        summary: Option<FinalSummary>,
    },

    /// Any envelope whose `type` this build does not recognize.
    #[serde(other)]
    Unknown,
}

/// Lifecycle status values carried by [`SessionEvent::Status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusValue {
    Processing,
    Complete,
    Error,
}

/// Final analysis computed by the backend after `stop`.
///
/// Every field is optional; the controller falls back to the live insight
/// state for anything missing when it assembles the Meeting artifact.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FinalSummary {
    pub title: Option<String>,
    pub executive_summary: Option<String>,
    pub highlights: Vec<String>,
    pub tasks: Vec<TaskItem>,
}
