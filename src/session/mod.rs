//! Recording session core
//!
//! This module provides the session protocol implementation:
//! - `controller` - lifecycle state machine and Meeting finalization
//! - `transcript` - append-only attributed transcript log
//! - `speakers` - per-session speaker identities and user renames
//! - `insights` - monotonic merge of incremental AI insight snapshots
//! - `state` / `error` - session status and the typed error taxonomy

pub mod controller;
pub mod error;
pub mod insights;
pub mod speakers;
pub mod state;
pub mod transcript;

pub use controller::{spawn_event_pump, RecordingSessionController};
pub use error::SessionError;
pub use insights::{ActionItem, LiveInsightSnapshot, LiveInsightsAggregator};
pub use speakers::{SpeakerIdentity, SpeakerRegistry};
pub use state::{Session, SessionStatus};
pub use transcript::{AttributedSegment, TranscriptAssembler, TranscriptSegment};
