pub mod backend;
pub mod channel;
pub mod config;
pub mod http;
pub mod session;
pub mod store;

pub use backend::{Device, LoopbackBackend, RecorderBackend, StartOptions};
pub use channel::{EventChannel, EventSender, FinalSummary, SessionEvent, StatusValue};
pub use config::Config;
pub use http::{create_router, AppState};
pub use session::{
    spawn_event_pump, ActionItem, AttributedSegment, LiveInsightSnapshot, LiveInsightsAggregator,
    RecordingSessionController, Session, SessionError, SessionStatus, SpeakerIdentity,
    SpeakerRegistry, TranscriptAssembler, TranscriptSegment,
};
pub use store::{Meeting, MeetingPatch, MeetingStore, MemoryStore, TaskItem};
