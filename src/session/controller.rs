use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::StreamExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::error::SessionError;
use super::insights::{LiveInsightSnapshot, LiveInsightsAggregator};
use super::speakers::SpeakerRegistry;
use super::state::{Session, SessionStatus};
use super::transcript::TranscriptAssembler;
use crate::backend::{Device, RecorderBackend, StartOptions};
use crate::channel::{self, EventChannel, FinalSummary, SessionEvent, StatusValue};
use crate::config::RecordingConfig;
use crate::store::{Meeting, MeetingStore, TaskItem};

/// Owner of the recording session lifecycle.
///
/// Drives the backend start/stop calls, consumes the event channel through
/// [`handle_event`](Self::handle_event), and assembles the final Meeting
/// artifact when the terminal `complete` status arrives. All mutation goes
/// through `&mut self`, so wrapping the controller in one async mutex
/// serializes message handling by construction.
pub struct RecordingSessionController {
    backend: Arc<dyn RecorderBackend>,
    store: Arc<dyn MeetingStore>,
    config: RecordingConfig,
    status: SessionStatus,
    session: Option<Session>,
    transcript: TranscriptAssembler,
    speakers: SpeakerRegistry,
    insights: LiveInsightsAggregator,
    /// Wall-clock seconds spent recording, advanced by [`tick`](Self::tick).
    /// Frozen the moment `stop` is invoked; processing time never counts.
    duration_seconds: u64,
    /// Last advisory input level, `0.0..=1.0`.
    audio_level: f32,
    /// Latest non-final transcript fragment, for display only.
    partial_caption: Option<String>,
    last_error: Option<String>,
    last_meeting_id: Option<Uuid>,
}

impl RecordingSessionController {
    pub fn new(
        backend: Arc<dyn RecorderBackend>,
        store: Arc<dyn MeetingStore>,
        config: RecordingConfig,
    ) -> Self {
        Self {
            backend,
            store,
            config,
            status: SessionStatus::Idle,
            session: None,
            transcript: TranscriptAssembler::new(),
            speakers: SpeakerRegistry::new(),
            insights: LiveInsightsAggregator::new(),
            duration_seconds: 0,
            audio_level: 0.0,
            partial_caption: None,
            last_error: None,
            last_meeting_id: None,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn transcript(&self) -> &TranscriptAssembler {
        &self.transcript
    }

    pub fn speakers(&self) -> &SpeakerRegistry {
        &self.speakers
    }

    pub fn insights(&self) -> &LiveInsightSnapshot {
        self.insights.current()
    }

    pub fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }

    pub fn audio_level(&self) -> f32 {
        self.audio_level
    }

    pub fn partial_caption(&self) -> Option<&str> {
        self.partial_caption.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Id of the meeting persisted by the most recent completed session.
    pub fn last_meeting_id(&self) -> Option<Uuid> {
        self.last_meeting_id
    }

    /// Enter device selection and return the device list.
    ///
    /// The list is fetched fresh on every entry; availability can change
    /// between sessions, so nothing is cached.
    pub async fn select_device(&mut self) -> Result<Vec<Device>, SessionError> {
        match self.status {
            SessionStatus::Idle | SessionStatus::SelectingDevice => {}
            state => {
                return Err(SessionError::InvalidTransition {
                    op: "select_device",
                    state,
                })
            }
        }

        match self.backend.list_devices().await {
            Ok(devices) => {
                self.status = SessionStatus::SelectingDevice;
                Ok(devices)
            }
            Err(e) => {
                self.status = SessionStatus::Idle;
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Leave device selection without starting. Never calls the backend.
    pub fn cancel_selection(&mut self) {
        if self.status == SessionStatus::SelectingDevice {
            self.status = SessionStatus::Idle;
        }
    }

    /// Confirm a device and enter `recording`.
    ///
    /// Opens the event channel, then calls the backend `start`; both must
    /// succeed or the transition aborts back to `idle` with the channel
    /// closed. On success the caller receives the channel's receiving half
    /// to drive (see [`spawn_event_pump`]); per-session state starts empty.
    pub async fn confirm_device(
        &mut self,
        device_id: &str,
        title: Option<String>,
    ) -> Result<EventChannel, SessionError> {
        if self.status != SessionStatus::SelectingDevice {
            return Err(SessionError::InvalidTransition {
                op: "confirm_device",
                state: self.status,
            });
        }

        let (events, channel) = channel::channel(self.config.channel_capacity);

        let opts = StartOptions {
            device_id: device_id.to_string(),
            title: title.clone(),
        };
        if let Err(e) = self.backend.start(events, opts).await {
            // The channel opened above is dropped (closed) with this frame.
            self.status = SessionStatus::Idle;
            self.last_error = Some(e.to_string());
            return Err(e);
        }

        self.transcript.clear();
        self.speakers.clear();
        self.insights.clear();
        self.duration_seconds = 0;
        self.audio_level = 0.0;
        self.partial_caption = None;
        self.last_error = None;
        self.last_meeting_id = None;
        self.session = Some(Session::new(device_id.to_string(), title));
        self.set_status(SessionStatus::Recording);

        info!(
            "Recording started on device {} via {} backend",
            device_id,
            self.backend.name()
        );

        Ok(channel)
    }

    pub fn pause(&mut self) -> Result<(), SessionError> {
        if self.status != SessionStatus::Recording {
            return Err(SessionError::InvalidTransition {
                op: "pause",
                state: self.status,
            });
        }
        self.set_status(SessionStatus::Paused);
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), SessionError> {
        if self.status != SessionStatus::Paused {
            return Err(SessionError::InvalidTransition {
                op: "resume",
                state: self.status,
            });
        }
        self.set_status(SessionStatus::Recording);
        Ok(())
    }

    /// Stop recording and enter `processing`.
    ///
    /// A no-op outside `recording`/`paused`, so a duplicate stop never
    /// reaches the backend. The controller moves to `processing` even when
    /// the backend rejects the call: the recording may still be ending on
    /// the backend side, and a later `status` event resolves the state.
    pub async fn stop(&mut self) -> Result<(), SessionError> {
        if !self.status.is_open() {
            debug!("Ignoring stop while {}", self.status);
            return Ok(());
        }

        if let Err(e) = self.backend.stop().await {
            warn!("Recorder stop call failed, processing anyway: {}", e);
        }

        self.partial_caption = None;
        self.set_status(SessionStatus::Processing);
        Ok(())
    }

    /// Advance the recording clock by one second.
    ///
    /// Driven by a periodic task independent of the transport. Counts only
    /// while `recording`, which makes duplicate stops and ticks that land
    /// during `processing` harmless.
    pub fn tick(&mut self) {
        if self.status == SessionStatus::Recording {
            self.duration_seconds += 1;
        }
    }

    /// Retroactively rename a speaker for this session.
    /// Returns false when the speaker has not been sighted yet.
    pub fn rename_speaker(&mut self, speaker_id: &str, display_name: &str) -> bool {
        self.speakers.rename(speaker_id, display_name)
    }

    /// Consume one protocol event.
    ///
    /// Events arriving outside an open or processing session are stale
    /// channel traffic and are dropped.
    pub async fn handle_event(&mut self, event: SessionEvent) {
        if !self.status.is_open() && self.status != SessionStatus::Processing {
            debug!("Dropping event received while {}", self.status);
            return;
        }

        match event {
            SessionEvent::TranscriptUpdate {
                speaker_id,
                speaker_name,
                text,
                is_final,
            } => {
                self.speakers.register(&speaker_id, speaker_name.as_deref());
                if is_final {
                    self.partial_caption = None;
                    self.transcript
                        .append(&speaker_id, &text, self.duration_seconds);
                } else {
                    self.partial_caption = Some(text);
                }
            }
            SessionEvent::AudioLevel { value } => {
                self.audio_level = value.clamp(0.0, 1.0);
            }
            SessionEvent::LiveSummary { data } => {
                self.insights.merge(data);
            }
            SessionEvent::Status {
                value,
                error,
                summary,
            } => match value {
                StatusValue::Processing => {
                    debug!("Backend reported processing");
                }
                StatusValue::Complete => self.finalize(summary).await,
                StatusValue::Error => {
                    self.fail_session(error.unwrap_or_else(|| "backend reported an error".into()));
                }
            },
            SessionEvent::Unknown => {}
        }
    }

    /// React to the event channel closing.
    ///
    /// A close before the terminal status arrived means the session cannot
    /// be trusted as complete; it fails and its partial state is discarded.
    pub fn handle_channel_closed(&mut self) {
        if self.status.is_open() || self.status == SessionStatus::Processing {
            self.fail_session("event channel closed before the session completed".to_string());
        }
    }

    /// Return to `idle` after a completed or failed session.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        if !self.status.is_terminal() {
            return Err(SessionError::InvalidTransition {
                op: "reset",
                state: self.status,
            });
        }

        self.session = None;
        self.transcript.clear();
        self.speakers.clear();
        self.insights.clear();
        self.duration_seconds = 0;
        self.audio_level = 0.0;
        self.partial_caption = None;
        self.last_error = None;
        self.status = SessionStatus::Idle;
        Ok(())
    }

    /// Assemble and persist the Meeting artifact, then enter `complete`.
    ///
    /// Fields missing from the backend-computed summary fall back to the
    /// live insight state so a session without final analysis still yields
    /// a useful record.
    async fn finalize(&mut self, summary: Option<FinalSummary>) {
        if self.status != SessionStatus::Processing {
            warn!("Ignoring complete status while {}", self.status);
            return;
        }

        let Some(session) = self.session.clone() else {
            self.fail_session("complete status arrived without an open session".to_string());
            return;
        };

        let summary = summary.unwrap_or_default();
        let insights = self.insights.current().clone();
        let date = Utc::now();

        let title = summary
            .title
            .or_else(|| session.title.clone())
            .or_else(|| insights.topic.clone())
            .unwrap_or_else(|| format!("Meeting {}", session.started_at.format("%Y-%m-%d %H:%M")));
        let executive_summary = summary.executive_summary.or_else(|| insights.topic.clone());
        let highlights = if summary.highlights.is_empty() {
            insights.key_points.clone()
        } else {
            summary.highlights
        };
        let tasks = if summary.tasks.is_empty() {
            insights
                .action_items
                .iter()
                .map(|a| TaskItem {
                    description: a.text.clone(),
                    assignee: a.assignee.clone(),
                })
                .collect()
        } else {
            summary.tasks
        };

        let meeting = Meeting {
            id: Uuid::new_v4(),
            title,
            date,
            duration_seconds: self.duration_seconds,
            speakers: self.speakers.resolved_names(),
            transcript: self.transcript.render(&self.speakers),
            segments: self.transcript.resolved(&self.speakers),
            executive_summary,
            highlights,
            tasks,
            tags: Vec::new(),
        };

        match self.store.create(meeting).await {
            Ok(stored) => {
                info!(
                    "Session {} finalized into meeting {} ({} segments, {}s)",
                    session.id,
                    stored.id,
                    stored.segments.len(),
                    stored.duration_seconds
                );
                self.last_meeting_id = Some(stored.id);
                self.set_status(SessionStatus::Complete);
            }
            Err(e) => {
                self.fail_session(format!("failed to persist meeting: {e}"));
            }
        }
    }

    /// Terminal failure: discard the partial transcript and insights so a
    /// half-received session cannot be mistaken for a complete one.
    fn fail_session(&mut self, reason: String) {
        warn!("Session failed: {}", reason);
        self.transcript.clear();
        self.speakers.clear();
        self.insights.clear();
        self.partial_caption = None;
        self.last_error = Some(reason);
        self.set_status(SessionStatus::Error);
    }

    fn set_status(&mut self, status: SessionStatus) {
        info!("Session state: {} -> {}", self.status, status);
        self.status = status;
        if let Some(session) = self.session.as_mut() {
            session.status = status;
        }
    }
}

/// Drive a session's event channel and recording clock to completion.
///
/// One task per session: it interleaves channel receives with one-second
/// ticks, forwarding both into the controller under its mutex, and exits
/// once the session reaches a terminal state or the channel closes. The
/// channel is dropped on exit, which closes the transport.
pub fn spawn_event_pump(
    controller: Arc<Mutex<RecordingSessionController>>,
    mut channel: EventChannel,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let period = Duration::from_secs(1);
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);

        loop {
            tokio::select! {
                event = channel.next() => match event {
                    Some(event) => {
                        let mut ctrl = controller.lock().await;
                        ctrl.handle_event(event).await;
                        if ctrl.status().is_terminal() {
                            break;
                        }
                    }
                    None => {
                        controller.lock().await.handle_channel_closed();
                        break;
                    }
                },
                _ = ticker.tick() => {
                    controller.lock().await.tick();
                }
            }
        }
    })
}
