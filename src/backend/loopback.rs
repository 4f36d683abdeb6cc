use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::info;

use super::{Device, RecorderBackend, StartOptions};
use crate::channel::{EventSender, SessionEvent, StatusValue};
use crate::session::SessionError;

/// In-process recorder backend that replays a scripted event sequence.
///
/// Stands in for the capture/STT stack in tests and local development:
/// `start` feeds the configured script over the event channel at a fixed
/// pace, `stop` emits the terminal `processing`/`complete` status pair the
/// way a real backend finalizes a recording.
pub struct LoopbackBackend {
    devices: Vec<Device>,
    pacing: Duration,
    // Locks are never held across an await.
    script: Mutex<Vec<SessionEvent>>,
    events: Mutex<Option<EventSender>>,
    feed: Mutex<Option<JoinHandle<()>>>,
}

impl LoopbackBackend {
    pub fn new() -> Self {
        Self {
            devices: vec![Device {
                id: "microphone".to_string(),
                name: "Microphone".to_string(),
                available: true,
            }],
            pacing: Duration::from_millis(250),
            script: Mutex::new(Vec::new()),
            events: Mutex::new(None),
            feed: Mutex::new(None),
        }
    }

    pub fn with_devices(mut self, devices: Vec<Device>) -> Self {
        self.devices = devices;
        self
    }

    /// Events to replay once `start` is called, in order.
    pub fn with_script(self, script: Vec<SessionEvent>) -> Self {
        *self.script.lock().expect("script lock") = script;
        self
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }
}

impl Default for LoopbackBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecorderBackend for LoopbackBackend {
    async fn list_devices(&self) -> Result<Vec<Device>, SessionError> {
        Ok(self.devices.clone())
    }

    async fn start(&self, events: EventSender, opts: StartOptions) -> Result<(), SessionError> {
        let device = self
            .devices
            .iter()
            .find(|d| d.id == opts.device_id)
            .ok_or_else(|| SessionError::Device(format!("unknown device: {}", opts.device_id)))?;
        if !device.available {
            return Err(SessionError::Device(format!(
                "device is not available: {}",
                device.name
            )));
        }

        info!("Loopback capture started on {}", device.name);

        let script = std::mem::take(&mut *self.script.lock().expect("script lock"));
        *self.events.lock().expect("events lock") = Some(events.clone());

        let pacing = self.pacing;
        let feed = tokio::spawn(async move {
            for event in script {
                if events.send(&event).await.is_err() {
                    break;
                }
                tokio::time::sleep(pacing).await;
            }
        });
        *self.feed.lock().expect("feed lock") = Some(feed);

        Ok(())
    }

    async fn stop(&self) -> Result<(), SessionError> {
        if let Some(feed) = self.feed.lock().expect("feed lock").take() {
            feed.abort();
        }

        let events = self.events.lock().expect("events lock").take();
        let Some(events) = events else {
            return Err(SessionError::Lifecycle {
                call: "stop",
                reason: "no capture in progress".to_string(),
            });
        };

        info!("Loopback capture stopped, finalizing");

        let _ = events
            .send(&SessionEvent::Status {
                value: StatusValue::Processing,
                error: None,
                summary: None,
            })
            .await;
        let _ = events
            .send(&SessionEvent::Status {
                value: StatusValue::Complete,
                error: None,
                summary: None,
            })
            .await;

        Ok(())
    }

    fn name(&self) -> &str {
        "loopback"
    }
}
