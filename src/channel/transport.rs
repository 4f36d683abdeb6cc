use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;
use tracing::warn;

use super::messages::SessionEvent;

/// Default bound for the in-process event channel.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// The channel's peer has gone away (receiver dropped or sender closed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelClosed;

impl std::fmt::Display for ChannelClosed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "event channel closed")
    }
}

impl std::error::Error for ChannelClosed {}

/// Create one session event channel.
///
/// The sender half goes to the recorder backend, the receiver half to the
/// session controller. Frames are serialized JSON envelopes so the transport
/// carries exactly the wire protocol; within one channel instance they are
/// delivered in send order.
pub fn channel(capacity: usize) -> (EventSender, EventChannel) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (EventSender { tx }, EventChannel { rx })
}

/// Sending half of a session event channel, held by the recorder backend.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::Sender<Vec<u8>>,
}

impl EventSender {
    /// Publish one event, waiting for channel capacity.
    pub async fn send(&self, event: &SessionEvent) -> Result<(), ChannelClosed> {
        let payload = serde_json::to_vec(event).map_err(|_| ChannelClosed)?;
        self.tx.send(payload).await.map_err(|_| ChannelClosed)
    }

    /// Publish one event, dropping it when the channel is full.
    ///
    /// For advisory traffic (audio levels) where losing a frame under
    /// backpressure has no correctness impact.
    pub fn send_lossy(&self, event: &SessionEvent) {
        if let Ok(payload) = serde_json::to_vec(event) {
            let _ = self.tx.try_send(payload);
        }
    }

    /// Publish a raw envelope without going through [`SessionEvent`].
    ///
    /// Lets a newer backend emit message kinds this build does not know;
    /// the receiving side skips anything it cannot decode.
    pub async fn send_raw(&self, payload: Vec<u8>) -> Result<(), ChannelClosed> {
        self.tx.send(payload).await.map_err(|_| ChannelClosed)
    }

    /// Whether the receiving half is still attached.
    pub fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }
}

/// Receiving half of a session event channel, consumed by the controller.
///
/// Decodes each frame as it arrives; frames that fail to decode, and
/// envelopes of unknown type, are logged and skipped rather than surfaced
/// as errors.
#[derive(Debug)]
pub struct EventChannel {
    rx: mpsc::Receiver<Vec<u8>>,
}

impl EventChannel {
    /// Receive the next decodable event, or `None` once the channel closes.
    pub async fn recv(&mut self) -> Option<SessionEvent> {
        futures::StreamExt::next(self).await
    }

    /// Stop accepting new frames; already-buffered frames remain readable.
    pub fn close(&mut self) {
        self.rx.close();
    }
}

impl Stream for EventChannel {
    type Item = SessionEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            match self.rx.poll_recv(cx) {
                Poll::Ready(Some(frame)) => match serde_json::from_slice::<SessionEvent>(&frame) {
                    Ok(SessionEvent::Unknown) => continue,
                    Ok(event) => return Poll::Ready(Some(event)),
                    Err(e) => {
                        warn!("Skipping undecodable channel frame: {}", e);
                        continue;
                    }
                },
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
