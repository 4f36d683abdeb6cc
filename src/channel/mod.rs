//! Session event channel
//!
//! One logical channel per recording session carries the discriminated
//! protocol messages between the recorder backend and the session
//! controller:
//! - `transcript_update` - attributed transcript fragments
//! - `audio_level` - advisory input level for meters
//! - `live_summary` - incremental AI insight snapshots
//! - `status` - lifecycle status (processing / complete / error)

pub mod messages;
pub mod transport;

pub use messages::{FinalSummary, SessionEvent, StatusValue};
pub use transport::{channel, ChannelClosed, EventChannel, EventSender, DEFAULT_CHANNEL_CAPACITY};
