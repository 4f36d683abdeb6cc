//! Meeting persistence
//!
//! The session core hands finalized Meeting records to a [`MeetingStore`]
//! and reads them back for the history and detail views. The trait only
//! requires create/get/list/update semantics; `MemoryStore` is the
//! in-process implementation.

pub mod meeting;
pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

pub use meeting::{Meeting, MeetingPatch, TaskItem};
pub use memory::MemoryStore;

/// Persistence boundary for finalized Meeting records.
#[async_trait]
pub trait MeetingStore: Send + Sync {
    /// Persist a newly finalized meeting and return the stored record.
    async fn create(&self, meeting: Meeting) -> Result<Meeting>;

    /// Fetch one meeting, `None` when unknown.
    async fn get(&self, id: Uuid) -> Result<Option<Meeting>>;

    /// All meetings, most recent first.
    async fn list(&self) -> Result<Vec<Meeting>>;

    /// Apply an explicit user edit to a stored meeting.
    /// Returns the updated record, `None` when unknown.
    async fn update(&self, id: Uuid, patch: MeetingPatch) -> Result<Option<Meeting>>;
}
