use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use super::meeting::{Meeting, MeetingPatch};
use super::MeetingStore;

/// In-memory meeting store keyed by meeting id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    meetings: RwLock<HashMap<Uuid, Meeting>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MeetingStore for MemoryStore {
    async fn create(&self, meeting: Meeting) -> Result<Meeting> {
        let mut meetings = self.meetings.write().await;
        info!("Storing meeting {} ({})", meeting.id, meeting.title);
        meetings.insert(meeting.id, meeting.clone());
        Ok(meeting)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Meeting>> {
        let meetings = self.meetings.read().await;
        Ok(meetings.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Meeting>> {
        let meetings = self.meetings.read().await;
        let mut all: Vec<Meeting> = meetings.values().cloned().collect();
        all.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(all)
    }

    async fn update(&self, id: Uuid, patch: MeetingPatch) -> Result<Option<Meeting>> {
        let mut meetings = self.meetings.write().await;
        match meetings.get_mut(&id) {
            Some(meeting) => {
                meeting.apply(&patch);
                Ok(Some(meeting.clone()))
            }
            None => Ok(None),
        }
    }
}
