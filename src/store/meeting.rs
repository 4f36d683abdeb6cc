use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::transcript::AttributedSegment;

/// The immutable record persisted after a session completes.
///
/// Assembled once, at finalization, from the transcript log, the speaker
/// registry and the last insight state (or the backend-computed summary).
/// Afterwards it changes only through explicit user edits routed through
/// the store, never through the session objects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meeting {
    pub id: Uuid,
    pub title: String,
    pub date: DateTime<Utc>,
    pub duration_seconds: u64,
    /// Resolved speaker names in first-seen order.
    pub speakers: Vec<String>,
    /// Flattened speaker-resolved transcript text.
    pub transcript: String,
    /// The same transcript as ordered attributed segments.
    pub segments: Vec<AttributedSegment>,
    pub executive_summary: Option<String>,
    pub highlights: Vec<String>,
    pub tasks: Vec<TaskItem>,
    pub tags: Vec<String>,
}

/// A follow-up captured in the final analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskItem {
    pub description: String,
    #[serde(default)]
    pub assignee: Option<String>,
}

/// An explicit user edit to a stored meeting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MeetingPatch {
    pub title: Option<String>,
    pub executive_summary: Option<String>,
    pub add_tags: Vec<String>,
    pub remove_tags: Vec<String>,
}

impl Meeting {
    pub fn apply(&mut self, patch: &MeetingPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(summary) = &patch.executive_summary {
            self.executive_summary = Some(summary.clone());
        }
        for tag in &patch.add_tags {
            if !self.tags.contains(tag) {
                self.tags.push(tag.clone());
            }
        }
        self.tags.retain(|t| !patch.remove_tags.contains(t));
    }
}
