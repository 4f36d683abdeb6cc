use serde::{Deserialize, Serialize};

/// One incremental AI-generated summary of the conversation so far.
///
/// Every field is independently optional; a snapshot on the wire updates
/// only the fields it carries values for. The same struct serves as the
/// wire payload and the aggregated state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LiveInsightSnapshot {
    pub topic: Option<String>,
    /// Classified meeting kind (standup, interview, planning, ...).
    pub meeting_type: Option<String>,
    /// Classifier confidence for `meeting_type`, `0.0..=1.0`.
    pub confidence: Option<f32>,
    /// Overall tone (productive, tense, casual, ...).
    pub sentiment: Option<String>,
    pub key_points: Vec<String>,
    pub action_items: Vec<ActionItem>,
    pub decisions: Vec<String>,
    /// Contextual follow-up questions suggested by the analyst.
    pub suggested_questions: Vec<String>,
}

impl LiveInsightSnapshot {
    pub fn is_empty(&self) -> bool {
        self.topic.is_none()
            && self.meeting_type.is_none()
            && self.confidence.is_none()
            && self.sentiment.is_none()
            && self.key_points.is_empty()
            && self.action_items.is_empty()
            && self.decisions.is_empty()
            && self.suggested_questions.is_empty()
    }
}

/// Something someone committed to do.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionItem {
    pub text: String,
    #[serde(default)]
    pub assignee: Option<String>,
}

/// Latest-known insight state with a monotonic-improvement merge.
///
/// Successive partial snapshots from the AI provider must never make the
/// display flicker back to empty: a populated field is only ever replaced
/// by a populated newer value.
#[derive(Debug, Default)]
pub struct LiveInsightsAggregator {
    current: LiveInsightSnapshot,
    updates_applied: u64,
}

impl LiveInsightsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one incoming snapshot, field by field.
    ///
    /// Scalars: a present value overwrites, an absent one leaves the prior
    /// value untouched. Lists: a non-empty incoming list replaces the old
    /// one; an empty incoming list means "no new information yet" and is
    /// ignored.
    pub fn merge(&mut self, incoming: LiveInsightSnapshot) {
        if let Some(topic) = incoming.topic {
            self.current.topic = Some(topic);
        }
        if let Some(meeting_type) = incoming.meeting_type {
            self.current.meeting_type = Some(meeting_type);
        }
        if let Some(confidence) = incoming.confidence {
            self.current.confidence = Some(confidence);
        }
        if let Some(sentiment) = incoming.sentiment {
            self.current.sentiment = Some(sentiment);
        }
        if !incoming.key_points.is_empty() {
            self.current.key_points = incoming.key_points;
        }
        if !incoming.action_items.is_empty() {
            self.current.action_items = incoming.action_items;
        }
        if !incoming.decisions.is_empty() {
            self.current.decisions = incoming.decisions;
        }
        if !incoming.suggested_questions.is_empty() {
            self.current.suggested_questions = incoming.suggested_questions;
        }
        self.updates_applied += 1;
    }

    /// Latest aggregated state.
    pub fn current(&self) -> &LiveInsightSnapshot {
        &self.current
    }

    /// How many snapshots have been merged this session.
    pub fn updates_applied(&self) -> u64 {
        self.updates_applied
    }

    pub fn clear(&mut self) {
        self.current = LiveInsightSnapshot::default();
        self.updates_applied = 0;
    }
}
