use serde::{Deserialize, Serialize};

use super::speakers::SpeakerRegistry;

/// One finalized, attributed slice of transcript text.
///
/// Immutable once appended. `sequence_number` is the sole ordering key;
/// wall-clock timestamps from the source are advisory only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranscriptSegment {
    pub sequence_number: u64,
    pub speaker_id: String,
    pub text: String,
    /// Seconds since recording started, taken from the session duration
    /// counter at arrival time.
    pub offset_seconds: u64,
}

/// A segment with its speaker id resolved to a display name, for rendering
/// and for the finalized Meeting artifact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttributedSegment {
    pub sequence_number: u64,
    pub speaker: String,
    pub text: String,
    pub offset_seconds: u64,
}

/// Append-only transcript log.
///
/// Segments keep their sequence number and position forever; reads are
/// projections over the immutable log and can be restarted at any time.
#[derive(Debug, Default)]
pub struct TranscriptAssembler {
    segments: Vec<TranscriptSegment>,
    next_sequence: u64,
}

impl TranscriptAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one finalized fragment, allocating the next sequence number.
    pub fn append(&mut self, speaker_id: &str, text: &str, offset_seconds: u64) -> &TranscriptSegment {
        let segment = TranscriptSegment {
            sequence_number: self.next_sequence,
            speaker_id: speaker_id.to_string(),
            text: text.to_string(),
            offset_seconds,
        };
        self.next_sequence += 1;
        self.segments.push(segment);
        self.segments.last().expect("segment just pushed")
    }

    /// Restartable read-only view over the log, in append order.
    pub fn segments(&self) -> impl Iterator<Item = &TranscriptSegment> + '_ {
        self.segments.iter()
    }

    /// Segments with speaker ids resolved through the registry.
    pub fn resolved(&self, speakers: &SpeakerRegistry) -> Vec<AttributedSegment> {
        self.segments
            .iter()
            .map(|s| AttributedSegment {
                sequence_number: s.sequence_number,
                speaker: speakers.resolve(&s.speaker_id),
                text: s.text.clone(),
                offset_seconds: s.offset_seconds,
            })
            .collect()
    }

    /// Flattened speaker-resolved rendering, one `[MM:SS] Name: text` line
    /// per segment.
    pub fn render(&self, speakers: &SpeakerRegistry) -> String {
        self.segments
            .iter()
            .map(|s| {
                format!(
                    "[{}] {}: {}",
                    format_offset(s.offset_seconds),
                    speakers.resolve(&s.speaker_id),
                    s.text
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Drop all segments. Used when a failed session discards its partial
    /// transcript and on reset; the sequence counter restarts with the log.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.next_sequence = 0;
    }
}

/// Format a recording-relative offset as `MM:SS` (hours roll into minutes).
pub fn format_offset(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
