use serde::Serialize;

/// Fixed per-session speaker color palette. Assignment cycles with
/// wraparound once all eight are in use.
const PALETTE: [&str; 8] = [
    "#3b82f6", // blue
    "#ef4444", // red
    "#22c55e", // green
    "#f59e0b", // amber
    "#a855f7", // purple
    "#14b8a6", // teal
    "#ec4899", // pink
    "#f97316", // orange
];

/// One detected voice in the current session.
#[derive(Debug, Clone, Serialize)]
pub struct SpeakerIdentity {
    /// Backend-assigned id, never reused across sessions.
    pub speaker_id: String,
    /// Palette color assigned at first sighting, stable for the session.
    pub color: String,
    /// True while the backend has produced no human-readable name.
    pub is_auto_identified: bool,
    /// Human-readable label from the diarization backend, if any.
    pub backend_name: Option<String>,
    /// User-entered rename; overrides everything at resolution time.
    pub display_name: Option<String>,
}

/// Per-session speaker registry.
///
/// Assigns stable colors to speaker ids as they first appear and holds the
/// user rename map. Renaming only changes what [`SpeakerRegistry::resolve`]
/// returns; it never rewrites transcript segments, so the assembler's log
/// stays append-only.
#[derive(Debug, Default)]
pub struct SpeakerRegistry {
    /// First-seen order; the index drives palette assignment.
    identities: Vec<SpeakerIdentity>,
}

impl SpeakerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sighting of `speaker_id`.
    ///
    /// First sighting assigns the next palette color. A backend name that
    /// arrives on a later sighting is adopted if none is known yet.
    pub fn register(&mut self, speaker_id: &str, backend_name: Option<&str>) {
        if let Some(identity) = self.identities.iter_mut().find(|s| s.speaker_id == speaker_id) {
            if identity.backend_name.is_none() {
                if let Some(name) = backend_name {
                    identity.backend_name = Some(name.to_string());
                    identity.is_auto_identified = false;
                }
            }
            return;
        }

        let color = PALETTE[self.identities.len() % PALETTE.len()].to_string();
        self.identities.push(SpeakerIdentity {
            speaker_id: speaker_id.to_string(),
            color,
            is_auto_identified: backend_name.is_none(),
            backend_name: backend_name.map(str::to_string),
            display_name: None,
        });
    }

    /// Set the user-entered display name for a known speaker.
    ///
    /// Retroactive over the whole session: every past and future segment
    /// attributed to `speaker_id` resolves to this name from now on.
    /// Returns false when the speaker has not been sighted.
    pub fn rename(&mut self, speaker_id: &str, display_name: &str) -> bool {
        match self.identities.iter_mut().find(|s| s.speaker_id == speaker_id) {
            Some(identity) => {
                identity.display_name = Some(display_name.to_string());
                true
            }
            None => false,
        }
    }

    /// Resolve the name to show for `speaker_id`:
    /// user rename, else backend name, else the raw id.
    pub fn resolve(&self, speaker_id: &str) -> String {
        self.identities
            .iter()
            .find(|s| s.speaker_id == speaker_id)
            .and_then(|s| s.display_name.as_deref().or(s.backend_name.as_deref()))
            .unwrap_or(speaker_id)
            .to_string()
    }

    pub fn get(&self, speaker_id: &str) -> Option<&SpeakerIdentity> {
        self.identities.iter().find(|s| s.speaker_id == speaker_id)
    }

    /// All identities in first-seen order.
    pub fn identities(&self) -> &[SpeakerIdentity] {
        &self.identities
    }

    /// Resolved names in first-seen order, for the Meeting artifact.
    pub fn resolved_names(&self) -> Vec<String> {
        self.identities
            .iter()
            .map(|s| self.resolve(&s.speaker_id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    pub fn clear(&mut self) {
        self.identities.clear();
    }
}
