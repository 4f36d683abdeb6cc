use thiserror::Error;

use super::state::SessionStatus;

/// Typed errors surfaced by the session core.
///
/// The core never retries internally; callers decide whether an error is
/// recoverable (device problems return the machine to idle) or terminal
/// (channel loss ends the session).
#[derive(Debug, Error)]
pub enum SessionError {
    /// No usable capture device: missing, busy, or permission denied.
    #[error("device error: {0}")]
    Device(String),

    /// The event channel failed to open or dropped mid-session.
    #[error("event channel error: {0}")]
    Channel(String),

    /// A backend lifecycle call (`start`/`stop`) was rejected.
    #[error("recorder {call} call failed: {reason}")]
    Lifecycle { call: &'static str, reason: String },

    /// The summarization/analysis provider is not configured.
    ///
    /// Surfaced distinctly so the caller can prompt for configuration
    /// instead of retrying.
    #[error("analysis provider not configured: {0}")]
    ProviderConfig(String),

    /// The operation is not legal in the current session state.
    #[error("{op} is not valid while {state}")]
    InvalidTransition {
        op: &'static str,
        state: SessionStatus,
    },
}
