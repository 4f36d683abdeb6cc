use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::backend::RecorderBackend;
use crate::config::RecordingConfig;
use crate::session::RecordingSessionController;
use crate::store::MeetingStore;

/// Shared application state for HTTP handlers.
///
/// One recording session per service instance: the controller sits behind
/// a single mutex, and the pump handle tracks the task draining the
/// current session's event channel.
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<Mutex<RecordingSessionController>>,
    pub store: Arc<dyn MeetingStore>,
    pub pump: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl AppState {
    pub fn new(
        backend: Arc<dyn RecorderBackend>,
        store: Arc<dyn MeetingStore>,
        config: RecordingConfig,
    ) -> Self {
        let controller = RecordingSessionController::new(backend, Arc::clone(&store), config);
        Self {
            controller: Arc::new(Mutex::new(controller)),
            store,
            pump: Arc::new(Mutex::new(None)),
        }
    }
}
