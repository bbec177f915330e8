//! Shared state handed to request handlers.

use query_engine_execution::store::TaskStore;

use crate::watcher::TaskEvents;

/// Collaborators are injected here at startup rather than living in
/// process-wide globals.
#[derive(Clone)]
pub struct AppState {
    pub store: TaskStore,
    pub events: TaskEvents,
}
