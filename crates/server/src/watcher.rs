//! Fan-out of task change events to streaming watchers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tokio::sync::mpsc;

use query_engine_execution::task::Task;

/// A task change notification pushed to watchers.
#[derive(Debug, Clone, Serialize)]
pub struct TaskEvent {
    pub action: TaskAction,
    pub task: Task,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskAction {
    Created,
    Updated,
    Deleted,
}

/// Identifies one registered watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatcherId(u64);

const WATCHER_BUFFER: usize = 16;

/// Registry of live watchers, guarded by a lock.
///
/// Publishing delivers the event to every watcher registered at that moment.
/// A watcher that stopped draining its channel is skipped rather than
/// blocking the publisher.
#[derive(Clone, Default)]
pub struct TaskEvents {
    inner: Arc<Mutex<Registry>>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    watchers: HashMap<WatcherId, mpsc::Sender<TaskEvent>>,
}

impl TaskEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a watcher. Events published from now on are delivered to
    /// the returned receiver until [`TaskEvents::unsubscribe`] is called.
    pub fn subscribe(&self) -> (WatcherId, mpsc::Receiver<TaskEvent>) {
        let (sender, receiver) = mpsc::channel(WATCHER_BUFFER);
        let mut registry = self.lock();
        registry.next_id += 1;
        let id = WatcherId(registry.next_id);
        registry.watchers.insert(id, sender);
        tracing::debug!(watcher = id.0, "registered watcher");
        (id, receiver)
    }

    pub fn unsubscribe(&self, id: WatcherId) {
        self.lock().watchers.remove(&id);
        tracing::debug!(watcher = id.0, "unregistered watcher");
    }

    /// Deliver an event to every currently registered watcher.
    pub fn publish(&self, event: &TaskEvent) {
        let registry = self.lock();
        tracing::debug!(watchers = registry.watchers.len(), "publishing event");
        for sender in registry.watchers.values() {
            // ignore watchers with a full or closed channel
            let _ = sender.try_send(event.clone());
        }
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
