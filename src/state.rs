use crate::storage::{FileStore, load_tracker};
use crate::tracker::Tracker;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Tracker plus the store it is persisted to, guarded together so every
/// mutation is saved under the same lock.
#[derive(Debug)]
pub struct Session {
    pub tracker: Tracker,
    pub store: FileStore,
}

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new(store: FileStore) -> Self {
        let tracker = load_tracker(&store);
        Self {
            session: Arc::new(Mutex::new(Session { tracker, store })),
        }
    }
}
