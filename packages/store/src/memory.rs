use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::collection::Collection;
use crate::error::StoreError;
use crate::models::{Entry, EntryFields};
use crate::repo::{EntryStore, Subscription};

/// In-memory EntryStore for testing and as a session-only fallback.
///
/// Clones share the same collection, so a clone handed to the UI sees the writes
/// made through any other clone.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    collection: Arc<Mutex<Collection>>,
    offline: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While offline every write fails with [`StoreError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Push `error` to every live subscription and end them.
    pub fn fail_subscriptions(&self, error: StoreError) {
        self.lock().fail(error);
    }

    /// Number of subscriptions that have not been torn down.
    pub fn subscriber_count(&self) -> usize {
        self.lock().live_listeners()
    }

    /// Current listing in store order.
    pub fn entries(&self) -> Vec<Entry> {
        self.lock().entries().to_vec()
    }

    fn lock(&self) -> MutexGuard<'_, Collection> {
        // A panic while holding the lock leaves the Vec intact; keep serving it.
        self.collection
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("store is offline".to_string()));
        }
        Ok(())
    }
}

impl EntryStore for MemoryStore {
    fn subscribe(&self) -> Subscription {
        self.lock().subscribe()
    }

    async fn create(&self, fields: EntryFields) -> Result<String, StoreError> {
        self.check_online()?;
        let mut collection = self.lock();
        let id = collection.insert(fields);
        collection.publish();
        Ok(id)
    }

    async fn update(&self, id: &str, fields: EntryFields) -> Result<(), StoreError> {
        self.check_online()?;
        let mut collection = self.lock();
        collection.replace(id, fields)?;
        collection.publish();
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.check_online()?;
        let mut collection = self.lock();
        if collection.remove(id) {
            collection.publish();
        }
        Ok(())
    }
}
