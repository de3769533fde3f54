//! In-process collection shared by the bundled adapters: the entries in insertion
//! order plus the listeners that receive a snapshot after every change.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex as AsyncMutex, MutexGuard as AsyncMutexGuard};
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Entry, EntryFields};
use crate::repo::{Listener, Subscription};

/// Keeps writes to an async backend one at a time, so a slow write cannot interleave
/// with another between its backend call and its collection update.
#[cfg_attr(not(all(target_arch = "wasm32", feature = "web")), allow(dead_code))]
#[derive(Clone, Debug, Default)]
pub(crate) struct WriteQueue(Arc<AsyncMutex<()>>);

#[cfg_attr(not(all(target_arch = "wasm32", feature = "web")), allow(dead_code))]
impl WriteQueue {
    /// Wait for the writes ahead to finish. The turn lasts as long as the guard.
    pub(crate) async fn turn(&self) -> AsyncMutexGuard<'_, ()> {
        self.0.lock().await
    }
}

#[derive(Debug, Default)]
pub(crate) struct Collection {
    entries: Vec<Entry>,
    listeners: Vec<Listener>,
}

impl Collection {
    pub(crate) fn with_entries(entries: Vec<Entry>) -> Self {
        Self {
            entries,
            listeners: Vec::new(),
        }
    }

    pub(crate) fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub(crate) fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Register a listener and hand it the current snapshot right away.
    pub(crate) fn subscribe(&mut self) -> Subscription {
        let (listener, subscription) = Subscription::channel();
        listener.send(Ok(self.entries.clone()));
        self.listeners.push(listener);
        subscription
    }

    pub(crate) fn insert(&mut self, fields: EntryFields) -> String {
        let id = Uuid::new_v4().simple().to_string();
        self.entries
            .push(Entry::from_fields(id.clone(), fields, Some(Utc::now())));
        id
    }

    pub(crate) fn replace(&mut self, id: &str, fields: EntryFields) -> Result<(), StoreError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        entry.apply(fields);
        Ok(())
    }

    /// Returns whether anything was removed.
    pub(crate) fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Swap the whole listing, returning the previous one.
    pub(crate) fn restore(&mut self, entries: Vec<Entry>) -> Vec<Entry> {
        std::mem::replace(&mut self.entries, entries)
    }

    /// Send the current snapshot to every live listener, forgetting closed ones.
    pub(crate) fn publish(&mut self) {
        let snapshot = self.entries.clone();
        self.listeners
            .retain(|listener| listener.send(Ok(snapshot.clone())));
        tracing::debug!(
            entries = snapshot.len(),
            listeners = self.listeners.len(),
            "published snapshot"
        );
    }

    /// Deliver `error` to every listener and end their streams.
    pub(crate) fn fail(&mut self, error: StoreError) {
        for listener in self.listeners.drain(..) {
            listener.send(Err(error.clone()));
        }
    }

    pub(crate) fn live_listeners(&mut self) -> usize {
        self.listeners.retain(|listener| !listener.is_closed());
        self.listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicBool, Ordering};

    fn fields(title: &str) -> EntryFields {
        EntryFields {
            title: title.to_string(),
            content: "body".to_string(),
            image_url: None,
            display_date: "2024-06-01".to_string(),
        }
    }

    #[tokio::test]
    async fn test_write_waits_for_the_one_ahead() {
        let queue = WriteQueue::default();
        let landed = Arc::new(AtomicBool::new(false));

        let first = queue.turn().await;
        let waiting = tokio::spawn({
            let queue = queue.clone();
            let landed = landed.clone();
            async move {
                let _turn = queue.turn().await;
                landed.store(true, Ordering::SeqCst);
            }
        });

        tokio::task::yield_now().await;
        assert!(!landed.load(Ordering::SeqCst));

        drop(first);
        waiting.await.unwrap();
        assert!(landed.load(Ordering::SeqCst));
    }

    #[test]
    fn test_replace_after_remove_is_not_found() {
        let mut collection = Collection::default();
        let id = collection.insert(fields("Gone soon"));
        assert!(collection.get(&id).is_some());

        assert!(collection.remove(&id));
        assert!(collection.get(&id).is_none());
        assert!(matches!(
            collection.replace(&id, fields("Too late")),
            Err(StoreError::NotFound(missing)) if missing == id
        ));
        assert!(collection.entries().is_empty());
    }
}
