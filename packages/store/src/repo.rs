//! # Remote store adapter: the collection behind the journal
//!
//! [`EntryStore`] is the contract every backend implements. The journal never talks
//! to a backend directly; it subscribes to snapshots and issues create, update and
//! delete calls through this trait, so the same logic works against an in-process
//! store ([`crate::MemoryStore`]), a JSON file ([`crate::FileStore`]), IndexedDB
//! ([`crate::IdbStore`]) or a hosted document database.
//!
//! ## Snapshots
//!
//! A [`Subscription`] yields the **complete** current listing of the collection, never
//! a delta: once immediately after subscribing, then again after every change. A
//! backend failure arrives in-band as `Err(StoreError)` and ends the stream.
//!
//! Snapshot order is whatever order the backend keeps (insertion order for the bundled
//! adapters). Consumers sort for presentation.
//!
//! ## Teardown
//!
//! Dropping a [`Subscription`] (or calling [`Subscription::unsubscribe`]) closes its
//! channel. Backends prune closed listeners on their next publish, and nothing is ever
//! delivered to a closed subscription.

use tokio::sync::mpsc;

use crate::error::StoreError;
use crate::models::{Entry, EntryFields};

/// One notification from a subscription.
pub type SnapshotEvent = Result<Vec<Entry>, StoreError>;

/// Async interface to a collection of entries.
pub trait EntryStore {
    /// Start listening for snapshots of the whole collection.
    fn subscribe(&self) -> Subscription;

    /// Insert a new entry. The store assigns `id` and `created_at` and returns the id.
    fn create(
        &self,
        fields: EntryFields,
    ) -> impl std::future::Future<Output = Result<String, StoreError>>;

    /// Replace every writable field of an existing entry.
    fn update(
        &self,
        id: &str,
        fields: EntryFields,
    ) -> impl std::future::Future<Output = Result<(), StoreError>>;

    /// Remove an entry. Removing an id that no longer exists is not an error.
    fn delete(&self, id: &str) -> impl std::future::Future<Output = Result<(), StoreError>>;
}

/// Receiving end of a snapshot stream.
#[derive(Debug)]
pub struct Subscription {
    rx: mpsc::UnboundedReceiver<SnapshotEvent>,
}

/// Sending end held by a backend, one per live subscription.
#[derive(Clone, Debug)]
pub struct Listener {
    tx: mpsc::UnboundedSender<SnapshotEvent>,
}

impl Subscription {
    /// Create a connected listener/subscription pair.
    pub fn channel() -> (Listener, Subscription) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Listener { tx }, Subscription { rx })
    }

    /// Wait for the next snapshot. Returns `None` once the backend has dropped the
    /// listener (after an error, or when the store itself goes away).
    pub async fn next(&mut self) -> Option<SnapshotEvent> {
        self.rx.recv().await
    }

    /// Non-blocking variant of [`next`](Self::next).
    pub fn try_next(&mut self) -> Option<SnapshotEvent> {
        self.rx.try_recv().ok()
    }

    /// Tear down the subscription. Equivalent to dropping it.
    pub fn unsubscribe(mut self) {
        self.rx.close();
    }
}

impl Listener {
    /// Push a snapshot. Returns `false` if the subscription is gone.
    pub fn send(&self, event: SnapshotEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
