//! # IndexedDB entry store: browser-side persistence
//!
//! [`IdbStore`] is the [`EntryStore`] implementation used on the **web platform**.
//! It persists entries into the browser's IndexedDB via the [`rexie`] crate, so the
//! journal keeps its fragments across page reloads without any server of its own.
//!
//! ## Database schema
//!
//! One IndexedDB database per collection, named `"fragments-<collection>"`
//! (version 1), with a single object store:
//!
//! | IndexedDB store | Key | Value |
//! |-----------------|-----|-------|
//! | `"entries"` | entry id | the [`Entry`] serialised via `serde_wasm_bindgen` |
//!
//! ## Snapshots
//!
//! [`IdbStore::open`] reads the whole object store once into an in-memory
//! collection. Subscriptions are served from that copy; every successful write goes
//! to IndexedDB first and is then applied to the copy and published.
//!
//! Writes are queued one at a time, so an update and a delete of the same entry
//! cannot interleave and leave a deleted row behind in IndexedDB.
//!
//! ## Connection management
//!
//! A fresh [`Rexie`] connection is opened for each operation, since `Rexie` does not
//! implement `Clone` and the browser caches IndexedDB connections internally.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use rexie::{ObjectStore as RexieObjectStore, Rexie, TransactionMode};
use uuid::Uuid;
use wasm_bindgen::JsValue;

use crate::collection::{Collection, WriteQueue};
use crate::error::StoreError;
use crate::models::{Entry, EntryFields};
use crate::repo::{EntryStore, Subscription};

const DB_PREFIX: &str = "fragments";
const DB_VERSION: u32 = 1;
const ENTRIES_STORE: &str = "entries";

fn idb_error(e: rexie::Error) -> StoreError {
    StoreError::Backend(format!("indexeddb: {e}"))
}

fn js_error(e: serde_wasm_bindgen::Error) -> StoreError {
    StoreError::Backend(format!("indexeddb value: {e}"))
}

/// IndexedDB-backed EntryStore for the web platform.
#[derive(Clone)]
pub struct IdbStore {
    db_name: String,
    collection: Arc<Mutex<Collection>>,
    writes: WriteQueue,
}

impl IdbStore {
    /// Open the database for `collection` and load its entries.
    pub async fn open(collection: &str) -> Result<Self, StoreError> {
        let db_name = format!("{DB_PREFIX}-{collection}");
        let store = Self {
            db_name,
            collection: Arc::default(),
            writes: WriteQueue::default(),
        };
        let entries = store.load_all().await?;
        store.lock().restore(entries);
        Ok(store)
    }

    async fn open_db(&self) -> Result<Rexie, StoreError> {
        Rexie::builder(&self.db_name)
            .version(DB_VERSION)
            .add_object_store(RexieObjectStore::new(ENTRIES_STORE))
            .build()
            .await
            .map_err(idb_error)
    }

    fn lock(&self) -> MutexGuard<'_, Collection> {
        self.collection
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn load_all(&self) -> Result<Vec<Entry>, StoreError> {
        let db = self.open_db().await?;
        let tx = db
            .transaction(&[ENTRIES_STORE], TransactionMode::ReadOnly)
            .map_err(idb_error)?;
        let store = tx.store(ENTRIES_STORE).map_err(idb_error)?;
        let rows = store
            .get_all(None, None, None, None)
            .await
            .map_err(idb_error)?;

        let mut entries = Vec::with_capacity(rows.len());
        for (_, value) in rows {
            match serde_wasm_bindgen::from_value::<Entry>(value) {
                Ok(entry) => entries.push(entry),
                Err(e) => tracing::warn!("skipping unreadable entry: {e}"),
            }
        }
        // IndexedDB returns rows by key; keep insertion order like the other stores.
        entries.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(entries)
    }

    async fn put(&self, entry: &Entry) -> Result<(), StoreError> {
        let db = self.open_db().await?;
        let tx = db
            .transaction(&[ENTRIES_STORE], TransactionMode::ReadWrite)
            .map_err(idb_error)?;
        let store = tx.store(ENTRIES_STORE).map_err(idb_error)?;

        let key = JsValue::from_str(&entry.id);
        let value = serde_wasm_bindgen::to_value(entry).map_err(js_error)?;
        store.put(&value, Some(&key)).await.map_err(idb_error)?;
        tx.done().await.map_err(idb_error)?;
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), StoreError> {
        let db = self.open_db().await?;
        let tx = db
            .transaction(&[ENTRIES_STORE], TransactionMode::ReadWrite)
            .map_err(idb_error)?;
        let store = tx.store(ENTRIES_STORE).map_err(idb_error)?;

        store
            .delete(JsValue::from_str(id))
            .await
            .map_err(idb_error)?;
        tx.done().await.map_err(idb_error)?;
        Ok(())
    }
}

impl EntryStore for IdbStore {
    fn subscribe(&self) -> Subscription {
        self.lock().subscribe()
    }

    async fn create(&self, fields: EntryFields) -> Result<String, StoreError> {
        let _turn = self.writes.turn().await;
        let id = Uuid::new_v4().simple().to_string();
        let entry = Entry::from_fields(id.clone(), fields, Some(Utc::now()));
        self.put(&entry).await?;

        let mut collection = self.lock();
        let mut entries = collection.entries().to_vec();
        entries.push(entry);
        collection.restore(entries);
        collection.publish();
        Ok(id)
    }

    async fn update(&self, id: &str, fields: EntryFields) -> Result<(), StoreError> {
        let _turn = self.writes.turn().await;
        let mut entry = self
            .lock()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        entry.apply(fields.clone());
        self.put(&entry).await?;

        let mut collection = self.lock();
        collection.replace(id, fields)?;
        collection.publish();
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let _turn = self.writes.turn().await;
        self.remove(id).await?;

        let mut collection = self.lock();
        if collection.remove(id) {
            collection.publish();
        }
        Ok(())
    }
}
