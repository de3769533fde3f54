//! # Filesystem-backed entry store
//!
//! [`FileStore`] is an [`EntryStore`] implementation that persists the collection to
//! a single JSON file on the local filesystem. It is used on desktop platforms and as
//! the native fallback so entries survive app restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── <collection>.json     # pretty-printed array of entries, in store order
//! ```
//!
//! ## Writes
//!
//! Each write updates the in-memory collection, rewrites the file, and only then
//! publishes a snapshot. If the file cannot be written the collection is rolled back
//! and the caller gets [`StoreError::Io`], so subscribers never see a change that was
//! not persisted.
//!
//! ## Platform data directories
//!
//! Use [`dirs::data_dir()`](https://docs.rs/dirs) to obtain a platform-appropriate base:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/fragments/` |
//! | Linux | `~/.local/share/fragments/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\fragments\` |

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::collection::Collection;
use crate::error::StoreError;
use crate::models::{Entry, EntryFields};
use crate::repo::{EntryStore, Subscription};

/// Filesystem-backed EntryStore for desktop persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
    collection: Arc<Mutex<Collection>>,
}

impl FileStore {
    /// Open (or lazily create) `<base>/<collection>.json`.
    pub fn open(base: impl AsRef<Path>, collection: &str) -> Result<Self, StoreError> {
        let path = base.as_ref().join(format!("{collection}.json"));
        let entries = read_entries(&path)?;
        tracing::debug!(path = %path.display(), entries = entries.len(), "opened file store");
        Ok(Self {
            path,
            collection: Arc::new(Mutex::new(Collection::with_entries(entries))),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, Collection> {
        self.collection
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run `change` against the collection and persist it, rolling back on failure.
    fn commit<T>(
        &self,
        change: impl FnOnce(&mut Collection) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut collection = self.lock();
        let previous = collection.entries().to_vec();
        let value = change(&mut collection)?;
        if let Err(e) = write_entries(&self.path, collection.entries()) {
            collection.restore(previous);
            tracing::warn!(path = %self.path.display(), "failed to persist entries: {e}");
            return Err(e);
        }
        collection.publish();
        Ok(value)
    }
}

fn read_entries(path: &Path) -> Result<Vec<Entry>, StoreError> {
    match std::fs::read_to_string(path) {
        Ok(raw) if raw.trim().is_empty() => Ok(Vec::new()),
        Ok(raw) => Ok(serde_json::from_str(&raw)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

fn write_entries(path: &Path, entries: &[Entry]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(entries)?;
    // Write next to the target and rename so a crash never leaves half a file.
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

impl EntryStore for FileStore {
    fn subscribe(&self) -> Subscription {
        self.lock().subscribe()
    }

    async fn create(&self, fields: EntryFields) -> Result<String, StoreError> {
        self.commit(|collection| Ok(collection.insert(fields)))
    }

    async fn update(&self, id: &str, fields: EntryFields) -> Result<(), StoreError> {
        self.commit(|collection| collection.replace(id, fields))
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        if self.lock().get(id).is_none() {
            return Ok(());
        }
        self.commit(|collection| {
            collection.remove(id);
            Ok(())
        })
    }
}
