//! Platform store for the journal.
//!
//! [`open_store`] picks the backend for the current platform:
//! - **Web** (WASM + `web` feature): IndexedDB via [`store::IdbStore`]
//! - **Desktop / Mobile** (native): a JSON file via [`store::FileStore`] under
//!   `JOURNAL_DATA_DIR`, or `<data_dir>/fragments/`
//!
//! If the backend cannot be opened the session falls back to an in-memory store so
//! the page still works; nothing written there outlives the tab.

use journal::JournalConfig;
use store::{EntryFields, EntryStore, MemoryStore, StoreError, Subscription};

/// Whichever store backs this session.
#[derive(Clone)]
pub enum AppStore {
    Memory(MemoryStore),
    #[cfg(not(target_arch = "wasm32"))]
    File(store::FileStore),
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    Idb(store::IdbStore),
}

impl AppStore {
    pub fn is_persistent(&self) -> bool {
        !matches!(self, Self::Memory(_))
    }
}

impl EntryStore for AppStore {
    fn subscribe(&self) -> Subscription {
        match self {
            Self::Memory(s) => s.subscribe(),
            #[cfg(not(target_arch = "wasm32"))]
            Self::File(s) => s.subscribe(),
            #[cfg(all(target_arch = "wasm32", feature = "web"))]
            Self::Idb(s) => s.subscribe(),
        }
    }

    async fn create(&self, fields: EntryFields) -> Result<String, StoreError> {
        match self {
            Self::Memory(s) => s.create(fields).await,
            #[cfg(not(target_arch = "wasm32"))]
            Self::File(s) => s.create(fields).await,
            #[cfg(all(target_arch = "wasm32", feature = "web"))]
            Self::Idb(s) => s.create(fields).await,
        }
    }

    async fn update(&self, id: &str, fields: EntryFields) -> Result<(), StoreError> {
        match self {
            Self::Memory(s) => s.update(id, fields).await,
            #[cfg(not(target_arch = "wasm32"))]
            Self::File(s) => s.update(id, fields).await,
            #[cfg(all(target_arch = "wasm32", feature = "web"))]
            Self::Idb(s) => s.update(id, fields).await,
        }
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        match self {
            Self::Memory(s) => s.delete(id).await,
            #[cfg(not(target_arch = "wasm32"))]
            Self::File(s) => s.delete(id).await,
            #[cfg(all(target_arch = "wasm32", feature = "web"))]
            Self::Idb(s) => s.delete(id).await,
        }
    }
}

/// Open the platform store for `config.collection`.
pub async fn open_store(config: &JournalConfig) -> AppStore {
    match open_platform_store(config).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("could not open entry store, keeping entries in memory: {e}");
            AppStore::Memory(MemoryStore::new())
        }
    }
}

#[cfg(all(target_arch = "wasm32", feature = "web"))]
async fn open_platform_store(config: &JournalConfig) -> Result<AppStore, StoreError> {
    store::IdbStore::open(&config.collection)
        .await
        .map(AppStore::Idb)
}

#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
async fn open_platform_store(_config: &JournalConfig) -> Result<AppStore, StoreError> {
    Ok(AppStore::Memory(MemoryStore::new()))
}

#[cfg(not(target_arch = "wasm32"))]
async fn open_platform_store(config: &JournalConfig) -> Result<AppStore, StoreError> {
    let base = match &config.data_dir {
        Some(dir) => dir.clone(),
        None => dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("fragments"),
    };
    store::FileStore::open(base, &config.collection).map(AppStore::File)
}
