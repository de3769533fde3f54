pub mod auth;
pub mod error;
pub mod models;
pub mod repo;

mod collection;

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod idb;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use idb::IdbStore;

pub use auth::{AuthProvider, LocalAuth, User};
pub use error::StoreError;
pub use models::{Entry, EntryFields, DEFAULT_IMAGE_URL};
pub use repo::{EntryStore, Listener, SnapshotEvent, Subscription};
