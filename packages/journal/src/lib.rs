pub mod admin;
pub mod config;
pub mod dates;
pub mod editor;
pub mod error;
pub mod search;
pub mod session;
pub mod sync;

pub use admin::{
    hash_secret, AdminGate, AnyCredential, CredentialCheck, GateOutcome, HashedSecret, Locked,
    SharedSecret,
};
pub use config::{JournalConfig, ReadPolicy};
pub use dates::{format_long, today, Locale};
pub use editor::{Committed, Draft, EntryEditor, Write};
pub use error::{AdminError, ConfigError, JournalError, ValidationError};
pub use session::{Journal, Notice};
pub use sync::{compare_entries, sort_snapshot, synchronize, EntryList, ListState};
