use store::StoreError;
use thiserror::Error;

/// Input the editor refuses to submit.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("a title is required")]
    EmptyTitle,
    #[error("some content is required")]
    EmptyContent,
    #[error("'{0}' is not a date in YYYY-MM-DD form")]
    InvalidDate(String),
}

/// Failures surfaced by a [`crate::Journal`] session.
#[derive(Clone, Debug, Error)]
pub enum JournalError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("could not save: {0}")]
    Store(#[from] StoreError),

    /// A write from this editor is still in flight.
    #[error("a save is already in progress")]
    Busy,

    #[error("admin mode is required")]
    AdminRequired,

    #[error("not signed in yet, try again in a moment")]
    Unauthenticated,

    #[error("the editor is not open")]
    EditorClosed,

    #[error("no delete is waiting for confirmation")]
    NoPendingDelete,

    #[error("entry not found: {0}")]
    UnknownEntry(String),
}

/// Invalid or unusable configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} has an unsupported value '{value}'")]
    InvalidValue { name: &'static str, value: String },

    #[error(
        "JOURNAL_ADMIN_SECRET would be readable in the built bundle; \
         set JOURNAL_ADMIN_SECRET_HASH instead (web --hash-secret prints one)"
    )]
    PlaintextSecretInBundle,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdminError {
    #[error("invalid secret hash: {0}")]
    InvalidHash(String),

    #[error("failed to hash secret: {0}")]
    Hashing(String),
}
