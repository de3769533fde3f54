use thiserror::Error;

/// Failures reported by an [`crate::EntryStore`] or [`crate::AuthProvider`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("entry not found: {0}")]
    NotFound(String),

    #[error("permission denied")]
    PermissionDenied,

    #[error("not signed in")]
    Unauthenticated,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Any other backend-specific failure, carried as text.
    #[error("{0}")]
    Backend(String),
}

impl Clone for StoreError {
    fn clone(&self) -> Self {
        match self {
            Self::Unavailable(msg) => Self::Unavailable(msg.clone()),
            Self::NotFound(id) => Self::NotFound(id.clone()),
            Self::PermissionDenied => Self::PermissionDenied,
            Self::Unauthenticated => Self::Unauthenticated,
            Self::Io(e) => Self::Io(std::io::Error::new(e.kind(), e.to_string())),
            // serde_json::Error has no public constructor; keep its message.
            Self::Serialization(e) => Self::Backend(e.to_string()),
            Self::Backend(msg) => Self::Backend(msg.clone()),
        }
    }
}
