//! # Auth provider: who is reading the collection
//!
//! Some deployments only serve snapshots to a signed-in identity, even an anonymous
//! one. [`AuthProvider`] is the seam for that: sign in (anonymously or with an
//! injected token), watch identity changes, sign out.
//!
//! [`LocalAuth`] is the in-process implementation. Anonymous users get a fresh
//! uuid; token sign-in uses the token's subject as the uid.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use uuid::Uuid;

use crate::error::StoreError;

/// A signed-in identity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub uid: String,
    pub anonymous: bool,
}

/// Async interface to an identity provider.
pub trait AuthProvider {
    fn sign_in_anonymously(&self) -> impl std::future::Future<Output = Result<User, StoreError>>;

    fn sign_in_with_token(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<User, StoreError>>;

    fn sign_out(&self);

    /// Receiver that changes whenever the identity does.
    fn watch(&self) -> watch::Receiver<Option<User>>;

    fn current_user(&self) -> Option<User> {
        self.watch().borrow().clone()
    }
}

/// In-process identity provider.
#[derive(Clone, Debug)]
pub struct LocalAuth {
    state: Arc<watch::Sender<Option<User>>>,
}

impl Default for LocalAuth {
    fn default() -> Self {
        let (tx, _) = watch::channel(None);
        Self { state: Arc::new(tx) }
    }
}

impl LocalAuth {
    pub fn new() -> Self {
        Self::default()
    }

    fn set_user(&self, user: User) -> User {
        tracing::debug!(uid = %user.uid, anonymous = user.anonymous, "signed in");
        self.state.send_replace(Some(user.clone()));
        user
    }
}

impl AuthProvider for LocalAuth {
    async fn sign_in_anonymously(&self) -> Result<User, StoreError> {
        if let Some(user) = self.current_user() {
            return Ok(user);
        }
        Ok(self.set_user(User {
            uid: Uuid::new_v4().to_string(),
            anonymous: true,
        }))
    }

    async fn sign_in_with_token(&self, token: &str) -> Result<User, StoreError> {
        let uid = token.trim();
        if uid.is_empty() {
            return Err(StoreError::Unauthenticated);
        }
        Ok(self.set_user(User {
            uid: uid.to_string(),
            anonymous: false,
        }))
    }

    fn sign_out(&self) {
        self.state.send_replace(None);
    }

    fn watch(&self) -> watch::Receiver<Option<User>> {
        self.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_anonymous_sign_in_is_sticky() {
        let auth = LocalAuth::new();
        assert!(auth.current_user().is_none());

        let first = auth.sign_in_anonymously().await.unwrap();
        let second = auth.sign_in_anonymously().await.unwrap();
        assert!(first.anonymous);
        assert!(!first.uid.is_empty());
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_watch_sees_sign_in_and_out() {
        let auth = LocalAuth::new();
        let mut rx = auth.watch();

        auth.sign_in_with_token("author-1").await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().as_ref().map(|u| u.uid.as_str()), Some("author-1"));

        auth.sign_out();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
    }

    #[tokio::test]
    async fn test_empty_token_is_rejected() {
        let auth = LocalAuth::new();
        let err = auth.sign_in_with_token("  ").await.unwrap_err();
        assert!(matches!(err, StoreError::Unauthenticated));
        assert!(auth.current_user().is_none());
    }
}
