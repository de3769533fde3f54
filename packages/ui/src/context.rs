//! Journal context and hooks for the UI.
//!
//! [`JournalProvider`] owns the session for the whole page. It signs in, opens the
//! platform store, and keeps the list synchronized for as long as it is mounted.
//! Components reach the session through [`use_journal`].

use dioxus::prelude::*;
use journal::{AnyCredential, Journal, JournalConfig, JournalError, Notice};
use store::{AuthProvider, EntryStore, LocalAuth};

use crate::backend::{open_store, AppStore};

pub type Session = Journal<AnyCredential>;

/// Everything the journal components share.
#[derive(Clone, Copy)]
pub struct JournalContext {
    pub journal: Signal<Session>,
    pub store: Signal<Option<AppStore>>,
    pub config: Signal<JournalConfig>,
}

impl JournalContext {
    /// Validate the editor and hand its write to the store.
    pub fn submit(self) {
        let mut journal = self.journal;
        let Some(store) = self.store.peek().clone() else {
            tracing::warn!("save requested before the store was ready");
            return;
        };
        let write = match journal.write().begin_submit() {
            Ok(write) => write,
            Err(JournalError::Validation(_)) => return,
            Err(e) => {
                tracing::warn!("save refused: {e}");
                return;
            }
        };
        spawn(async move {
            let result = write.execute(&store).await;
            let _ = journal.write().finish_submit(result);
        });
    }

    /// Delete the entry waiting for confirmation.
    pub fn confirm_delete(self) {
        let mut journal = self.journal;
        let Some(store) = self.store.peek().clone() else {
            return;
        };
        let id = match journal.write().begin_delete() {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("delete refused: {e}");
                return;
            }
        };
        spawn(async move {
            let result = store.delete(&id).await;
            let _ = journal.write().finish_delete(&id, result);
        });
    }
}

pub fn use_journal() -> JournalContext {
    use_context::<JournalContext>()
}

/// Provider component that runs the journal session.
/// Wrap the page with this component.
#[component]
pub fn JournalProvider(config: JournalConfig, children: Element) -> Element {
    let init = config.clone();
    let mut journal = use_signal(|| Journal::from_config(&init));
    let mut store = use_signal(|| Option::<AppStore>::None);
    let config = use_signal(move || config);
    let auth = use_hook(LocalAuth::new);

    // Sign in once, then follow identity changes.
    let sign_in_auth = auth.clone();
    use_future(move || {
        let auth = sign_in_auth.clone();
        async move {
            let mut changes = auth.watch();
            let token = config.peek().auth_token.clone();
            let signed_in = match token {
                Some(token) => auth.sign_in_with_token(&token).await,
                None => auth.sign_in_anonymously().await,
            };
            if let Err(e) = signed_in {
                tracing::error!("sign-in failed: {e}");
                journal.write().set_notice(Notice::SignInFailed(e.to_string()));
            }
            journal.write().set_user(auth.current_user());
            while changes.changed().await.is_ok() {
                let user = changes.borrow_and_update().clone();
                journal.write().set_user(user);
            }
        }
    });

    // Open the platform store on mount.
    use_future(move || async move {
        let config = config.peek().clone();
        let opened = open_store(&config).await;
        store.set(Some(opened));
    });

    let can_subscribe = use_memo(move || journal.read().can_subscribe());

    // Re-runs when the store opens or the read policy is satisfied. Restarting drops
    // the previous subscription.
    let _sync = use_resource(move || {
        let store = store();
        let ready = can_subscribe();
        async move {
            let Some(store) = store.filter(|_| ready) else {
                return;
            };
            journal::synchronize(store.subscribe(), |event| journal.write().apply(event)).await;
        }
    });

    use_context_provider(|| JournalContext {
        journal,
        store,
        config,
    });

    rsx! {
        {children}
    }
}
