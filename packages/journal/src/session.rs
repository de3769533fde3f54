//! # Journal session
//!
//! [`Journal`] is everything one open page knows: the published list, the editor,
//! the admin gate, which entry the reader shows, a delete waiting for confirmation,
//! who is signed in, and a dismissible notice.
//!
//! Writes go through the same begin/finish split as the editor so that a UI can hold
//! the session in reactive state and await the store on a spawned task. The `async`
//! helpers ([`Journal::submit`], [`Journal::confirm_delete`]) do both halves for code
//! that can hold `&mut Journal` across the await, such as tests.

use std::ops::ControlFlow;

use store::{Entry, EntryStore, SnapshotEvent, StoreError, User};

use crate::admin::{AdminGate, AnyCredential, CredentialCheck, GateOutcome};
use crate::config::{JournalConfig, ReadPolicy};
use crate::dates::Locale;
use crate::editor::{Committed, EntryEditor, Write};
use crate::error::JournalError;
use crate::search;
use crate::sync::{EntryList, ListState};

/// A message for the author that stays until dismissed.
#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    AdminRejected,
    SaveFailed(String),
    DeleteFailed(String),
    SignInFailed(String),
}

impl Notice {
    pub fn text(&self, locale: Locale) -> String {
        match (self, locale) {
            (Self::AdminRejected, Locale::PtPt) => "Palavra-passe incorreta.".to_string(),
            (Self::AdminRejected, Locale::En) => "Wrong password.".to_string(),
            (Self::SaveFailed(e), Locale::PtPt) => format!("Não foi possível guardar: {e}"),
            (Self::SaveFailed(e), Locale::En) => format!("Could not save: {e}"),
            (Self::DeleteFailed(e), Locale::PtPt) => format!("Não foi possível apagar: {e}"),
            (Self::DeleteFailed(e), Locale::En) => format!("Could not delete: {e}"),
            (Self::SignInFailed(e), Locale::PtPt) => format!("Falha ao iniciar sessão: {e}"),
            (Self::SignInFailed(e), Locale::En) => format!("Sign-in failed: {e}"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Journal<C> {
    list: EntryList,
    editor: EntryEditor,
    gate: AdminGate<C>,
    reader: Option<Entry>,
    pending_delete: Option<String>,
    deleting: bool,
    user: Option<User>,
    read_policy: ReadPolicy,
    default_image: String,
    notice: Option<Notice>,
}

impl Journal<AnyCredential> {
    pub fn from_config(config: &JournalConfig) -> Self {
        Self::new(
            config.credential.clone(),
            config.read_policy,
            config.default_image_url.clone(),
        )
    }
}

impl<C: CredentialCheck> Journal<C> {
    pub fn new(check: C, read_policy: ReadPolicy, default_image: impl Into<String>) -> Self {
        Self {
            list: EntryList::new(),
            editor: EntryEditor::new(),
            gate: AdminGate::new(check),
            reader: None,
            pending_delete: None,
            deleting: false,
            user: None,
            read_policy,
            default_image: default_image.into(),
            notice: None,
        }
    }

    // -- list --

    pub fn list(&self) -> &ListState {
        self.list.state()
    }

    /// Apply one subscription notification. Breaks once the subscription has failed.
    ///
    /// The reader keeps showing its entry; if the snapshot carries a newer copy it is
    /// picked up.
    pub fn apply(&mut self, event: SnapshotEvent) -> ControlFlow<()> {
        let flow = self.list.apply(event);
        if let Some(reader) = &mut self.reader {
            if let Some(fresh) = self.list.state().find(&reader.id) {
                *reader = fresh.clone();
            }
        }
        flow
    }

    /// Published entries matching `query`, in presentation order.
    pub fn visible_entries(&self, query: &str) -> Vec<&Entry> {
        search::filter(self.list.state().entries(), query)
    }

    // -- identity --

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn set_user(&mut self, user: Option<User>) {
        self.user = user;
    }

    pub fn read_policy(&self) -> ReadPolicy {
        self.read_policy
    }

    /// Whether the subscription may be opened now.
    pub fn can_subscribe(&self) -> bool {
        match self.read_policy {
            ReadPolicy::Open => true,
            ReadPolicy::RequireSignIn => self.user.is_some(),
        }
    }

    // -- admin --

    pub fn is_admin(&self) -> bool {
        self.gate.is_active()
    }

    pub fn needs_prompt(&self) -> bool {
        self.gate.needs_prompt()
    }

    /// Press the admin toggle. Switching off closes the editor and drops any pending
    /// delete.
    pub fn toggle_admin(&mut self, response: Option<&str>) -> GateOutcome {
        let outcome = self.gate.toggle(response);
        match outcome {
            GateOutcome::Disabled => {
                self.editor.close();
                self.pending_delete = None;
            }
            GateOutcome::Rejected => self.notice = Some(Notice::AdminRejected),
            GateOutcome::Enabled | GateOutcome::Unchanged => {}
        }
        outcome
    }

    fn require_writer(&self) -> Result<(), JournalError> {
        if !self.gate.is_active() {
            return Err(JournalError::AdminRequired);
        }
        if self.read_policy == ReadPolicy::RequireSignIn && self.user.is_none() {
            return Err(JournalError::Unauthenticated);
        }
        Ok(())
    }

    // -- editor --

    pub fn editor(&self) -> &EntryEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EntryEditor {
        &mut self.editor
    }

    pub fn default_image(&self) -> &str {
        &self.default_image
    }

    /// Open the editor on a blank entry dated `today`.
    pub fn start_new(&mut self, today: impl Into<String>) -> Result<(), JournalError> {
        self.require_writer()?;
        self.editor.open_new(today);
        Ok(())
    }

    /// Open the editor on the published entry `id`.
    pub fn start_edit(&mut self, id: &str) -> Result<(), JournalError> {
        self.require_writer()?;
        let entry = self
            .list
            .state()
            .find(id)
            .or(self.reader.as_ref().filter(|e| e.id == id))
            .ok_or_else(|| JournalError::UnknownEntry(id.to_string()))?;
        self.editor.open_edit(entry, &self.default_image);
        Ok(())
    }

    pub fn close_editor(&mut self) {
        self.editor.close();
    }

    pub fn begin_submit(&mut self) -> Result<Write, JournalError> {
        self.require_writer()?;
        self.editor.begin_submit()
    }

    /// Record the result of the write from [`begin_submit`](Self::begin_submit).
    ///
    /// An update of the entry open in the reader refreshes the reader right away,
    /// without waiting for the next snapshot.
    pub fn finish_submit(
        &mut self,
        result: Result<String, StoreError>,
    ) -> Result<Committed, JournalError> {
        match self.editor.finish_submit(result) {
            Ok(committed) => {
                if committed.updated {
                    if let Some(reader) = self.reader.as_mut().filter(|r| r.id == committed.id) {
                        reader.apply(committed.fields.clone());
                    }
                }
                Ok(committed)
            }
            Err(JournalError::Store(e)) => {
                self.notice = Some(Notice::SaveFailed(e.to_string()));
                Err(JournalError::Store(e))
            }
            Err(e) => Err(e),
        }
    }

    pub async fn submit<S: EntryStore>(&mut self, store: &S) -> Result<Committed, JournalError> {
        let write = self.begin_submit()?;
        let result = write.execute(store).await;
        self.finish_submit(result)
    }

    // -- reader --

    pub fn reader(&self) -> Option<&Entry> {
        self.reader.as_ref()
    }

    pub fn open_reader(&mut self, id: &str) -> Result<(), JournalError> {
        let entry = self
            .list
            .state()
            .find(id)
            .ok_or_else(|| JournalError::UnknownEntry(id.to_string()))?;
        self.reader = Some(entry.clone());
        Ok(())
    }

    pub fn close_reader(&mut self) {
        self.reader = None;
    }

    // -- delete --

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// First step of a delete: remember `id` until the author confirms.
    pub fn ask_delete(&mut self, id: &str) -> Result<(), JournalError> {
        self.require_writer()?;
        self.pending_delete = Some(id.to_string());
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Take the confirmed id. The caller deletes it and reports back through
    /// [`finish_delete`](Self::finish_delete).
    pub fn begin_delete(&mut self) -> Result<String, JournalError> {
        self.require_writer()?;
        if self.deleting {
            return Err(JournalError::Busy);
        }
        let id = self
            .pending_delete
            .take()
            .ok_or(JournalError::NoPendingDelete)?;
        self.deleting = true;
        Ok(id)
    }

    pub fn finish_delete(&mut self, id: &str, result: Result<(), StoreError>) -> Result<(), JournalError> {
        self.deleting = false;
        match result {
            Ok(()) => {
                tracing::debug!(%id, "entry deleted");
                if self.reader.as_ref().is_some_and(|r| r.id == id) {
                    self.reader = None;
                }
                if self.editor.editing_id() == Some(id) {
                    self.editor.close();
                }
                Ok(())
            }
            Err(e) => {
                tracing::warn!(%id, "deleting entry failed: {e}");
                self.notice = Some(Notice::DeleteFailed(e.to_string()));
                Err(e.into())
            }
        }
    }

    pub async fn confirm_delete<S: EntryStore>(&mut self, store: &S) -> Result<(), JournalError> {
        let id = self.begin_delete()?;
        let result = store.delete(&id).await;
        self.finish_delete(&id, result)
    }

    // -- notice --

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::SharedSecret;
    use store::{AuthProvider, EntryFields, LocalAuth, MemoryStore, Subscription};

    const SECRET: &str = "23872387";

    fn journal(policy: ReadPolicy) -> Journal<SharedSecret> {
        Journal::new(SharedSecret::new(SECRET), policy, store::DEFAULT_IMAGE_URL)
    }

    fn admin() -> Journal<SharedSecret> {
        let mut journal = journal(ReadPolicy::Open);
        assert_eq!(journal.toggle_admin(Some(SECRET)), GateOutcome::Enabled);
        journal
    }

    async fn pump(journal: &mut Journal<SharedSecret>, sub: &mut Subscription) {
        let event = sub.next().await.expect("subscription closed");
        journal.apply(event);
        while let Some(event) = sub.try_next() {
            journal.apply(event);
        }
    }

    fn titles(journal: &Journal<SharedSecret>) -> Vec<&str> {
        journal
            .list()
            .entries()
            .iter()
            .map(|e| e.title.as_str())
            .collect()
    }

    async fn write(journal: &mut Journal<SharedSecret>, store: &MemoryStore, title: &str, date: &str) {
        journal.start_new(date).unwrap();
        let draft = journal.editor_mut().draft_mut();
        draft.title = title.to_string();
        draft.content = "Hello".to_string();
        journal.submit(store).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_and_order_scenario() {
        let store = MemoryStore::new();
        let mut sub = store.subscribe();
        let mut journal = admin();

        pump(&mut journal, &mut sub).await;
        assert_eq!(journal.list(), &ListState::Ready(vec![]));

        write(&mut journal, &store, "First", "2024-06-01").await;
        pump(&mut journal, &mut sub).await;
        assert_eq!(titles(&journal), vec!["First"]);
        let first = &journal.list().entries()[0];
        assert_eq!(first.content, "Hello");
        assert!(first.image_url.is_none());
        assert!(!first.id.is_empty());

        write(&mut journal, &store, "Second", "2024-06-02").await;
        pump(&mut journal, &mut sub).await;
        assert_eq!(titles(&journal), vec!["Second", "First"]);
    }

    #[tokio::test]
    async fn test_edit_reorders_and_refreshes_reader() {
        let store = MemoryStore::new();
        let mut sub = store.subscribe();
        let mut journal = admin();
        pump(&mut journal, &mut sub).await;
        write(&mut journal, &store, "First", "2024-06-01").await;
        write(&mut journal, &store, "Second", "2024-06-02").await;
        pump(&mut journal, &mut sub).await;

        let first_id = journal.list().entries()[1].id.clone();
        journal.open_reader(&first_id).unwrap();
        journal.start_edit(&first_id).unwrap();
        journal.editor_mut().draft_mut().display_date = "2024-06-03".to_string();
        journal.editor_mut().draft_mut().title = "First, revised".to_string();
        let committed = journal.submit(&store).await.unwrap();
        assert!(committed.updated);

        // Reader updates before the snapshot arrives.
        assert_eq!(journal.reader().unwrap().title, "First, revised");

        pump(&mut journal, &mut sub).await;
        assert_eq!(titles(&journal), vec!["First, revised", "Second"]);
        assert_eq!(store.entries().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_closes_reader() {
        let store = MemoryStore::new();
        let mut sub = store.subscribe();
        let mut journal = admin();
        pump(&mut journal, &mut sub).await;
        write(&mut journal, &store, "First", "2024-06-01").await;
        write(&mut journal, &store, "Second", "2024-06-02").await;
        pump(&mut journal, &mut sub).await;

        let second_id = journal.list().entries()[0].id.clone();
        journal.open_reader(&second_id).unwrap();
        journal.ask_delete(&second_id).unwrap();
        assert_eq!(journal.pending_delete(), Some(second_id.as_str()));

        journal.confirm_delete(&store).await.unwrap();
        assert!(journal.reader().is_none());
        assert!(journal.pending_delete().is_none());

        pump(&mut journal, &mut sub).await;
        assert_eq!(titles(&journal), vec!["First"]);
    }

    #[tokio::test]
    async fn test_cancelled_delete_touches_nothing() {
        let store = MemoryStore::new();
        let mut journal = admin();
        write(&mut journal, &store, "Keep", "2024-06-01").await;
        let id = store.entries()[0].id.clone();

        journal.ask_delete(&id).unwrap();
        journal.cancel_delete();
        assert!(matches!(
            journal.confirm_delete(&store).await,
            Err(JournalError::NoPendingDelete)
        ));
        assert_eq!(store.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_delete_sets_notice() {
        let store = MemoryStore::new();
        let mut journal = admin();
        write(&mut journal, &store, "Stuck", "2024-06-01").await;
        let id = store.entries()[0].id.clone();

        store.set_offline(true);
        journal.ask_delete(&id).unwrap();
        assert!(journal.confirm_delete(&store).await.is_err());
        assert!(matches!(journal.notice(), Some(Notice::DeleteFailed(_))));
        assert!(!journal.is_deleting());

        journal.dismiss_notice();
        assert!(journal.notice().is_none());
    }

    #[tokio::test]
    async fn test_writes_need_admin() {
        let store = MemoryStore::new();
        let mut journal = journal(ReadPolicy::Open);

        assert!(matches!(journal.start_new("2024-06-01"), Err(JournalError::AdminRequired)));
        assert!(matches!(journal.ask_delete("x"), Err(JournalError::AdminRequired)));

        assert_eq!(journal.toggle_admin(Some("nope")), GateOutcome::Rejected);
        assert_eq!(journal.notice(), Some(&Notice::AdminRejected));
        assert!(!journal.is_admin());

        assert_eq!(journal.toggle_admin(Some(SECRET)), GateOutcome::Enabled);
        journal.start_new("2024-06-01").unwrap();
        assert!(journal.editor().is_open());

        // Turning admin off closes the open editor.
        assert_eq!(journal.toggle_admin(None), GateOutcome::Disabled);
        assert!(!journal.editor().is_open());
        assert!(store.entries().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_submit_never_reaches_store() {
        let store = MemoryStore::new();
        let mut journal = admin();
        journal.start_new("2024-06-01").unwrap();
        journal.editor_mut().draft_mut().title = "   ".to_string();
        journal.editor_mut().draft_mut().content = "Body".to_string();

        assert!(matches!(journal.submit(&store).await, Err(JournalError::Validation(_))));
        assert!(store.entries().is_empty());
        assert!(journal.notice().is_none());
    }

    #[tokio::test]
    async fn test_failed_save_keeps_editor_and_notifies() {
        let store = MemoryStore::new();
        store.set_offline(true);
        let mut journal = admin();
        journal.start_new("2024-06-01").unwrap();
        journal.editor_mut().draft_mut().title = "Draft".to_string();
        journal.editor_mut().draft_mut().content = "Body".to_string();

        assert!(journal.submit(&store).await.is_err());
        assert!(journal.editor().is_open());
        assert_eq!(journal.editor().draft().title, "Draft");
        assert!(matches!(journal.notice(), Some(Notice::SaveFailed(_))));
    }

    #[tokio::test]
    async fn test_sign_in_gates_subscription_and_writes() {
        let auth = LocalAuth::new();
        let mut journal = journal(ReadPolicy::RequireSignIn);
        journal.toggle_admin(Some(SECRET));

        assert!(!journal.can_subscribe());
        assert!(matches!(journal.start_new("2024-06-01"), Err(JournalError::Unauthenticated)));

        let user = auth.sign_in_anonymously().await.unwrap();
        journal.set_user(Some(user));
        assert!(journal.can_subscribe());
        journal.start_new("2024-06-01").unwrap();
    }

    #[tokio::test]
    async fn test_search_over_published_list() {
        let store = MemoryStore::new();
        let mut sub = store.subscribe();
        let mut journal = admin();
        write(&mut journal, &store, "Lisboa", "2024-06-01").await;
        write(&mut journal, &store, "Porto", "2024-07-01").await;
        pump(&mut journal, &mut sub).await;

        let found: Vec<_> = journal.visible_entries("lis").iter().map(|e| e.title.as_str()).collect();
        assert_eq!(found, vec!["Lisboa"]);
        assert_eq!(journal.visible_entries("").len(), 2);
        assert_eq!(journal.visible_entries("2024-07").len(), 1);
    }

    #[tokio::test]
    async fn test_save_landing_after_reopen_keeps_new_draft() {
        let store = MemoryStore::new();
        let mut journal = admin();
        journal.start_new("2024-06-01").unwrap();
        journal.editor_mut().draft_mut().title = "First".to_string();
        journal.editor_mut().draft_mut().content = "Body".to_string();
        let write = journal.begin_submit().unwrap();

        // Admin off and on again while the save is still on its way.
        assert_eq!(journal.toggle_admin(None), GateOutcome::Disabled);
        assert_eq!(journal.toggle_admin(Some(SECRET)), GateOutcome::Enabled);
        journal.start_new("2024-06-02").unwrap();
        journal.editor_mut().draft_mut().title = "Typed while saving".to_string();

        let result = write.execute(&store).await;
        let committed = journal.finish_submit(result).unwrap();
        assert_eq!(committed.fields.title, "First");
        assert!(journal.editor().is_open());
        assert!(!journal.editor().is_saving());
        assert_eq!(journal.editor().draft().title, "Typed while saving");
        assert_eq!(store.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_synchronize_drives_the_session() {
        let store = MemoryStore::new();
        let mut journal = admin();
        write(&mut journal, &store, "First", "2024-06-01").await;
        write(&mut journal, &store, "Second", "2024-06-02").await;

        let subscription = store.subscribe();
        drop(store);
        crate::sync::synchronize(subscription, |event| journal.apply(event)).await;
        assert_eq!(titles(&journal), vec!["Second", "First"]);

        let store = MemoryStore::new();
        let subscription = store.subscribe();
        store.fail_subscriptions(StoreError::PermissionDenied);
        crate::sync::synchronize(subscription, |event| journal.apply(event)).await;
        assert!(matches!(journal.list(), ListState::Failed(_)));
        assert!(journal.visible_entries("").is_empty());
    }

    #[test]
    fn test_unknown_entries() {
        let mut journal = admin();
        journal.apply(Ok(vec![]));
        assert!(matches!(journal.open_reader("nope"), Err(JournalError::UnknownEntry(_))));
        assert!(matches!(journal.start_edit("nope"), Err(JournalError::UnknownEntry(_))));
    }

    #[test]
    fn test_snapshot_refreshes_open_reader() {
        let mut journal = admin();
        let mut entry = Entry::from_fields(
            "e1".to_string(),
            EntryFields {
                title: "Before".to_string(),
                content: "C".to_string(),
                image_url: None,
                display_date: "2024-06-01".to_string(),
            },
            None,
        );
        journal.apply(Ok(vec![entry.clone()]));
        journal.open_reader("e1").unwrap();

        entry.title = "After".to_string();
        journal.apply(Ok(vec![entry]));
        assert_eq!(journal.reader().unwrap().title, "After");
    }
}
