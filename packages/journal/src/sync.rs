//! # Entry list synchronizer
//!
//! Keeps the locally displayed list consistent with the remote collection without
//! asking the backend for any ordering. Every notification carries the complete
//! collection, so the list is rebuilt from scratch each time:
//!
//! 1. replace the local list with the snapshot,
//! 2. sort by `display_date` descending (plain string comparison, which is
//!    chronological because the dates are zero-padded `YYYY-MM-DD`),
//! 3. publish the result as a new [`ListState::Ready`].
//!
//! Entries sharing a `display_date` fall back to `created_at` (newest first, entries
//! without a timestamp last) and then to `id`, so the order never depends on how the
//! backend happened to list them.
//!
//! A subscription error is terminal: the state becomes [`ListState::Failed`] and the
//! synchronizer stops. There is no automatic retry.
//!
//! [`synchronize`] is the loop itself. It feeds notifications to anything with an
//! `apply` step, such as [`EntryList`] or the whole session.

use std::cmp::Ordering;
use std::ops::ControlFlow;

use store::{Entry, SnapshotEvent, Subscription};

/// What the entry list currently shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ListState {
    /// No snapshot yet.
    #[default]
    Loading,
    /// Entries in presentation order.
    Ready(Vec<Entry>),
    /// The subscription failed; no further updates will arrive.
    Failed(String),
}

impl ListState {
    /// Entries to render. Empty while loading and after a failure.
    pub fn entries(&self) -> &[Entry] {
        match self {
            Self::Ready(entries) => entries,
            Self::Loading | Self::Failed(_) => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn find(&self, id: &str) -> Option<&Entry> {
        self.entries().iter().find(|e| e.id == id)
    }
}

/// Presentation order: newest `display_date` first.
pub fn compare_entries(a: &Entry, b: &Entry) -> Ordering {
    b.display_date
        .cmp(&a.display_date)
        .then_with(|| match (&a.created_at, &b.created_at) {
            (Some(a), Some(b)) => b.cmp(a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.id.cmp(&b.id))
}

/// Sort a snapshot into presentation order.
pub fn sort_snapshot(mut entries: Vec<Entry>) -> Vec<Entry> {
    entries.sort_by(compare_entries);
    entries
}

/// Applies snapshot notifications to a [`ListState`].
#[derive(Clone, Debug, Default)]
pub struct EntryList {
    state: ListState,
}

impl EntryList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Apply one notification. Breaks once the subscription has failed.
    pub fn apply(&mut self, event: SnapshotEvent) -> ControlFlow<()> {
        if matches!(self.state, ListState::Failed(_)) {
            return ControlFlow::Break(());
        }
        match event {
            Ok(snapshot) => {
                tracing::debug!(entries = snapshot.len(), "snapshot received");
                self.state = ListState::Ready(sort_snapshot(snapshot));
                ControlFlow::Continue(())
            }
            Err(e) => {
                tracing::error!("entry subscription failed: {e}");
                self.state = ListState::Failed(e.to_string());
                ControlFlow::Break(())
            }
        }
    }
}

/// Feed every notification from `subscription` to `apply` until it breaks or the
/// subscription ends.
///
/// Dropping the returned future drops the subscription, which is how callers tear it
/// down.
pub async fn synchronize(
    mut subscription: Subscription,
    mut apply: impl FnMut(SnapshotEvent) -> ControlFlow<()>,
) {
    while let Some(event) = subscription.next().await {
        if apply(event).is_break() {
            tracing::debug!("synchronizer stopped");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use store::{EntryFields, EntryStore, MemoryStore, StoreError};

    fn entry(id: &str, title: &str, date: &str) -> Entry {
        Entry::from_fields(
            id.to_string(),
            EntryFields {
                title: title.to_string(),
                content: "body".to_string(),
                image_url: None,
                display_date: date.to_string(),
            },
            None,
        )
    }

    fn titles(state: &ListState) -> Vec<&str> {
        state.entries().iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn test_sorted_by_display_date_descending() {
        let snapshot = vec![
            entry("a", "Old", "2023-12-31"),
            entry("b", "New", "2024-06-02"),
            entry("c", "Mid", "2024-06-01"),
        ];
        let mut list = EntryList::new();
        assert!(list.apply(Ok(snapshot.clone())).is_continue());

        assert_eq!(titles(list.state()), vec!["New", "Mid", "Old"]);

        // Same entries, nothing added, dropped or changed.
        let mut published = list.state().entries().to_vec();
        let mut sent = snapshot;
        published.sort_by(|a, b| a.id.cmp(&b.id));
        sent.sort_by(|a, b| a.id.cmp(&b.id));
        assert_eq!(published, sent);
    }

    #[test]
    fn test_display_date_wins_over_created_at() {
        let mut older_date = entry("a", "Written later", "2024-01-01");
        older_date.created_at = Some(Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap());
        let mut newer_date = entry("b", "Written earlier", "2024-05-01");
        newer_date.created_at = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());

        let sorted = sort_snapshot(vec![older_date, newer_date]);
        assert_eq!(sorted[0].title, "Written earlier");
    }

    #[test]
    fn test_ties_are_deterministic() {
        let mut first = entry("z", "Inserted first", "2024-06-01");
        first.created_at = Some(Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap());
        let mut second = entry("y", "Inserted second", "2024-06-01");
        second.created_at = Some(Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap());
        let untimed_b = entry("b", "Untimed b", "2024-06-01");
        let untimed_a = entry("a", "Untimed a", "2024-06-01");

        let one = sort_snapshot(vec![
            first.clone(),
            untimed_b.clone(),
            second.clone(),
            untimed_a.clone(),
        ]);
        let two = sort_snapshot(vec![untimed_a, second, untimed_b, first]);

        let order: Vec<_> = one.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(
            order,
            vec!["Inserted second", "Inserted first", "Untimed a", "Untimed b"]
        );
        assert_eq!(one, two);
    }

    #[test]
    fn test_same_snapshot_twice_is_idempotent() {
        let snapshot = vec![
            entry("a", "A", "2024-06-01"),
            entry("b", "B", "2024-06-01"),
            entry("c", "C", "2024-07-01"),
        ];
        let mut list = EntryList::new();
        list.apply(Ok(snapshot.clone()));
        let once = list.state().clone();
        assert!(list.apply(Ok(snapshot)).is_continue());
        assert_eq!(list.state(), &once);
    }

    #[test]
    fn test_snapshot_replaces_wholesale() {
        let mut list = EntryList::new();
        list.apply(Ok(vec![entry("a", "A", "2024-01-01"), entry("b", "B", "2024-01-02")]));
        list.apply(Ok(vec![entry("c", "C", "2024-01-03")]));
        assert_eq!(titles(list.state()), vec!["C"]);
    }

    #[test]
    fn test_failure_is_terminal() {
        let mut list = EntryList::new();
        list.apply(Ok(vec![entry("a", "A", "2024-01-01")]));

        let flow = list.apply(Err(StoreError::PermissionDenied));
        assert!(flow.is_break());
        assert_eq!(list.state(), &ListState::Failed("permission denied".to_string()));
        assert!(list.state().entries().is_empty());

        // Later snapshots are ignored.
        assert!(list.apply(Ok(vec![entry("b", "B", "2024-01-02")])).is_break());
        assert!(matches!(list.state(), ListState::Failed(_)));
    }

    #[test]
    fn test_loading_until_first_snapshot() {
        let list = EntryList::new();
        assert!(list.state().is_loading());
        assert!(list.state().entries().is_empty());
    }

    #[tokio::test]
    async fn test_synchronize_publishes_until_failure() {
        let store = MemoryStore::new();
        store
            .create(EntryFields {
                title: "First".to_string(),
                content: "Hello".to_string(),
                image_url: None,
                display_date: "2024-06-01".to_string(),
            })
            .await
            .unwrap();

        let subscription = store.subscribe();
        store.fail_subscriptions(StoreError::Unavailable("offline".to_string()));

        let mut list = EntryList::new();
        let mut published = Vec::new();
        synchronize(subscription, |event| {
            let flow = list.apply(event);
            published.push(list.state().clone());
            flow
        })
        .await;

        assert_eq!(published.len(), 2);
        assert_eq!(titles(&published[0]), vec!["First"]);
        assert!(matches!(&published[1], ListState::Failed(msg) if msg.contains("offline")));
    }

    #[tokio::test]
    async fn test_synchronize_ends_with_the_subscription() {
        let store = MemoryStore::new();
        let subscription = store.subscribe();
        store
            .create(EntryFields {
                title: "Only".to_string(),
                content: "Hello".to_string(),
                image_url: None,
                display_date: "2024-06-01".to_string(),
            })
            .await
            .unwrap();
        drop(store);

        let mut list = EntryList::new();
        synchronize(subscription, |event| list.apply(event)).await;
        assert_eq!(titles(list.state()), vec!["Only"]);
    }
}
