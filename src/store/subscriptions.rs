//! Observer registry behind the store's live queries.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use parking_lot::RwLock;

use crate::models::Playlist;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registered observers, one map per query shape.
pub(crate) struct Subscribers {
    all: RwLock<HashMap<SubscriptionId, Sender<Vec<Playlist>>>>,
    by_id: RwLock<HashMap<SubscriptionId, (i64, Sender<Option<Playlist>>)>>,
    next_id: AtomicU64,
}

impl Subscribers {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            all: RwLock::new(HashMap::new()),
            by_id: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        })
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    /// Register an all-records observer and hand it `initial` as its first value.
    pub(crate) fn subscribe_all(
        self: &Arc<Self>,
        initial: Vec<Playlist>,
    ) -> LiveQuery<Vec<Playlist>> {
        let id = self.next_id();
        let (sender, receiver) = unbounded();
        // The receiver is still in scope, so the first send cannot fail.
        let _ = sender.send(initial);
        self.all.write().insert(id, sender);
        LiveQuery::registered(id, receiver, Arc::downgrade(self))
    }

    /// Register an observer for one playlist id.
    pub(crate) fn subscribe_one(
        self: &Arc<Self>,
        playlist_id: i64,
        initial: Option<Playlist>,
    ) -> LiveQuery<Option<Playlist>> {
        let id = self.next_id();
        let (sender, receiver) = unbounded();
        let _ = sender.send(initial);
        self.by_id.write().insert(id, (playlist_id, sender));
        LiveQuery::registered(id, receiver, Arc::downgrade(self))
    }

    pub(crate) fn unsubscribe(&self, id: SubscriptionId) {
        if self.all.write().remove(&id).is_none() {
            self.by_id.write().remove(&id);
        }
    }

    pub(crate) fn has_list_observers(&self) -> bool {
        !self.all.read().is_empty()
    }

    pub(crate) fn observes(&self, playlist_id: i64) -> bool {
        self.by_id
            .read()
            .values()
            .any(|(watched, _)| *watched == playlist_id)
    }

    /// Push a fresh snapshot to every all-records observer, pruning the ones
    /// whose receiving end is gone.
    pub(crate) fn publish_all(&self, snapshot: &[Playlist]) {
        self.all
            .write()
            .retain(|_, sender| sender.send(snapshot.to_vec()).is_ok());
    }

    /// Push the current value of `playlist_id` to the observers watching it.
    pub(crate) fn publish_one(&self, playlist_id: i64, value: Option<&Playlist>) {
        self.by_id.write().retain(|_, (watched, sender)| {
            *watched != playlist_id || sender.send(value.cloned()).is_ok()
        });
    }

    pub(crate) fn count(&self) -> usize {
        self.all.read().len() + self.by_id.read().len()
    }
}

/// Handle to a live query. Emissions queue up in the handle until read; only
/// the newest one is ever handed out. Dropping the handle unsubscribes.
pub struct LiveQuery<T> {
    id: Option<SubscriptionId>,
    receiver: Receiver<T>,
    registry: Weak<Subscribers>,
}

impl<T> LiveQuery<T> {
    fn registered(id: SubscriptionId, receiver: Receiver<T>, registry: Weak<Subscribers>) -> Self {
        Self {
            id: Some(id),
            receiver,
            registry,
        }
    }

    /// Wrap a bare receiver that no store knows about. Useful for repository
    /// doubles that feed values by hand.
    pub fn detached(receiver: Receiver<T>) -> Self {
        Self {
            id: None,
            receiver,
            registry: Weak::new(),
        }
    }

    /// Newest pending emission, if any, without blocking.
    pub fn latest(&self) -> Option<T> {
        self.receiver.try_iter().last()
    }

    /// Wait up to `timeout` for an emission, then skip ahead to the newest one.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<T> {
        match self.receiver.recv_timeout(timeout) {
            Ok(first) => Some(self.latest().unwrap_or(first)),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    pub fn subscription_id(&self) -> Option<SubscriptionId> {
        self.id
    }
}

impl<T> Drop for LiveQuery<T> {
    fn drop(&mut self) {
        if let (Some(id), Some(registry)) = (self.id, self.registry.upgrade()) {
            registry.unsubscribe(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playlist(id: i64, name: &str) -> Playlist {
        Playlist {
            id,
            name: name.to_string(),
            ..Playlist::default()
        }
    }

    #[test]
    fn latest_conflates_pending_emissions() {
        let subscribers = Subscribers::new();
        let query = subscribers.subscribe_all(Vec::new());
        subscribers.publish_all(&[playlist(1, "a")]);
        subscribers.publish_all(&[playlist(1, "a"), playlist(2, "b")]);

        assert_eq!(query.latest().map(|list| list.len()), Some(2));
        assert!(query.latest().is_none());
    }

    #[test]
    fn publish_one_only_reaches_matching_id() {
        let subscribers = Subscribers::new();
        let first = subscribers.subscribe_one(1, None);
        let second = subscribers.subscribe_one(2, None);
        first.latest();
        second.latest();

        subscribers.publish_one(1, Some(&playlist(1, "a")));

        assert_eq!(first.latest(), Some(Some(playlist(1, "a"))));
        assert!(second.latest().is_none());
    }

    #[test]
    fn dropping_handle_unsubscribes() {
        let subscribers = Subscribers::new();
        let all = subscribers.subscribe_all(Vec::new());
        let one = subscribers.subscribe_one(3, None);
        assert_eq!(subscribers.count(), 2);
        assert!(subscribers.observes(3));

        drop(one);
        assert!(!subscribers.observes(3));
        drop(all);
        assert_eq!(subscribers.count(), 0);
    }

    #[test]
    fn wait_timeout_gives_up_when_nothing_arrives() {
        let subscribers = Subscribers::new();
        let query = subscribers.subscribe_one(9, None);
        assert_eq!(query.wait_timeout(Duration::from_millis(10)), Some(None));
        assert_eq!(query.wait_timeout(Duration::from_millis(10)), None);
    }

    #[test]
    fn detached_query_outlives_any_registry() {
        let (sender, receiver) = unbounded();
        let query = LiveQuery::detached(receiver);
        sender.send(5).unwrap();
        assert_eq!(query.latest(), Some(5));
        assert!(query.subscription_id().is_none());
    }
}
