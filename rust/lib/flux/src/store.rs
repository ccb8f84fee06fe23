use std::any::Any;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::warn;

use crate::topic;
use crate::value::{StateValue, SubscriptionId};

/// Callback for state change notifications.
pub type ChangeHandler = Arc<dyn Fn(&str, &StateValue) + Send + Sync>;

/// Path-addressed state with pattern subscriptions.
///
/// Values live in a `BTreeMap` so `scan` can walk a prefix in order.
/// Subscribers run synchronously on the caller of `set`, after the write
/// lock is released, so a subscriber may read the store.
pub struct StateStore {
    values: RwLock<BTreeMap<String, StateValue>>,
    subscribers: RwLock<Vec<Subscriber>>,
    next_id: AtomicU64,
}

struct Subscriber {
    id: SubscriptionId,
    pattern: String,
    handler: ChangeHandler,
}

impl StateStore {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(BTreeMap::new()),
            subscribers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn set<T: Any + Send + Sync>(&self, path: &str, value: T) {
        self.set_value(path, StateValue::new(value));
    }

    pub fn set_value(&self, path: &str, value: StateValue) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_string(), value.clone());
        self.notify(path, &value);
    }

    pub fn get(&self, path: &str) -> Option<StateValue> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
    }

    /// Typed read: `None` when the path is empty or holds another type.
    pub fn read<T: Any + Clone>(&self, path: &str) -> Option<T> {
        self.get(path).and_then(|v| v.cloned::<T>())
    }

    /// Remove a value. Subscribers are not notified.
    pub fn remove(&self, path: &str) -> Option<StateValue> {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path)
    }

    /// Entries strictly below `prefix/`, ordered by path.
    pub fn scan(&self, prefix: &str) -> Vec<(String, StateValue)> {
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        let scan_prefix = format!("{}/", prefix);
        values
            .range(scan_prefix.clone()..)
            .take_while(|(k, _)| k.starts_with(&scan_prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.values.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn paths(&self) -> Vec<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Register a change handler for paths matching `pattern` (`+`/`#`).
    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        if !topic::is_valid_pattern(pattern) {
            warn!(pattern, "subscription pattern will never match");
        }
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Subscriber {
                id,
                pattern: pattern.to_string(),
                handler: Arc::new(handler),
            });
        id
    }

    /// Returns whether a subscription was removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subs = self.subscribers.write().unwrap_or_else(PoisonError::into_inner);
        let before = subs.len();
        subs.retain(|s| s.id != id);
        subs.len() != before
    }

    fn notify(&self, path: &str, value: &StateValue) {
        let handlers: Vec<ChangeHandler> = self
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|s| topic::matches(&s.pattern, path))
            .map(|s| Arc::clone(&s.handler))
            .collect();
        for handler in handlers {
            handler(path, value);
        }
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    struct Phase(&'static str);

    fn recorder(store: &StateStore, pattern: &str) -> (SubscriptionId, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let id = store.subscribe(pattern, move |path, _| {
            sink.lock().unwrap().push(path.to_string());
        });
        (id, seen)
    }

    #[test]
    fn set_get_and_overwrite() {
        let store = StateStore::new();
        store.set("auth/state", Phase("loading"));
        store.set("auth/state", Phase("ready"));

        assert_eq!(store.read::<Phase>("auth/state"), Some(Phase("ready")));
        assert!(store.read::<String>("auth/state").is_none());
        assert!(store.get("nav/state").is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_is_silent() {
        let store = StateStore::new();
        let (_, seen) = recorder(&store, "#");
        store.set("role/editor", 1u8);
        assert!(store.remove("role/editor").is_some());
        assert!(store.remove("role/editor").is_none());
        assert_eq!(seen.lock().unwrap().len(), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn scan_lists_children_in_order() {
        let store = StateStore::new();
        store.set("nav", 0u8);
        store.set("nav/state", 1u8);
        store.set("nav/menu", 2u8);
        store.set("navigation/x", 3u8);

        let paths: Vec<String> = store.scan("nav").into_iter().map(|(k, _)| k).collect();
        assert_eq!(paths, vec!["nav/menu", "nav/state"]);
        assert_eq!(store.paths().len(), 4);
    }

    #[test]
    fn subscribers_follow_patterns() {
        let store = StateStore::new();
        let (_, exact) = recorder(&store, "nav/state");
        let (_, single) = recorder(&store, "+/state");
        let (_, multi) = recorder(&store, "role/#");

        store.set("nav/state", 1u8);
        store.set("auth/state", 1u8);
        store.set("role/editor", 1u8);

        assert_eq!(*exact.lock().unwrap(), vec!["nav/state"]);
        assert_eq!(*single.lock().unwrap(), vec!["nav/state", "auth/state"]);
        assert_eq!(*multi.lock().unwrap(), vec!["role/editor"]);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let store = StateStore::new();
        let (id, seen) = recorder(&store, "#");
        store.set("a", 1u8);
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.set("a", 2u8);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn subscriber_can_read_store() {
        let store = Arc::new(StateStore::new());
        let observed = Arc::new(Mutex::new(None));
        let (reader, sink) = (store.clone(), observed.clone());
        store.subscribe("app/route", move |path, _| {
            *sink.lock().unwrap() = reader.read::<String>(path);
        });

        store.set("app/route", "/students".to_string());
        assert_eq!(observed.lock().unwrap().as_deref(), Some("/students"));
    }
}
