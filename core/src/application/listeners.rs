//! Subscriber registry for scanned codes.

use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

use crate::domain::Code;

/// Callback receiving each scanned code.
pub type CodeListener = Arc<dyn Fn(Code) + Send + Sync>;

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered list of listeners.
///
/// Dispatch works on a snapshot taken under the read lock, so listeners may
/// subscribe or unsubscribe while being called; such changes take effect
/// from the next dispatch.
#[derive(Default)]
pub struct Listeners {
    entries: RwLock<Vec<(SubscriptionId, CodeListener)>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(Code) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        self.entries.write().push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns false if the id is unknown.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Call every listener in subscription order, each with its own copy.
    pub fn dispatch(&self, code: &Code) {
        let snapshot: Vec<CodeListener> = self
            .entries
            .read()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in snapshot {
            listener(code.clone());
        }
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_dispatch_in_subscription_order() {
        let listeners = Listeners::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let seen = Arc::clone(&seen);
            listeners.subscribe(move |code| seen.lock().push(format!("{}:{}", tag, code.text())));
        }

        listeners.dispatch(&Code::new("42", 2, "A"));
        assert_eq!(*seen.lock(), vec!["first:42", "second:42", "third:42"]);
    }

    #[test]
    fn test_unsubscribe() {
        let listeners = Listeners::new();
        let hits = Arc::new(Mutex::new(0));

        let counter = Arc::clone(&hits);
        let id = listeners.subscribe(move |_| *counter.lock() += 1);
        assert_eq!(listeners.len(), 1);

        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id));
        assert!(listeners.is_empty());

        listeners.dispatch(&Code::new("42", 2, "A"));
        assert_eq!(*hits.lock(), 0);
    }

    #[test]
    fn test_subscribe_during_dispatch_applies_next_time() {
        let listeners = Arc::new(Listeners::new());
        let late_hits = Arc::new(Mutex::new(0));

        let registry = Arc::clone(&listeners);
        let counter = Arc::clone(&late_hits);
        listeners.subscribe(move |_| {
            let counter = Arc::clone(&counter);
            registry.subscribe(move |_| *counter.lock() += 1);
        });

        listeners.dispatch(&Code::new("1", 1, "A"));
        assert_eq!(*late_hits.lock(), 0);
        assert_eq!(listeners.len(), 2);

        listeners.dispatch(&Code::new("2", 1, "A"));
        assert_eq!(*late_hits.lock(), 1);
    }
}
