// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Observer registration for cluster-state changes.
//!
//! Protocol clients read the cluster state through the bridge and get
//! notified of changes through this registry. Observers are notified
//! after each applied patch, never during one — a single projection is
//! all-or-nothing from their point of view.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

/// Unique identifier for a registered observer.
///
/// Returned on registration and used to unregister later. IDs are unique
/// within a registry's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Inner<T> {
    next_id: AtomicU64,
    callbacks: RwLock<HashMap<SubscriptionId, Callback<T>>>,
}

/// Registry of cluster-state observers.
///
/// Cheap to clone; all clones share the same observer set, so embedders
/// can keep a handle while the owning bridge is moved into its runtime.
///
/// # Examples
///
/// ```
/// use matterlink_lib::sync::ObserverRegistry;
///
/// let registry: ObserverRegistry<u32> = ObserverRegistry::new();
/// let id = registry.subscribe(|value| println!("now {value}"));
/// registry.notify(&7);
/// assert!(registry.unsubscribe(id));
/// ```
pub struct ObserverRegistry<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for ObserverRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for ObserverRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ObserverRegistry<T> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                next_id: AtomicU64::new(1),
                callbacks: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Registers an observer and returns its subscription ID.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        self.inner.callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Removes an observer. Returns `true` if it was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.callbacks.write().remove(&id).is_some()
    }

    /// Returns the number of registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.inner.callbacks.read().len()
    }

    /// Notifies every observer with the given state.
    ///
    /// Callbacks are cloned out of the lock before being invoked, so an
    /// observer may re-subscribe or unsubscribe from within its callback.
    pub fn notify(&self, state: &T) {
        let callbacks: Vec<Callback<T>> = self.inner.callbacks.read().values().cloned().collect();
        for callback in callbacks {
            callback(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn observers_receive_notifications() {
        let registry: ObserverRegistry<i32> = ObserverRegistry::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_cb = Arc::clone(&seen);
        registry.subscribe(move |v| seen_cb.lock().unwrap().push(*v));

        registry.notify(&1);
        registry.notify(&2);
        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let registry: ObserverRegistry<i32> = ObserverRegistry::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_cb = Arc::clone(&seen);
        let id = registry.subscribe(move |v| seen_cb.lock().unwrap().push(*v));

        registry.notify(&1);
        assert!(registry.unsubscribe(id));
        registry.notify(&2);
        assert_eq!(*seen.lock().unwrap(), vec![1]);
        assert!(!registry.unsubscribe(id));
    }

    #[test]
    fn clones_share_the_observer_set() {
        let registry: ObserverRegistry<i32> = ObserverRegistry::new();
        let handle = registry.clone();
        handle.subscribe(|_| {});
        assert_eq!(registry.observer_count(), 1);
    }
}
