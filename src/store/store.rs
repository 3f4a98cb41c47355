use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

type Subscriber<T> = Arc<dyn Fn(&T) + Send + Sync>;
type SubscriberList<T> = RwLock<Vec<(u64, Subscriber<T>)>>;

/// A thread-safe store for managing application state.
///
/// Stores hold one flat state value. Every write goes through [`Store::update`]
/// or [`Store::set`] and is followed by a notification of all subscribers with
/// the committed state.
pub struct Store<T> {
    state: Arc<RwLock<T>>,
    subscribers: Arc<SubscriberList<T>>,
    next_subscriber: Arc<AtomicU64>,
}

impl<T: Clone + Send + Sync + 'static> Store<T> {
    /// Create a new store with the given initial state.
    pub fn new(initial: T) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial)),
            subscribers: Arc::new(RwLock::new(Vec::new())),
            next_subscriber: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Get a clone of the current state.
    pub fn get(&self) -> T {
        self.state.read().clone()
    }

    /// Update the state using a function and return its result.
    pub fn update<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        let result = {
            let mut state = self.state.write();
            f(&mut state)
        };
        self.notify();
        result
    }

    /// Update the state only if `f` succeeds; subscribers are notified on
    /// success only and the state is left untouched on error.
    pub fn try_update<F, R, E>(&self, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut T) -> Result<R, E>,
    {
        let result = {
            let mut state = self.state.write();
            let mut draft = state.clone();
            let result = f(&mut draft)?;
            *state = draft;
            result
        };
        self.notify();
        Ok(result)
    }

    /// Set a new state value.
    pub fn set(&self, new_state: T) {
        *self.state.write() = new_state;
        self.notify();
    }

    /// Subscribe to state changes.
    ///
    /// The callback will be called whenever the state is updated, until the
    /// returned [`Subscription`] is dropped.
    pub fn subscribe<F>(&self, callback: F) -> Subscription<T>
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.next_subscriber.fetch_add(1, Ordering::SeqCst);
        self.subscribers.write().push((id, Arc::new(callback)));
        Subscription {
            id,
            subscribers: Arc::downgrade(&self.subscribers),
        }
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }

    /// Notify all subscribers of a state change.
    ///
    /// Locks are released before callbacks run, so subscribers may read the
    /// store or subscribe again from inside the callback.
    fn notify(&self) {
        let snapshot = self.get();
        let subscribers: Vec<Subscriber<T>> = self
            .subscribers
            .read()
            .iter()
            .map(|(_, subscriber)| Arc::clone(subscriber))
            .collect();
        for subscriber in subscribers {
            subscriber(&snapshot);
        }
    }

    /// Read state without cloning it.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        let state = self.state.read();
        f(&state)
    }
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            subscribers: Arc::clone(&self.subscribers),
            next_subscriber: Arc::clone(&self.next_subscriber),
        }
    }
}

/// RAII guard for a store subscriber.
#[must_use = "the subscriber is removed as soon as the guard is dropped"]
pub struct Subscription<T> {
    id: u64,
    subscribers: Weak<SubscriberList<T>>,
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            subscribers.write().retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Debug, PartialEq)]
    struct AppState {
        count: usize,
        name: String,
    }

    fn app_store() -> Store<AppState> {
        Store::new(AppState {
            count: 0,
            name: "test".to_string(),
        })
    }

    #[test]
    fn store_get_set() {
        let store = app_store();
        assert_eq!(store.get().count, 0);

        store.set(AppState {
            count: 42,
            name: "updated".to_string(),
        });

        assert_eq!(store.get().count, 42);
        assert_eq!(store.get().name, "updated");
    }

    #[test]
    fn store_update_returns_closure_result() {
        let store = app_store();

        let previous = store.update(|state| {
            let previous = state.count;
            state.count += 10;
            previous
        });

        assert_eq!(previous, 0);
        assert_eq!(store.get().count, 10);
    }

    #[test]
    fn try_update_leaves_state_untouched_on_error() {
        let store = app_store();
        let calls = Arc::new(AtomicUsize::new(0));
        let _sub = store.subscribe({
            let calls = Arc::clone(&calls);
            move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
            }
        });

        let result: Result<(), &str> = store.try_update(|state| {
            state.count = 99;
            Err("rejected")
        });

        assert_eq!(result, Err("rejected"));
        assert_eq!(store.get().count, 0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn store_subscribe_until_dropped() {
        let store = app_store();
        let call_count = Arc::new(AtomicUsize::new(0));
        let call_count_clone = call_count.clone();

        let subscription = store.subscribe(move |_state| {
            call_count_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(call_count.load(Ordering::SeqCst), 0);

        store.update(|state| state.count += 1);
        assert_eq!(call_count.load(Ordering::SeqCst), 1);

        store.update(|state| state.count += 1);
        assert_eq!(call_count.load(Ordering::SeqCst), 2);

        drop(subscription);
        store.update(|state| state.count += 1);
        assert_eq!(call_count.load(Ordering::SeqCst), 2);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn subscriber_may_read_store_during_notification() {
        let store = app_store();
        let seen = Arc::new(AtomicUsize::new(0));

        let _sub = store.subscribe({
            let store = store.clone();
            let seen = Arc::clone(&seen);
            move |state| {
                assert_eq!(store.get(), *state);
                seen.store(state.count, Ordering::SeqCst);
            }
        });

        store.update(|state| state.count = 7);
        assert_eq!(seen.load(Ordering::SeqCst), 7);
    }
}
