use crate::runtime::{NodeId, ReactiveRuntime};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// A reactive signal that holds a value and notifies observers when changed.
pub struct Signal<T> {
    value: Arc<RwLock<T>>,
    id: NodeId,
    runtime: Arc<ReactiveRuntime>,
}

impl<T: Send + Sync + 'static> Signal<T> {
    /// Create a new signal owned by `runtime`.
    pub fn new(runtime: &Arc<ReactiveRuntime>, initial: T) -> Self {
        Self {
            value: Arc::new(RwLock::new(initial)),
            id: runtime.next_id(),
            runtime: Arc::clone(runtime),
        }
    }

    /// Set a new value for the signal.
    pub fn set(&self, new_value: T) {
        *self.value.write() = new_value;
        self.runtime.notify_observers(self.id);
    }

    /// Update the value in place and return whatever the closure returns.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = {
            let mut value = self.value.write();
            f(&mut value)
        };
        self.runtime.notify_observers(self.id);
        result
    }

    /// Update the value in place, notifying observers only if `f` reports a
    /// change. Returns what `f` returned.
    pub fn update_if(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        let changed = {
            let mut value = self.value.write();
            f(&mut value)
        };
        if changed {
            self.runtime.notify_observers(self.id);
        }
        changed
    }

    /// Read the value with a function without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.runtime.track_read(self.id);
        let value = self.value.read();
        f(&value)
    }

    /// Read the value without registering a dependency.
    pub fn with_untracked<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let value = self.value.read();
        f(&value)
    }

    /// Get the signal's unique ID.
    pub fn id(&self) -> NodeId {
        self.id
    }
}

impl<T: Clone + Send + Sync + 'static> Signal<T> {
    /// Get the current value of the signal.
    pub fn get(&self) -> T {
        self.with(T::clone)
    }

    /// Get the current value without registering a dependency.
    pub fn get_untracked(&self) -> T {
        self.with_untracked(T::clone)
    }
}

impl<T: PartialEq + Send + Sync + 'static> Signal<T> {
    /// Set a new value, notifying observers only if it differs.
    ///
    /// Returns whether the value changed.
    pub fn set_if_changed(&self, new_value: T) -> bool {
        {
            let mut value = self.value.write();
            if *value == new_value {
                return false;
            }
            *value = new_value;
        }
        self.runtime.notify_observers(self.id);
        true
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            id: self.id,
            runtime: Arc::clone(&self.runtime),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("id", &self.id)
            .field("value", &*self.value.read())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_get_set_update() {
        let runtime = ReactiveRuntime::new();
        let count = Signal::new(&runtime, 0);
        assert_eq!(count.get(), 0);

        count.set(42);
        assert_eq!(count.get(), 42);

        let doubled = count.update(|n| {
            *n += 10;
            *n * 2
        });
        assert_eq!(doubled, 104);
        assert_eq!(count.get(), 52);
    }

    #[test]
    fn clones_share_the_same_cell() {
        let runtime = ReactiveRuntime::new();
        let a = Signal::new(&runtime, String::from("first"));
        let b = a.clone();

        b.set(String::from("second"));
        assert_eq!(a.get(), "second");
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn set_if_changed_reports_change() {
        let runtime = ReactiveRuntime::new();
        let flag = Signal::new(&runtime, false);

        assert!(!flag.set_if_changed(false));
        assert!(flag.set_if_changed(true));
        assert!(flag.get());
    }

    #[test]
    fn update_if_notifies_only_on_reported_change() {
        use crate::signal::Effect;
        use std::sync::atomic::{AtomicUsize, Ordering};

        let runtime = ReactiveRuntime::new();
        let items = Signal::new(&runtime, vec![1, 2]);
        let runs = Arc::new(AtomicUsize::new(0));
        let _effect = Effect::new(&runtime, {
            let (items, runs) = (items.clone(), Arc::clone(&runs));
            move || {
                items.with(|_| ());
                runs.fetch_add(1, Ordering::SeqCst);
            }
        });

        assert!(!items.update_if(|v| v.contains(&9)));
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        assert!(items.update_if(|v| {
            v.push(3);
            true
        }));
        assert_eq!(runs.load(Ordering::SeqCst), 2);
        assert_eq!(items.get(), vec![1, 2, 3]);
    }
}
