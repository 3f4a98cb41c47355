use crate::runtime::{NodeId, ReactiveRuntime};
use std::sync::Arc;

/// A side effect that runs when its dependencies change.
///
/// Effects automatically track signal and memo reads and re-run when those
/// change. The effect runs immediately on creation to establish initial
/// dependencies. Dropping the handle unregisters it.
///
/// # Examples
///
/// ```
/// use stepwise::runtime::ReactiveRuntime;
/// use stepwise::{Effect, Signal};
/// use std::sync::{Arc, atomic::{AtomicI32, Ordering}};
///
/// let runtime = ReactiveRuntime::new();
/// let signal = Signal::new(&runtime, 5);
/// let last_value = Arc::new(AtomicI32::new(0));
/// let last_value_clone = last_value.clone();
///
/// let _effect = Effect::new(&runtime, {
///     let signal = signal.clone();
///     move || {
///         last_value_clone.store(signal.get(), Ordering::SeqCst);
///     }
/// });
///
/// assert_eq!(last_value.load(Ordering::SeqCst), 5);
///
/// signal.set(10);
/// assert_eq!(last_value.load(Ordering::SeqCst), 10);
/// ```
#[must_use = "the effect stops running as soon as the handle is dropped"]
pub struct Effect {
    id: NodeId,
    runtime: Arc<ReactiveRuntime>,
}

impl Effect {
    /// Create a new effect that runs when dependencies change.
    pub fn new<F>(runtime: &Arc<ReactiveRuntime>, effect: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = runtime.next_id();
        runtime.register_effect(id, Arc::new(effect));

        Self {
            id,
            runtime: Arc::clone(runtime),
        }
    }
}

impl Drop for Effect {
    fn drop(&mut self) {
        self.runtime.dispose(self.id);
    }
}
