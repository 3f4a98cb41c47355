use crate::runtime::{NodeId, ReactiveRuntime};
use parking_lot::RwLock;
use std::sync::Arc;

struct MemoInner<T> {
    cached_value: RwLock<Option<T>>,
    compute: Box<dyn Fn() -> T + Send + Sync>,
    id: NodeId,
    runtime: Arc<ReactiveRuntime>,
}

impl<T> Drop for MemoInner<T> {
    fn drop(&mut self) {
        self.runtime.dispose(self.id);
    }
}

/// A memoized computed value that automatically tracks dependencies.
///
/// Memos only recompute when one of the signals or memos read during the
/// last computation has changed since.
pub struct Memo<T> {
    inner: Arc<MemoInner<T>>,
}

impl<T: Clone + Send + Sync + 'static> Memo<T> {
    /// Create a new memo with the given computation function.
    pub fn new<F>(runtime: &Arc<ReactiveRuntime>, compute: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        let id = runtime.next_id();
        runtime.register_memo(id);

        Self {
            inner: Arc::new(MemoInner {
                cached_value: RwLock::new(None),
                compute: Box::new(compute),
                id,
                runtime: Arc::clone(runtime),
            }),
        }
    }

    /// Get the current value, recomputing if necessary.
    pub fn get(&self) -> T {
        let inner = &self.inner;
        inner.runtime.track_read(inner.id);

        if !inner.runtime.is_memo_dirty(inner.id) {
            if let Some(value) = inner.cached_value.read().as_ref() {
                return value.clone();
            }
        }

        inner.runtime.reset_memo_sources(inner.id);
        let value = inner.runtime.with_observer(inner.id, || (inner.compute)());
        *inner.cached_value.write() = Some(value.clone());
        inner.runtime.mark_memo_clean(inner.id);
        value
    }

    /// Read the memoized value with a function.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.get())
    }

    /// Get the memo's unique ID.
    pub fn id(&self) -> NodeId {
        self.inner.id
    }
}

impl<T> Clone for Memo<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
