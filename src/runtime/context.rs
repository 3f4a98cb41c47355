use parking_lot::{Mutex, MutexGuard};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Identifier of a node (signal, memo or effect) in a runtime's graph.
pub type NodeId = usize;

type EffectFn = Arc<dyn Fn() + Send + Sync>;

/// Dependency graph for one runtime.
#[derive(Default)]
struct ReactiveGraph {
    current_observer: Option<NodeId>,
    // Map from source ID to set of observer IDs that depend on it
    dependents: HashMap<NodeId, HashSet<NodeId>>,
    // Map from observer ID to set of source IDs it depends on
    sources: HashMap<NodeId, HashSet<NodeId>>,
    // Map from effect ID to the effect function
    effects: HashMap<NodeId, EffectFn>,
    // Map from memo ID to dirty state
    memo_dirty: HashMap<NodeId, bool>,
    batch_depth: usize,
    pending_effects: Vec<NodeId>,
}

impl ReactiveGraph {
    /// Mark every memo downstream of `source_id` dirty and return the
    /// effects that depend on any of them, each once.
    fn invalidate_from(&mut self, source_id: NodeId) -> Vec<NodeId> {
        let mut visited = HashSet::new();
        let mut effects = Vec::new();
        let mut stack = vec![source_id];

        while let Some(node) = stack.pop() {
            let Some(observers) = self.dependents.get(&node) else {
                continue;
            };
            let observers: Vec<NodeId> = observers.iter().copied().collect();
            for observer in observers {
                if !visited.insert(observer) {
                    continue;
                }
                if let Some(dirty) = self.memo_dirty.get_mut(&observer) {
                    *dirty = true;
                    stack.push(observer);
                } else if self.effects.contains_key(&observer) {
                    effects.push(observer);
                }
            }
        }
        effects
    }

    fn unlink_sources(&mut self, observer_id: NodeId) {
        if let Some(old) = self.sources.remove(&observer_id) {
            for source_id in old {
                if let Some(deps) = self.dependents.get_mut(&source_id) {
                    deps.remove(&observer_id);
                }
            }
        }
    }
}

/// Reactive runtime owning the dependency graph of a set of signals,
/// memos and effects.
///
/// A runtime is created explicitly and handed to every primitive that
/// belongs to it. Nothing is stored globally, so two wizards never share
/// a graph.
///
/// The graph lock is never held while user code runs: effect bodies and
/// memo computations execute with the lock released, which lets them read
/// and write other primitives of the same runtime.
///
/// # Examples
///
/// ```
/// use stepwise::runtime::ReactiveRuntime;
/// use stepwise::Signal;
///
/// let runtime = ReactiveRuntime::new();
/// let signal = Signal::new(&runtime, 42);
/// assert_eq!(signal.get(), 42);
/// ```
pub struct ReactiveRuntime {
    next_id: AtomicUsize,
    graph: Mutex<ReactiveGraph>,
}

impl ReactiveRuntime {
    /// Create a new isolated runtime.
    pub fn new() -> Arc<Self> {
        Arc::new(ReactiveRuntime {
            next_id: AtomicUsize::new(0),
            graph: Mutex::new(ReactiveGraph::default()),
        })
    }

    fn graph(&self) -> MutexGuard<'_, ReactiveGraph> {
        self.graph.lock()
    }

    /// Generate the next unique ID for a reactive primitive.
    pub fn next_id(&self) -> NodeId {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Track a read of `source_id` by the current observer, if any.
    pub fn track_read(&self, source_id: NodeId) {
        let mut graph = self.graph();
        if let Some(observer) = graph.current_observer {
            if observer == source_id {
                return;
            }
            graph
                .dependents
                .entry(source_id)
                .or_default()
                .insert(observer);
            graph
                .sources
                .entry(observer)
                .or_default()
                .insert(source_id);
        }
    }

    /// Notify all observers that depend on `source_id`.
    ///
    /// Propagation is two-phase: every memo reachable from the source is
    /// marked dirty and the affected effects are collected first, then each
    /// effect runs once. An effect therefore never reads a memo that is
    /// still waiting to be invalidated by the same write.
    pub fn notify_observers(&self, source_id: NodeId) {
        let effects = {
            let mut graph = self.graph();
            let effects = graph.invalidate_from(source_id);
            if graph.batch_depth > 0 {
                for effect_id in effects {
                    if !graph.pending_effects.contains(&effect_id) {
                        graph.pending_effects.push(effect_id);
                    }
                }
                return;
            }
            effects
        };

        for effect_id in effects {
            self.run_effect(effect_id);
        }
    }

    /// Register an effect body under `effect_id` and run it once to collect
    /// its dependencies.
    pub fn register_effect(&self, effect_id: NodeId, effect: EffectFn) {
        self.graph().effects.insert(effect_id, effect);
        self.run_effect(effect_id);
    }

    /// Re-run an effect, replacing its previous dependency set.
    fn run_effect(&self, effect_id: NodeId) {
        let effect = {
            let mut graph = self.graph();
            let effect = graph.effects.get(&effect_id).cloned();
            if effect.is_some() {
                graph.unlink_sources(effect_id);
            }
            effect
        };

        if let Some(effect) = effect {
            self.with_observer(effect_id, || effect());
        }
    }

    /// Drop every trace of a node from the graph.
    pub fn dispose(&self, node_id: NodeId) {
        let mut graph = self.graph();
        graph.effects.remove(&node_id);
        graph.memo_dirty.remove(&node_id);
        graph.unlink_sources(node_id);
        graph.dependents.remove(&node_id);
        graph.pending_effects.retain(|id| *id != node_id);
    }

    /// Run a function with a specific observer as the current context.
    pub fn with_observer<F, R>(&self, observer_id: NodeId, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let prev = self.graph().current_observer.replace(observer_id);
        let result = f();
        self.graph().current_observer = prev;
        result
    }

    /// Run a function without tracking any reads it performs.
    pub fn untracked<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let prev = self.graph().current_observer.take();
        let result = f();
        self.graph().current_observer = prev;
        result
    }

    /// Run `f` with effects deferred until it returns.
    ///
    /// Memos are still marked dirty immediately; effects triggered inside
    /// the batch run once each when the outermost batch completes.
    pub fn batch<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        self.graph().batch_depth += 1;
        let result = f();

        let pending = {
            let mut graph = self.graph();
            graph.batch_depth -= 1;
            if graph.batch_depth == 0 {
                std::mem::take(&mut graph.pending_effects)
            } else {
                Vec::new()
            }
        };
        for effect_id in pending {
            self.run_effect(effect_id);
        }
        result
    }

    /// Register a memo and mark it as dirty initially.
    pub fn register_memo(&self, memo_id: NodeId) {
        self.graph().memo_dirty.insert(memo_id, true);
    }

    /// Check if a memo is dirty (needs recomputation).
    pub fn is_memo_dirty(&self, memo_id: NodeId) -> bool {
        self.graph()
            .memo_dirty
            .get(&memo_id)
            .copied()
            .unwrap_or(true)
    }

    /// Forget the dependencies a memo collected on its last computation.
    pub fn reset_memo_sources(&self, memo_id: NodeId) {
        self.graph().unlink_sources(memo_id);
    }

    /// Mark a memo as clean (after recomputation).
    pub fn mark_memo_clean(&self, memo_id: NodeId) {
        self.graph().memo_dirty.insert(memo_id, false);
    }

    /// Number of live effects registered with this runtime.
    pub fn effect_count(&self) -> usize {
        self.graph().effects.len()
    }
}
