//! Fine-grained reactive primitives.
//!
//! This module provides the core building blocks the tree-observable wizard
//! is made of:
//! - Signals: Reactive state containers
//! - Memos: Cached computed values
//! - Effects: Side effects that react to changes
//!
//! Every primitive belongs to an explicit [`ReactiveRuntime`](crate::runtime::ReactiveRuntime).

mod effect;
mod memo;
mod signal;

pub use effect::Effect;
pub use memo::Memo;
pub use signal::Signal;
