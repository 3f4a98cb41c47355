//! Runtime support for reactive primitives.
//!
//! This module provides the infrastructure for dependency tracking,
//! reactive graph management, and batched change propagation.

mod context;

pub use context::{NodeId, ReactiveRuntime};
