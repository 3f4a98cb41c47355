//! High-level state management with stores.
//!
//! Stores hold a single flat state value and notify subscribers after every
//! committed write. The flat-reactive wizard is built on top of them.

mod store;

pub use store::{Store, Subscription};
