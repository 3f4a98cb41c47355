//! Wizard state shared by every store variant.
//!
//! Validation, step adjacency, label resolution and step-data semantics live
//! here once. The [`observable`](crate::observable) and
//! [`reactive`](crate::reactive) variants only decide how this state is held
//! and how changes reach the UI.

mod config;
mod contract;
mod data;
mod labels;
pub mod navigation;
mod registry;
mod snapshot;
mod step;

pub(crate) use contract::normalize_error;
pub use config::WizardConfig;
pub use contract::WizardStore;
pub use data::{StepDataStore, StepRecord, WizardData};
pub use labels::{WizardLabels, DEFAULT_FINISH_LABEL, DEFAULT_NEXT_LABEL, DEFAULT_PREVIOUS_LABEL};
pub use navigation::{NavigationFacts, Navigator, StepCursor};
pub use registry::StepRegistry;
pub use snapshot::WizardSnapshot;
pub use step::Step;
