//! # Stepwise
//!
//! State for multi-step wizards: which step is current, whether the user may
//! move on, what the buttons say, and what each step has collected so far.
//!
//! The step-navigation rules live once in [`wizard`] and are exposed through
//! the [`WizardStore`] trait by two interchangeable backends:
//!
//! ## Tree-observable ([`ObservableWizard`])
//!
//! A tree of fine-grained reactive primitives:
//! - `Signal<T>` - Reactive values that notify dependents when changed
//! - `Memo<T>` - Computed values that automatically track dependencies
//! - `Effect` - Side effects that run when dependencies change
//!
//! ## Flat-reactive ([`ReactiveWizard`])
//!
//! One flat state value in a `Store<T>`, with derived fields recomputed after
//! every action and subscribers notified of each committed write.
//!
//! [`parity`] replays the same operations against both and compares every
//! observable value, and [`controls`] has the helpers step components and
//! navigation footers are written against.
//!
//! ```
//! use stepwise::{ReactiveWizard, Step, WizardLabels, WizardStore};
//!
//! let wizard = ReactiveWizard::with_steps(
//!     vec![Step::new("account", 1), Step::new("confirm", 2)],
//!     WizardLabels::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(wizard.next_button_label(), "Next");
//! wizard.move_next();
//! assert_eq!(wizard.next_button_label(), "Finish");
//! ```

pub mod controls;
pub mod error;
pub mod observable;
pub mod parity;
pub mod reactive;
pub mod runtime;
pub mod signal;
pub mod store;
pub mod wizard;

// Re-export main types for convenience
pub use error::{Result, WizardError};
pub use observable::ObservableWizard;
pub use reactive::ReactiveWizard;
pub use signal::{Effect, Memo, Signal};
pub use store::{Store, Subscription};
pub use wizard::{
    NavigationFacts, Step, StepRecord, WizardConfig, WizardData, WizardLabels, WizardSnapshot,
    WizardStore,
};
