//! Flat-reactive wizard.
//!
//! The whole wizard is one [`FlatWizardState`] value inside a [`Store`].
//! Every action is a store update, derived fields are recomputed by hand at
//! the end of each update, and subscribers see the committed state.

mod state;

pub use state::FlatWizardState;

use serde_json::Value;

use crate::error::Result;
use crate::store::{Store, Subscription};
use crate::wizard::{
    NavigationFacts, Step, StepRecord, WizardConfig, WizardData, WizardLabels, WizardStore,
};

/// Wizard backed by a single flat [`Store`].
#[derive(Clone)]
pub struct ReactiveWizard {
    store: Store<FlatWizardState>,
}

impl ReactiveWizard {
    /// Build a wizard, validating the step list.
    pub fn new(config: WizardConfig) -> Result<Self> {
        Ok(Self {
            store: Store::new(FlatWizardState::new(config)?),
        })
    }

    pub fn with_steps(steps: Vec<Step>, labels: WizardLabels) -> Result<Self> {
        Self::new(WizardConfig::new(steps).with_labels(labels))
    }

    /// Call `callback` with the committed state after every action.
    pub fn subscribe<F>(&self, callback: F) -> Subscription<FlatWizardState>
    where
        F: Fn(&FlatWizardState) + Send + Sync + 'static,
    {
        self.store.subscribe(callback)
    }

    /// Clone of the current flat state.
    pub fn state(&self) -> FlatWizardState {
        self.store.get()
    }
}

impl WizardStore for ReactiveWizard {
    fn move_next(&self) -> bool {
        self.store.update(FlatWizardState::move_next)
    }

    fn move_back(&self) -> bool {
        self.store.update(FlatWizardState::move_back)
    }

    fn set_current_step(&self, step_id: &str) -> bool {
        self.store.update(|state| state.set_current_step(step_id))
    }

    fn set_step_data(&self, step_id: &str, record: StepRecord) -> bool {
        self.store.update(|state| state.set_step_data(step_id, record))
    }

    fn update_field(&self, step_id: &str, field: &str, value: Value) {
        self.store
            .update(|state| state.update_field(step_id, field, value));
    }

    fn set_can_move_next(&self, step_id: &str, can_move_next: bool) -> bool {
        self.store
            .update(|state| state.set_can_move_next(step_id, can_move_next))
    }

    fn set_loading(&self, is_loading: bool) {
        self.store.update(|state| state.set_loading(is_loading));
    }

    fn set_error(&self, message: Option<String>) {
        self.store.update(|state| state.set_error(message));
    }

    fn initialize_steps(&self, steps: Vec<Step>, current_step_id: Option<&str>) -> Result<()> {
        self.store
            .try_update(|state| state.initialize_steps(steps, current_step_id))
    }

    fn reset(&self) {
        self.store.update(FlatWizardState::reset);
    }

    fn steps(&self) -> Vec<Step> {
        self.store
            .read(|state| state.navigator().registry().steps().to_vec())
    }

    fn labels(&self) -> WizardLabels {
        self.store.read(|state| state.labels().clone())
    }

    fn current_step(&self) -> Step {
        self.store
            .read(|state| state.navigator().current_step().clone())
    }

    fn step_by_id(&self, step_id: &str) -> Option<Step> {
        self.store
            .read(|state| state.navigator().registry().get(step_id).cloned())
    }

    fn step_data(&self, step_id: &str) -> StepRecord {
        self.store.read(|state| state.step_data().get(step_id))
    }

    fn wizard_data(&self) -> WizardData {
        self.store.read(|state| state.step_data().wizard_data())
    }

    fn next_step(&self) -> Option<Step> {
        self.store
            .read(|state| state.navigator().next_step().cloned())
    }

    fn previous_step(&self) -> Option<Step> {
        self.store
            .read(|state| state.navigator().previous_step().cloned())
    }

    fn navigation(&self) -> NavigationFacts {
        self.store.read(|state| state.derived().clone())
    }

    fn is_loading(&self) -> bool {
        self.store.read(FlatWizardState::is_loading)
    }

    fn error(&self) -> Option<String> {
        self.store.read(|state| state.error().map(str::to_string))
    }
}
