use serde_json::Value;

use crate::error::Result;
use crate::wizard::{
    normalize_error, NavigationFacts, Navigator, Step, StepDataStore, StepRecord, WizardConfig,
    WizardLabels,
};

/// Flat wizard state held by a [`ReactiveWizard`](super::ReactiveWizard).
///
/// Base fields are mutated by the action methods; `derived` caches the
/// navigation facts and is recomputed at the end of every action, so a
/// reader never sees a value older than the last committed write.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatWizardState {
    navigator: Navigator,
    step_data: StepDataStore,
    is_loading: bool,
    error: Option<String>,
    derived: NavigationFacts,
}

impl FlatWizardState {
    pub fn new(config: WizardConfig) -> Result<Self> {
        let navigator = Navigator::new(
            config.steps,
            config.labels,
            config.current_step_id.as_deref(),
        )?;
        let derived = navigator.facts();
        Ok(Self {
            navigator,
            step_data: StepDataStore::new(),
            is_loading: false,
            error: None,
            derived,
        })
    }

    fn recompute(&mut self) {
        self.derived = self.navigator.facts();
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn step_data(&self) -> &StepDataStore {
        &self.step_data
    }

    pub fn derived(&self) -> &NavigationFacts {
        &self.derived
    }

    pub fn labels(&self) -> &WizardLabels {
        self.navigator.labels()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn move_next(&mut self) -> bool {
        let moved = self.navigator.move_next();
        self.recompute();
        moved
    }

    pub fn move_back(&mut self) -> bool {
        let moved = self.navigator.move_back();
        self.recompute();
        moved
    }

    pub fn set_current_step(&mut self, step_id: &str) -> bool {
        let moved = self.navigator.set_current_step(step_id);
        self.recompute();
        moved
    }

    pub fn set_step_data(&mut self, step_id: &str, record: StepRecord) -> bool {
        self.step_data
            .replace_known(self.navigator.registry(), step_id, record)
    }

    pub fn update_field(&mut self, step_id: &str, field: &str, value: Value) {
        self.step_data.update_field(step_id, field, value);
    }

    pub fn set_can_move_next(&mut self, step_id: &str, can_move_next: bool) -> bool {
        let found = self.navigator.set_can_move_next(step_id, can_move_next);
        self.recompute();
        found
    }

    pub fn set_loading(&mut self, is_loading: bool) {
        self.is_loading = is_loading;
    }

    pub fn set_error(&mut self, message: Option<String>) {
        self.error = normalize_error(message);
    }

    pub fn initialize_steps(
        &mut self,
        steps: Vec<Step>,
        current_step_id: Option<&str>,
    ) -> Result<()> {
        self.navigator.reinitialize(steps, current_step_id)?;
        self.recompute();
        Ok(())
    }

    pub fn reset(&mut self) {
        self.navigator.reset();
        self.step_data.clear();
        self.is_loading = false;
        self.error = None;
        self.recompute();
    }
}
