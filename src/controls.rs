//! Helpers UI code uses to drive one wizard.
//!
//! Both helpers borrow the store they operate on; there is no ambient
//! "current wizard". A step component receives a [`StepForm`] for its own
//! step, the footer receives a [`WizardNavigation`].

use serde_json::Value;
use tracing::debug;

use crate::wizard::{StepRecord, WizardData, WizardStore};

/// Result of pressing the forward button.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// Moved to the next step.
    Moved,
    /// The current step's gate is closed.
    Blocked,
    /// Pressed on the last step with the gate open: the flow is done and
    /// this is the collected data.
    Completed(WizardData),
}

/// Footer controls bound to one wizard.
pub struct WizardNavigation<'s, S: WizardStore + ?Sized> {
    store: &'s S,
}

impl<'s, S: WizardStore + ?Sized> WizardNavigation<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Forward button: respects the current step's `can_move_next` gate and
    /// reports completion on the last step instead of moving.
    pub fn next(&self) -> Advance {
        let facts = self.store.navigation();
        if !facts.can_move_next {
            debug!(step_id = %facts.current_step_id, "advance blocked");
            return Advance::Blocked;
        }
        if facts.is_last_step {
            return Advance::Completed(self.store.wizard_data());
        }
        self.store.move_next();
        Advance::Moved
    }

    /// Back button. Returns whether the wizard moved.
    pub fn back(&self) -> bool {
        self.store.can_move_back() && self.store.move_back()
    }

    /// Jump to a step, e.g. from a step indicator.
    pub fn go_to(&self, step_id: &str) -> bool {
        self.store.set_current_step(step_id)
    }

    /// `(current position, total steps)` for progress indicators.
    pub fn progress(&self) -> (u32, u32) {
        let facts = self.store.navigation();
        (facts.current_step_position, facts.total_steps)
    }

    /// Whether the forward button should be enabled.
    pub fn next_enabled(&self) -> bool {
        self.store.can_move_next()
    }

    pub fn next_label(&self) -> String {
        self.store.next_button_label()
    }

    pub fn previous_label(&self) -> String {
        self.store.previous_button_label()
    }
}

/// Field access for one step's form, bound to one wizard.
pub struct StepForm<'s, S: WizardStore + ?Sized> {
    store: &'s S,
    step_id: String,
}

impl<'s, S: WizardStore + ?Sized> StepForm<'s, S> {
    pub fn new(store: &'s S, step_id: impl Into<String>) -> Self {
        Self {
            store,
            step_id: step_id.into(),
        }
    }

    /// Form for whichever step is current right now.
    pub fn current(store: &'s S) -> Self {
        let step_id = store.current_step_id();
        Self::new(store, step_id)
    }

    pub fn step_id(&self) -> &str {
        &self.step_id
    }

    pub fn field(&self, name: &str) -> Option<Value> {
        self.store.step_data(&self.step_id).remove(name)
    }

    pub fn set_field(&self, name: &str, value: Value) {
        self.store.update_field(&self.step_id, name, value);
    }

    pub fn values(&self) -> StepRecord {
        self.store.step_data(&self.step_id)
    }

    /// Replace all values. Returns false if the step is unknown.
    pub fn replace(&self, record: StepRecord) -> bool {
        self.store.set_step_data(&self.step_id, record)
    }

    /// Open or close this step's forward gate, typically from form
    /// validation.
    pub fn set_complete(&self, complete: bool) -> bool {
        self.store.set_can_move_next(&self.step_id, complete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ReactiveWizard, Step, WizardConfig};
    use serde_json::json;

    fn wizard() -> ReactiveWizard {
        ReactiveWizard::new(WizardConfig::new(vec![
            Step::new("profile", 1),
            Step::new("confirm", 2),
        ]))
        .unwrap()
    }

    #[test]
    fn next_is_blocked_until_step_is_complete() {
        let wizard = wizard();
        let nav = WizardNavigation::new(&wizard);
        let form = StepForm::current(&wizard);

        assert_eq!(nav.next(), Advance::Blocked);
        assert!(!nav.next_enabled());

        form.set_field("name", json!("Ada"));
        assert!(form.set_complete(true));
        assert_eq!(nav.next(), Advance::Moved);
        assert_eq!(nav.progress(), (2, 2));
    }

    #[test]
    fn next_on_last_step_completes_with_data() {
        let wizard = wizard();
        let nav = WizardNavigation::new(&wizard);
        StepForm::new(&wizard, "profile").set_field("name", json!("Ada"));
        wizard.set_current_step("confirm");
        StepForm::new(&wizard, "confirm").set_complete(true);

        match nav.next() {
            Advance::Completed(data) => {
                assert_eq!(data["profile"]["name"], json!("Ada"));
            }
            other => panic!("expected completion, got {other:?}"),
        }
        assert_eq!(wizard.current_step_id(), "confirm");
    }

    #[test]
    fn back_is_false_on_first_step() {
        let wizard = wizard();
        let nav = WizardNavigation::new(&wizard);
        assert!(!nav.back());
        assert!(nav.go_to("confirm"));
        assert!(nav.back());
        assert_eq!(nav.previous_label(), "Previous");
    }

    #[test]
    fn form_reads_back_fields() {
        let wizard = wizard();
        let form = StepForm::new(&wizard, "profile");
        assert_eq!(form.field("name"), None);

        assert!(form.replace(json!({"name": "Ada", "age": 36}).as_object().cloned().unwrap()));
        assert_eq!(form.field("age"), Some(json!(36)));
        assert_eq!(form.values().len(), 2);
        assert_eq!(form.step_id(), "profile");

        let unknown = StepForm::new(&wizard, "ghost");
        assert!(!unknown.replace(StepRecord::new()));
    }
}
