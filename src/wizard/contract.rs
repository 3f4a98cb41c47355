use serde_json::Value;

use super::data::{StepRecord, WizardData};
use super::labels::WizardLabels;
use super::navigation::NavigationFacts;
use super::snapshot::WizardSnapshot;
use super::step::Step;
use crate::error::Result;

/// The action and query surface every wizard variant exposes.
///
/// All methods take `&self`; variants hold their state behind interior
/// mutability so UI callbacks can share one handle. Mutators that receive an
/// unknown step id log a warning and return `false` instead of failing.
pub trait WizardStore {
    // ----- actions -----

    /// Advance to the next step by order. No-op on the last step.
    fn move_next(&self) -> bool;

    /// Go back to the previous step by order. No-op on the first step.
    fn move_back(&self) -> bool;

    /// Jump to a step by id.
    fn set_current_step(&self, step_id: &str) -> bool;

    /// Replace the whole record of a known step.
    fn set_step_data(&self, step_id: &str, record: StepRecord) -> bool;

    /// Merge one field into a step's record.
    ///
    /// The step id is not checked: a record is created for unknown ids too.
    fn update_field(&self, step_id: &str, field: &str, value: Value);

    /// Open or close a step's forward gate.
    fn set_can_move_next(&self, step_id: &str, can_move_next: bool) -> bool;

    fn set_loading(&self, is_loading: bool);

    /// Set or clear the user-visible error. An empty message clears it.
    fn set_error(&self, message: Option<String>);

    /// Replace the step list. On error the wizard is left unchanged.
    fn initialize_steps(&self, steps: Vec<Step>, current_step_id: Option<&str>) -> Result<()>;

    /// Back to the just-constructed state, keeping the step list.
    fn reset(&self);

    // ----- queries -----

    fn steps(&self) -> Vec<Step>;

    /// Wizard-level default labels.
    fn labels(&self) -> WizardLabels;

    fn current_step(&self) -> Step;

    fn step_by_id(&self, step_id: &str) -> Option<Step>;

    fn step_data(&self, step_id: &str) -> StepRecord;

    fn wizard_data(&self) -> WizardData;

    fn next_step(&self) -> Option<Step>;

    fn previous_step(&self) -> Option<Step>;

    fn navigation(&self) -> NavigationFacts;

    fn is_loading(&self) -> bool;

    fn error(&self) -> Option<String>;

    // ----- provided -----

    fn current_step_id(&self) -> String {
        self.navigation().current_step_id
    }

    fn current_step_position(&self) -> u32 {
        self.navigation().current_step_position
    }

    fn total_steps(&self) -> u32 {
        self.navigation().total_steps
    }

    fn can_move_next(&self) -> bool {
        self.navigation().can_move_next
    }

    fn can_move_back(&self) -> bool {
        self.navigation().can_move_back
    }

    fn is_first_step(&self) -> bool {
        self.navigation().is_first_step
    }

    fn is_last_step(&self) -> bool {
        self.navigation().is_last_step
    }

    fn next_button_label(&self) -> String {
        self.navigation().next_button_label
    }

    fn previous_button_label(&self) -> String {
        self.navigation().previous_button_label
    }

    fn snapshot(&self) -> WizardSnapshot {
        WizardSnapshot {
            navigation: self.navigation(),
            next_step_id: self.next_step().map(|step| step.id),
            previous_step_id: self.previous_step().map(|step| step.id),
            wizard_data: self.wizard_data(),
            is_loading: self.is_loading(),
            error: self.error(),
        }
    }
}

/// Treat an empty error message as no error.
pub(crate) fn normalize_error(message: Option<String>) -> Option<String> {
    message.filter(|message| !message.is_empty())
}
