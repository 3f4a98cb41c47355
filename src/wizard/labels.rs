use serde::{Deserialize, Serialize};

use super::registry::StepRegistry;
use super::step::Step;

pub const DEFAULT_NEXT_LABEL: &str = "Next";
pub const DEFAULT_PREVIOUS_LABEL: &str = "Previous";
pub const DEFAULT_FINISH_LABEL: &str = "Finish";

/// Wizard-level default button labels.
///
/// Labels are opaque strings; a step's own `next_label` / `previous_label`
/// always wins over these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WizardLabels {
    pub next_label: String,
    pub previous_label: String,
    /// Forward label for the step with the maximum order.
    pub finish_label: String,
}

impl Default for WizardLabels {
    fn default() -> Self {
        Self {
            next_label: DEFAULT_NEXT_LABEL.to_string(),
            previous_label: DEFAULT_PREVIOUS_LABEL.to_string(),
            finish_label: DEFAULT_FINISH_LABEL.to_string(),
        }
    }
}

impl WizardLabels {
    pub fn new(
        next_label: impl Into<String>,
        previous_label: impl Into<String>,
        finish_label: impl Into<String>,
    ) -> Self {
        Self {
            next_label: next_label.into(),
            previous_label: previous_label.into(),
            finish_label: finish_label.into(),
        }
    }

    /// Forward button label while `step` is current.
    pub fn resolve_next(&self, step: &Step, registry: &StepRegistry) -> String {
        match &step.next_label {
            Some(label) => label.clone(),
            None if registry.is_last_order(step.order) => self.finish_label.clone(),
            None => self.next_label.clone(),
        }
    }

    /// Back button label while `step` is current.
    pub fn resolve_previous(&self, step: &Step) -> String {
        step.previous_label
            .clone()
            .unwrap_or_else(|| self.previous_label.clone())
    }
}
