use serde::Serialize;

use super::data::WizardData;
use super::navigation::NavigationFacts;

/// Every observable value of a wizard at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardSnapshot {
    #[serde(flatten)]
    pub navigation: NavigationFacts,
    pub next_step_id: Option<String>,
    pub previous_step_id: Option<String>,
    pub wizard_data: WizardData,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl WizardSnapshot {
    /// Names of the fields that differ between two snapshots.
    pub fn diff(&self, other: &WizardSnapshot) -> Vec<&'static str> {
        let (a, b) = (&self.navigation, &other.navigation);
        let checks = [
            ("currentStepId", a.current_step_id == b.current_step_id),
            (
                "currentStepPosition",
                a.current_step_position == b.current_step_position,
            ),
            ("totalSteps", a.total_steps == b.total_steps),
            ("isFirstStep", a.is_first_step == b.is_first_step),
            ("isLastStep", a.is_last_step == b.is_last_step),
            ("canMoveNext", a.can_move_next == b.can_move_next),
            ("canMoveBack", a.can_move_back == b.can_move_back),
            ("nextButtonLabel", a.next_button_label == b.next_button_label),
            (
                "previousButtonLabel",
                a.previous_button_label == b.previous_button_label,
            ),
            ("nextStepId", self.next_step_id == other.next_step_id),
            (
                "previousStepId",
                self.previous_step_id == other.previous_step_id,
            ),
            ("wizardData", self.wizard_data == other.wizard_data),
            ("isLoading", self.is_loading == other.is_loading),
            ("error", self.error == other.error),
        ];
        checks
            .into_iter()
            .filter(|(_, same)| !same)
            .map(|(name, _)| name)
            .collect()
    }
}
