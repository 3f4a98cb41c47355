use serde::{Deserialize, Serialize};

use super::labels::WizardLabels;
use super::step::Step;
use crate::error::Result;

/// Everything needed to construct a wizard.
///
/// Default labels sit at the top level next to `steps`:
///
/// ```
/// use stepwise::WizardConfig;
///
/// let config = WizardConfig::from_json(r#"{
///     "steps": [
///         {"id": "account", "order": 1, "canMoveNext": true},
///         {"id": "confirm", "order": 2}
///     ],
///     "previousLabel": "Back"
/// }"#).unwrap();
///
/// assert_eq!(config.steps.len(), 2);
/// assert_eq!(config.labels.previous_label, "Back");
/// assert_eq!(config.labels.finish_label, "Finish");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardConfig {
    pub steps: Vec<Step>,
    #[serde(flatten)]
    pub labels: WizardLabels,
    /// Step to start on instead of the first one. Ignored if unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_step_id: Option<String>,
}

impl WizardConfig {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps,
            labels: WizardLabels::default(),
            current_step_id: None,
        }
    }

    pub fn with_labels(mut self, labels: WizardLabels) -> Self {
        self.labels = labels;
        self
    }

    pub fn starting_at(mut self, step_id: impl Into<String>) -> Self {
        self.current_step_id = Some(step_id.into());
        self
    }

    /// Parse a configuration from JSON. Step validation happens later, when
    /// a wizard is built from it.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
