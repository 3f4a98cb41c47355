use serde::{Deserialize, Serialize};

/// One page of the wizard's linear flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Stable key of the step.
    pub id: String,
    /// 1-based position in the flow.
    pub order: u32,
    /// Whether the wizard may advance past this step.
    #[serde(default)]
    pub can_move_next: bool,
    /// Label override for the forward button while on this step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_label: Option<String>,
    /// Label override for the back button while on this step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_label: Option<String>,
}

impl Step {
    /// A step with no label overrides whose forward gate starts closed.
    pub fn new(id: impl Into<String>, order: u32) -> Self {
        Self {
            id: id.into(),
            order,
            can_move_next: false,
            next_label: None,
            previous_label: None,
        }
    }

    /// Set the initial forward gate.
    pub fn with_can_move_next(mut self, can_move_next: bool) -> Self {
        self.can_move_next = can_move_next;
        self
    }

    /// Override the forward button label on this step.
    pub fn with_next_label(mut self, label: impl Into<String>) -> Self {
        self.next_label = Some(label.into());
        self
    }

    /// Override the back button label on this step.
    pub fn with_previous_label(mut self, label: impl Into<String>) -> Self {
        self.previous_label = Some(label.into());
        self
    }
}
