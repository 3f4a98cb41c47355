//! Error types for wizard construction.
//!
//! Only construction and step-list re-initialization can fail. Operations on
//! an already-validated wizard that receive an unknown step id are reported
//! through `tracing` and return `false` instead.

use thiserror::Error;

/// Errors raised while building or re-initializing a wizard.
#[derive(Debug, Error)]
pub enum WizardError {
    /// The step list was empty.
    #[error("wizard must have at least one step")]
    EmptySteps,

    /// After sorting by order, the step at `index` did not have order `index + 1`.
    #[error("step orders must be sequential starting at 1: found order {order} at index {index}, expected {expected}")]
    NonSequentialOrder {
        /// The offending order value.
        order: u32,
        /// Position of the offending step in sort order.
        index: usize,
        /// The order value that was expected at that position.
        expected: u32,
    },

    /// Two steps share the same id.
    #[error("duplicate step id `{id}`")]
    DuplicateStepId { id: String },

    /// The wizard configuration could not be parsed.
    #[error("invalid wizard config: {0}")]
    Config(#[from] serde_json::Error),
}

impl WizardError {
    /// Returns true for errors about the shape of the step list itself.
    pub fn is_invalid_steps(&self) -> bool {
        !matches!(self, WizardError::Config(_))
    }
}

/// Result type alias using WizardError.
pub type Result<T> = std::result::Result<T, WizardError>;

#[cfg(test)]
mod tests {
    use super::WizardError;

    #[test]
    fn non_sequential_message_names_order_and_index() {
        let err = WizardError::NonSequentialOrder {
            order: 3,
            index: 1,
            expected: 2,
        };
        let message = err.to_string();
        assert!(message.contains("order 3"));
        assert!(message.contains("index 1"));
        assert!(err.is_invalid_steps());
    }

    #[test]
    fn config_errors_are_not_step_errors() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = WizardError::from(parse);
        assert!(!err.is_invalid_steps());
        assert!(err.to_string().starts_with("invalid wizard config"));
    }
}
