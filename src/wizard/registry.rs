use std::collections::HashSet;

use tracing::{debug, warn};

use super::navigation::StepCursor;
use super::step::Step;
use crate::error::{Result, WizardError};

/// Validated, order-sorted step sequence.
///
/// Holding a `StepRegistry` proves the steps are non-empty, carry the orders
/// `1..=N` exactly once each, and have distinct ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRegistry {
    steps: Vec<Step>,
}

impl StepRegistry {
    /// Validate and normalize a caller-supplied step list.
    ///
    /// The input may arrive in any order. A copy is sorted by `order` and
    /// walked by index; the first step whose order is not `index + 1` is
    /// reported.
    pub fn new(steps: Vec<Step>) -> Result<Self> {
        if steps.is_empty() {
            return Err(WizardError::EmptySteps);
        }

        let mut sorted = steps;
        sorted.sort_by_key(|step| step.order);

        for (index, step) in sorted.iter().enumerate() {
            let expected = index as u32 + 1;
            if step.order != expected {
                return Err(WizardError::NonSequentialOrder {
                    order: step.order,
                    index,
                    expected,
                });
            }
        }

        let mut seen = HashSet::with_capacity(sorted.len());
        for step in &sorted {
            if !seen.insert(step.id.as_str()) {
                return Err(WizardError::DuplicateStepId {
                    id: step.id.clone(),
                });
            }
        }

        Ok(Self { steps: sorted })
    }

    /// Steps in ascending order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps, N.
    pub fn total_steps(&self) -> u32 {
        self.steps.len() as u32
    }

    /// The step with order 1.
    pub fn first(&self) -> &Step {
        &self.steps[0]
    }

    /// The step with the maximum order.
    pub fn last(&self) -> &Step {
        &self.steps[self.steps.len() - 1]
    }

    /// Look up a step by id.
    pub fn get(&self, id: &str) -> Option<&Step> {
        self.steps.iter().find(|step| step.id == id)
    }

    /// Whether a step with `id` is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Look up a step by order.
    pub fn by_order(&self, order: u32) -> Option<&Step> {
        self.steps.iter().find(|step| step.order == order)
    }

    /// Whether `order` is the final step's order.
    pub fn is_last_order(&self, order: u32) -> bool {
        order == self.last().order
    }

    /// The step with the smallest order strictly greater than `order`.
    pub fn next_after(&self, order: u32) -> Option<&Step> {
        self.steps.iter().find(|step| step.order > order)
    }

    /// The step with the largest order strictly less than `order`.
    pub fn previous_before(&self, order: u32) -> Option<&Step> {
        self.steps.iter().rev().find(|step| step.order < order)
    }

    /// Place a cursor on `requested` if it names a known step, else on the
    /// first step.
    pub fn resolve_cursor(&self, requested: Option<&str>) -> StepCursor {
        match requested {
            Some(id) => match self.get(id) {
                Some(step) => StepCursor::at(step),
                None => {
                    debug!(step_id = id, "requested initial step not found, using first step");
                    StepCursor::at(self.first())
                }
            },
            None => StepCursor::at(self.first()),
        }
    }

    /// Set the `can_move_next` gate of a step. Unknown ids are reported and
    /// return false.
    pub fn set_can_move_next(&mut self, id: &str, can_move_next: bool) -> bool {
        match self.steps.iter_mut().find(|step| step.id == id) {
            Some(step) => {
                debug!(step_id = id, can_move_next, "step gate updated");
                step.can_move_next = can_move_next;
                true
            }
            None => {
                warn!(step_id = id, "step not found, cannot update canMoveNext");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps(orders: &[u32]) -> Vec<Step> {
        orders
            .iter()
            .map(|order| Step::new(format!("s{order}"), *order))
            .collect()
    }

    #[test]
    fn empty_list_is_rejected() {
        assert!(matches!(
            StepRegistry::new(Vec::new()),
            Err(WizardError::EmptySteps)
        ));
    }

    #[test]
    fn unsorted_input_is_normalized() {
        let registry = StepRegistry::new(steps(&[3, 1, 2])).unwrap();
        let orders: Vec<u32> = registry.steps().iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
        assert_eq!(registry.total_steps(), 3);
        assert_eq!(registry.first().id, "s1");
        assert_eq!(registry.last().id, "s3");
    }

    #[test]
    fn gap_reports_offending_order_and_index() {
        let err = StepRegistry::new(steps(&[1, 3])).unwrap_err();
        assert!(matches!(
            err,
            WizardError::NonSequentialOrder {
                order: 3,
                index: 1,
                expected: 2
            }
        ));
    }

    #[test]
    fn duplicate_order_is_rejected() {
        let input = vec![Step::new("a", 1), Step::new("b", 1), Step::new("c", 2)];
        let err = StepRegistry::new(input).unwrap_err();
        assert!(matches!(
            err,
            WizardError::NonSequentialOrder {
                order: 1,
                index: 1,
                ..
            }
        ));
    }

    #[test]
    fn list_not_starting_at_one_is_rejected() {
        let err = StepRegistry::new(steps(&[2, 3])).unwrap_err();
        assert!(matches!(
            err,
            WizardError::NonSequentialOrder {
                order: 2,
                index: 0,
                ..
            }
        ));
    }

    #[test]
    fn duplicate_id_is_rejected_after_order_check() {
        let input = vec![Step::new("same", 1), Step::new("same", 2)];
        let err = StepRegistry::new(input).unwrap_err();
        assert!(matches!(err, WizardError::DuplicateStepId { ref id } if id == "same"));
    }

    #[test]
    fn adjacency_lookups() {
        let registry = StepRegistry::new(steps(&[1, 2, 3])).unwrap();
        assert_eq!(registry.next_after(1).map(|s| s.order), Some(2));
        assert_eq!(registry.next_after(3), None);
        assert_eq!(registry.previous_before(3).map(|s| s.order), Some(2));
        assert_eq!(registry.previous_before(1), None);
    }

    #[test]
    fn resolve_cursor_falls_back_to_first_step() {
        let registry = StepRegistry::new(steps(&[1, 2, 3])).unwrap();

        let cursor = registry.resolve_cursor(Some("s2"));
        assert_eq!((cursor.id(), cursor.position()), ("s2", 2));

        let cursor = registry.resolve_cursor(Some("missing"));
        assert_eq!((cursor.id(), cursor.position()), ("s1", 1));

        let cursor = registry.resolve_cursor(None);
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn set_can_move_next_reports_unknown_ids() {
        let mut registry = StepRegistry::new(steps(&[1, 2])).unwrap();
        assert!(registry.set_can_move_next("s2", true));
        assert!(registry.get("s2").unwrap().can_move_next);
        assert!(!registry.set_can_move_next("nope", true));
    }
}
