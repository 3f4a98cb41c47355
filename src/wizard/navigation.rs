//! Step-navigation state machine.
//!
//! There is one state per step order `1..=N`. Forward and backward moves
//! follow order adjacency; a move past either end is a no-op. The functions
//! here are shared by both wizard variants so the transition rules exist
//! exactly once.

use serde::Serialize;
use tracing::{debug, info, warn};

use super::labels::WizardLabels;
use super::registry::StepRegistry;
use super::step::Step;
use crate::error::Result;

/// Synchronized pointer to the current step.
///
/// `id` and `position` always describe the same step: a cursor can only be
/// built from a [`Step`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepCursor {
    id: String,
    position: u32,
}

impl StepCursor {
    /// Cursor on `step`.
    pub fn at(step: &Step) -> Self {
        Self {
            id: step.id.clone(),
            position: step.order,
        }
    }

    /// Id of the current step.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Order of the current step, `1..=N`.
    pub fn position(&self) -> u32 {
        self.position
    }
}

/// The step a forward move from `cursor` would land on.
pub fn next_step<'r>(registry: &'r StepRegistry, cursor: &StepCursor) -> Option<&'r Step> {
    registry.next_after(cursor.position)
}

/// The step a backward move from `cursor` would land on.
pub fn previous_step<'r>(registry: &'r StepRegistry, cursor: &StepCursor) -> Option<&'r Step> {
    registry.previous_before(cursor.position)
}

/// The step under `cursor`.
///
/// Falls back to the first step if the cursor does not resolve, which can
/// only happen when a cursor is paired with a registry it was not built
/// from.
pub fn current_step<'r>(registry: &'r StepRegistry, cursor: &StepCursor) -> &'r Step {
    registry
        .get(&cursor.id)
        .unwrap_or_else(|| registry.first())
}

/// Every derived navigation value, computed from current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationFacts {
    pub current_step_id: String,
    pub current_step_position: u32,
    pub total_steps: u32,
    pub is_first_step: bool,
    pub is_last_step: bool,
    pub can_move_next: bool,
    pub can_move_back: bool,
    pub next_button_label: String,
    pub previous_button_label: String,
}

impl NavigationFacts {
    /// Compute every derived value from the step list, cursor and labels.
    pub fn derive(registry: &StepRegistry, cursor: &StepCursor, labels: &WizardLabels) -> Self {
        let step = current_step(registry, cursor);
        let total_steps = registry.total_steps();
        Self {
            current_step_id: cursor.id.clone(),
            current_step_position: cursor.position,
            total_steps,
            is_first_step: cursor.position == 1,
            is_last_step: cursor.position == total_steps,
            can_move_next: step.can_move_next,
            can_move_back: cursor.position > 1,
            next_button_label: labels.resolve_next(step, registry),
            previous_button_label: labels.resolve_previous(step),
        }
    }
}

/// Validate `steps` and place the initial cursor on `current_step_id`, or on
/// the first step if it is absent or unknown.
pub fn initialize(
    steps: Vec<Step>,
    current_step_id: Option<&str>,
) -> Result<(StepRegistry, StepCursor)> {
    let registry = StepRegistry::new(steps)?;
    let cursor = registry.resolve_cursor(current_step_id);
    info!(
        total_steps = registry.total_steps(),
        current_step_id = cursor.id(),
        "wizard steps initialized"
    );
    Ok((registry, cursor))
}

/// Where a forward move from `cursor` lands, or `None` on the last step.
pub fn plan_move_next(registry: &StepRegistry, cursor: &StepCursor) -> Option<StepCursor> {
    let target = next_step(registry, cursor).map(StepCursor::at);
    trace_plan(cursor, target.as_ref(), "last");
    target
}

/// Where a backward move from `cursor` lands, or `None` on the first step.
pub fn plan_move_back(registry: &StepRegistry, cursor: &StepCursor) -> Option<StepCursor> {
    let target = previous_step(registry, cursor).map(StepCursor::at);
    trace_plan(cursor, target.as_ref(), "first");
    target
}

/// Where a jump to `step_id` lands. Unknown ids are reported and yield `None`.
pub fn plan_jump(
    registry: &StepRegistry,
    cursor: &StepCursor,
    step_id: &str,
) -> Option<StepCursor> {
    let target = registry.get(step_id).map(StepCursor::at);
    match &target {
        Some(target) => trace_plan(cursor, Some(target), "requested"),
        None => warn!(step_id, "step not found, current step unchanged"),
    }
    target
}

/// Cursor a reset returns to.
pub fn restart(registry: &StepRegistry) -> StepCursor {
    info!("wizard reset");
    StepCursor::at(registry.first())
}

fn trace_plan(from: &StepCursor, to: Option<&StepCursor>, edge: &str) {
    match to {
        Some(to) => debug!(
            from = from.id(),
            to = to.id(),
            position = to.position(),
            "step transition"
        ),
        None => debug!(step_id = from.id(), "already on {edge} step"),
    }
}

/// Plain, non-reactive navigation state: registry, cursor and labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    registry: StepRegistry,
    cursor: StepCursor,
    labels: WizardLabels,
}

impl Navigator {
    /// Validate `steps` and start on `current_step_id` or the first step.
    pub fn new(
        steps: Vec<Step>,
        labels: WizardLabels,
        current_step_id: Option<&str>,
    ) -> Result<Self> {
        let (registry, cursor) = initialize(steps, current_step_id)?;
        Ok(Self {
            registry,
            cursor,
            labels,
        })
    }

    /// The validated step list.
    pub fn registry(&self) -> &StepRegistry {
        &self.registry
    }

    /// Current id/position pair.
    pub fn cursor(&self) -> &StepCursor {
        &self.cursor
    }

    /// Wizard-level default labels.
    pub fn labels(&self) -> &WizardLabels {
        &self.labels
    }

    /// The step under the cursor.
    pub fn current_step(&self) -> &Step {
        current_step(&self.registry, &self.cursor)
    }

    /// The step a forward move would land on.
    pub fn next_step(&self) -> Option<&Step> {
        next_step(&self.registry, &self.cursor)
    }

    /// The step a backward move would land on.
    pub fn previous_step(&self) -> Option<&Step> {
        previous_step(&self.registry, &self.cursor)
    }

    /// Every derived query value for the current state.
    pub fn facts(&self) -> NavigationFacts {
        NavigationFacts::derive(&self.registry, &self.cursor, &self.labels)
    }

    /// Advance to the next step. Returns whether the cursor moved.
    pub fn move_next(&mut self) -> bool {
        let target = plan_move_next(&self.registry, &self.cursor);
        self.commit(target)
    }

    /// Go back to the previous step. Returns whether the cursor moved.
    pub fn move_back(&mut self) -> bool {
        let target = plan_move_back(&self.registry, &self.cursor);
        self.commit(target)
    }

    /// Jump to the step with `id`. Unknown ids are reported and ignored.
    pub fn set_current_step(&mut self, id: &str) -> bool {
        let target = plan_jump(&self.registry, &self.cursor, id);
        self.commit(target)
    }

    /// Set a step's forward gate. Unknown ids are reported and ignored.
    pub fn set_can_move_next(&mut self, id: &str, can_move_next: bool) -> bool {
        self.registry.set_can_move_next(id, can_move_next)
    }

    /// Replace the step list, re-running validation.
    ///
    /// Nothing changes if validation fails.
    pub fn reinitialize(&mut self, steps: Vec<Step>, current_step_id: Option<&str>) -> Result<()> {
        let (registry, cursor) = initialize(steps, current_step_id)?;
        self.registry = registry;
        self.cursor = cursor;
        Ok(())
    }

    /// Put the cursor back on the first step.
    pub fn reset(&mut self) {
        self.cursor = restart(&self.registry);
    }

    fn commit(&mut self, target: Option<StepCursor>) -> bool {
        match target {
            Some(target) => {
                self.cursor = target;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn three_steps() -> Vec<Step> {
        vec![
            Step::new("step1", 1).with_can_move_next(true),
            Step::new("step2", 2),
            Step::new("step3", 3),
        ]
    }

    fn navigator() -> Navigator {
        Navigator::new(three_steps(), WizardLabels::new("Next", "Back", "Finish"), None).unwrap()
    }

    #[test]
    fn initial_facts() {
        let nav = navigator();
        assert_eq!(
            nav.facts(),
            NavigationFacts {
                current_step_id: "step1".into(),
                current_step_position: 1,
                total_steps: 3,
                is_first_step: true,
                is_last_step: false,
                can_move_next: true,
                can_move_back: false,
                next_button_label: "Next".into(),
                previous_button_label: "Back".into(),
            }
        );
    }

    #[test]
    fn move_next_stops_at_last_step() {
        let mut nav = navigator();
        assert!(nav.move_next());
        assert!(nav.move_next());
        assert_eq!(nav.cursor().position(), 3);
        assert_eq!(nav.facts().next_button_label, "Finish");
        assert!(nav.facts().is_last_step);

        assert!(!nav.move_next());
        assert_eq!(nav.cursor().position(), 3);
        assert_eq!(nav.cursor().id(), "step3");
    }

    #[test]
    fn move_back_stops_at_first_step() {
        let mut nav = navigator();
        assert!(!nav.move_back());
        assert_eq!(nav.cursor().position(), 1);

        nav.set_current_step("step3");
        assert!(nav.move_back());
        assert_eq!(nav.cursor().id(), "step2");
    }

    #[test]
    fn set_current_step_unknown_id_is_a_no_op() {
        let mut nav = navigator();
        nav.move_next();
        let before = nav.clone();

        assert!(!nav.set_current_step("nope"));
        assert_eq!(nav, before);
    }

    #[test]
    fn can_move_next_is_per_step() {
        let mut nav = navigator();
        assert!(nav.facts().can_move_next);
        nav.move_next();
        assert!(!nav.facts().can_move_next);

        assert!(nav.set_can_move_next("step2", true));
        assert!(nav.facts().can_move_next);
    }

    #[test]
    fn lookups_do_not_move_the_cursor() {
        let nav = navigator();
        assert_eq!(nav.next_step().map(|s| s.id.as_str()), Some("step2"));
        assert_eq!(nav.previous_step(), None);
        assert_eq!(nav.cursor().position(), 1);
    }

    #[test]
    fn plans_leave_the_cursor_alone_and_stop_at_edges() {
        let (registry, cursor) = initialize(three_steps(), None).unwrap();
        assert_eq!(plan_move_back(&registry, &cursor), None);

        let next = plan_move_next(&registry, &cursor).unwrap();
        assert_eq!((next.id(), next.position()), ("step2", 2));
        assert_eq!(cursor.position(), 1);

        let last = plan_jump(&registry, &cursor, "step3").unwrap();
        assert_eq!(plan_move_next(&registry, &last), None);
        assert_eq!(plan_jump(&registry, &cursor, "nope"), None);
        assert_eq!(restart(&registry), cursor);
    }

    #[test]
    fn failed_reinitialize_keeps_previous_state() {
        let mut nav = navigator();
        nav.move_next();
        let before = nav.clone();

        assert!(nav
            .reinitialize(vec![Step::new("x", 1), Step::new("y", 3)], None)
            .is_err());
        assert_eq!(nav, before);
    }

    #[test]
    fn reinitialize_places_cursor_on_requested_step() {
        let mut nav = navigator();
        nav.reinitialize(vec![Step::new("a", 1), Step::new("b", 2)], Some("b"))
            .unwrap();
        assert_eq!(nav.cursor().id(), "b");
        assert_eq!(nav.registry().total_steps(), 2);

        nav.reset();
        assert_eq!(nav.cursor().id(), "a");
    }
}
