//! Tree-observable wizard.
//!
//! State is a small tree of [`Signal`](crate::Signal)s (navigation, data,
//! status) with [`Memo`]s for every derived view. Reads inside an
//! [`Effect`] subscribe to exactly what they touch, and multi-signal actions
//! run in a batch so observers never see a half-applied change.

mod tree;

use std::sync::Arc;

use serde_json::Value;

use crate::error::Result;
use crate::runtime::ReactiveRuntime;
use crate::signal::{Effect, Memo};
use crate::wizard::navigation::{self, NavigationFacts, StepCursor};
use crate::wizard::{
    normalize_error, Step, StepRecord, StepRegistry, WizardConfig, WizardData, WizardLabels,
    WizardSnapshot, WizardStore,
};
use tree::{DataNode, NavigationNode, StatusNode, WizardTree};

/// Wizard backed by a tree of signals and memos.
///
/// Each instance owns its own [`ReactiveRuntime`]; clones share it.
#[derive(Clone)]
pub struct ObservableWizard {
    runtime: Arc<ReactiveRuntime>,
    tree: WizardTree,
}

impl ObservableWizard {
    /// Build a wizard, validating the step list.
    pub fn new(config: WizardConfig) -> Result<Self> {
        let (registry, cursor) =
            navigation::initialize(config.steps, config.current_step_id.as_deref())?;

        let runtime = ReactiveRuntime::new();
        let tree = WizardTree {
            navigation: NavigationNode::new(&runtime, registry, cursor, config.labels),
            data: DataNode::new(&runtime),
            status: StatusNode::new(&runtime),
        };
        Ok(Self { runtime, tree })
    }

    /// Build a wizard from a step list and default labels.
    pub fn with_steps(steps: Vec<Step>, labels: WizardLabels) -> Result<Self> {
        Self::new(WizardConfig::new(steps).with_labels(labels))
    }

    /// The runtime this wizard's signals belong to.
    pub fn runtime(&self) -> &Arc<ReactiveRuntime> {
        &self.runtime
    }

    /// Derived navigation view, for binding UI effects to navigation only.
    pub fn navigation_memo(&self) -> Memo<NavigationFacts> {
        self.tree.navigation.facts.clone()
    }

    /// Run `callback` now and again after every change to the wizard.
    ///
    /// Each action triggers at most one run, and every run sees a snapshot
    /// taken after the action completed. Dropping the returned [`Effect`]
    /// stops notifications.
    pub fn subscribe<F>(&self, callback: F) -> Effect
    where
        F: Fn(&WizardSnapshot) + Send + Sync + 'static,
    {
        let wizard = self.clone();
        Effect::new(&self.runtime, move || callback(&wizard.snapshot()))
    }

    /// Compute a cursor move from the current state without subscribing.
    fn plan<F>(&self, plan: F) -> Option<StepCursor>
    where
        F: FnOnce(&StepRegistry, &StepCursor) -> Option<StepCursor>,
    {
        let nav = &self.tree.navigation;
        nav.registry
            .with_untracked(|registry| nav.cursor.with_untracked(|cursor| plan(registry, cursor)))
    }

    fn commit(&self, target: Option<StepCursor>) -> bool {
        match target {
            Some(target) => {
                self.tree.navigation.cursor.set(target);
                true
            }
            None => false,
        }
    }
}

impl WizardStore for ObservableWizard {
    fn move_next(&self) -> bool {
        self.commit(self.plan(navigation::plan_move_next))
    }

    fn move_back(&self) -> bool {
        self.commit(self.plan(navigation::plan_move_back))
    }

    fn set_current_step(&self, step_id: &str) -> bool {
        self.commit(self.plan(|registry, cursor| navigation::plan_jump(registry, cursor, step_id)))
    }

    fn set_step_data(&self, step_id: &str, record: StepRecord) -> bool {
        let tree = &self.tree;
        // Observers run when the batch ends, after the registry read is released.
        self.runtime.batch(|| {
            tree.navigation.registry.with_untracked(|registry| {
                tree.data
                    .records
                    .update_if(|records| records.replace_known(registry, step_id, record))
            })
        })
    }

    fn update_field(&self, step_id: &str, field: &str, value: Value) {
        self.tree
            .data
            .records
            .update(|records| records.update_field(step_id, field, value));
    }

    fn set_can_move_next(&self, step_id: &str, can_move_next: bool) -> bool {
        self.tree
            .navigation
            .registry
            .update_if(|registry| registry.set_can_move_next(step_id, can_move_next))
    }

    fn set_loading(&self, is_loading: bool) {
        self.tree.status.is_loading.set_if_changed(is_loading);
    }

    fn set_error(&self, message: Option<String>) {
        self.tree.status.error.set_if_changed(normalize_error(message));
    }

    fn initialize_steps(&self, steps: Vec<Step>, current_step_id: Option<&str>) -> Result<()> {
        let (registry, cursor) = navigation::initialize(steps, current_step_id)?;

        let nav = &self.tree.navigation;
        self.runtime.batch(|| {
            nav.registry.set(registry);
            nav.cursor.set(cursor);
        });
        Ok(())
    }

    fn reset(&self) {
        let tree = &self.tree;
        let first = tree
            .navigation
            .registry
            .with_untracked(navigation::restart);

        self.runtime.batch(|| {
            tree.navigation.cursor.set(first);
            tree.data.records.update(|records| records.clear());
            tree.status.is_loading.set_if_changed(false);
            tree.status.error.set_if_changed(None);
        });
    }

    fn steps(&self) -> Vec<Step> {
        self.tree.navigation.registry.with(|r| r.steps().to_vec())
    }

    fn labels(&self) -> WizardLabels {
        self.tree.navigation.labels.get()
    }

    fn current_step(&self) -> Step {
        self.tree.navigation.current_step.get()
    }

    fn step_by_id(&self, step_id: &str) -> Option<Step> {
        self.tree
            .navigation
            .registry
            .with(|r| r.get(step_id).cloned())
    }

    fn step_data(&self, step_id: &str) -> StepRecord {
        self.tree.data.records.with(|records| records.get(step_id))
    }

    fn wizard_data(&self) -> WizardData {
        self.tree.data.records.with(|records| records.wizard_data())
    }

    fn next_step(&self) -> Option<Step> {
        self.tree.navigation.next_step.get()
    }

    fn previous_step(&self) -> Option<Step> {
        self.tree.navigation.previous_step.get()
    }

    fn navigation(&self) -> NavigationFacts {
        self.tree.navigation.facts.get()
    }

    fn is_loading(&self) -> bool {
        self.tree.status.is_loading.get()
    }

    fn error(&self) -> Option<String> {
        self.tree.status.error.get()
    }

    fn current_step_id(&self) -> String {
        self.tree.navigation.cursor.with(|c| c.id().to_string())
    }

    fn current_step_position(&self) -> u32 {
        self.tree.navigation.cursor.with(StepCursor::position)
    }

    fn total_steps(&self) -> u32 {
        self.tree.navigation.registry.with(StepRegistry::total_steps)
    }
}
