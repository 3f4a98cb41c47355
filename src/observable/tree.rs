use std::sync::Arc;

use crate::runtime::ReactiveRuntime;
use crate::signal::{Memo, Signal};
use crate::wizard::navigation::{self, NavigationFacts, StepCursor};
use crate::wizard::{Step, StepDataStore, StepRegistry, WizardLabels};

/// Navigation branch: step list, cursor, labels and the views derived from
/// them.
#[derive(Clone)]
pub(crate) struct NavigationNode {
    pub registry: Signal<StepRegistry>,
    pub cursor: Signal<StepCursor>,
    pub labels: Signal<WizardLabels>,
    pub facts: Memo<NavigationFacts>,
    pub current_step: Memo<Step>,
    pub next_step: Memo<Option<Step>>,
    pub previous_step: Memo<Option<Step>>,
}

impl NavigationNode {
    pub fn new(
        runtime: &Arc<ReactiveRuntime>,
        registry: StepRegistry,
        cursor: StepCursor,
        labels: WizardLabels,
    ) -> Self {
        let registry = Signal::new(runtime, registry);
        let cursor = Signal::new(runtime, cursor);
        let labels = Signal::new(runtime, labels);

        let facts = Memo::new(runtime, {
            let (registry, cursor, labels) = (registry.clone(), cursor.clone(), labels.clone());
            move || {
                registry.with(|r| {
                    cursor.with(|c| labels.with(|l| NavigationFacts::derive(r, c, l)))
                })
            }
        });
        let current_step = Memo::new(runtime, {
            let (registry, cursor) = (registry.clone(), cursor.clone());
            move || registry.with(|r| cursor.with(|c| navigation::current_step(r, c).clone()))
        });
        let next_step = Memo::new(runtime, {
            let (registry, cursor) = (registry.clone(), cursor.clone());
            move || registry.with(|r| cursor.with(|c| navigation::next_step(r, c).cloned()))
        });
        let previous_step = Memo::new(runtime, {
            let (registry, cursor) = (registry.clone(), cursor.clone());
            move || registry.with(|r| cursor.with(|c| navigation::previous_step(r, c).cloned()))
        });

        Self {
            registry,
            cursor,
            labels,
            facts,
            current_step,
            next_step,
            previous_step,
        }
    }
}

/// Step-data branch.
#[derive(Clone)]
pub(crate) struct DataNode {
    pub records: Signal<StepDataStore>,
}

impl DataNode {
    pub fn new(runtime: &Arc<ReactiveRuntime>) -> Self {
        Self {
            records: Signal::new(runtime, StepDataStore::new()),
        }
    }
}

/// Transient UI flags.
#[derive(Clone)]
pub(crate) struct StatusNode {
    pub is_loading: Signal<bool>,
    pub error: Signal<Option<String>>,
}

impl StatusNode {
    pub fn new(runtime: &Arc<ReactiveRuntime>) -> Self {
        Self {
            is_loading: Signal::new(runtime, false),
            error: Signal::new(runtime, None),
        }
    }
}

/// Root of the observable state tree.
#[derive(Clone)]
pub(crate) struct WizardTree {
    pub navigation: NavigationNode,
    pub data: DataNode,
    pub status: StatusNode,
}
