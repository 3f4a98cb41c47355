//! Cross-variant conformance.
//!
//! A script of [`WizardOp`]s is replayed against two [`WizardStore`]s and a
//! [`WizardSnapshot`] is taken from each before the first operation and
//! after every operation. The variants are equivalent for that script if
//! every pair of snapshots is equal.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::wizard::{Step, StepRecord, WizardSnapshot, WizardStore};

/// One action of the wizard surface, as data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum WizardOp {
    MoveNext,
    MoveBack,
    SetCurrentStep {
        step_id: String,
    },
    SetStepData {
        step_id: String,
        record: StepRecord,
    },
    UpdateField {
        step_id: String,
        field: String,
        value: Value,
    },
    SetCanMoveNext {
        step_id: String,
        can_move_next: bool,
    },
    SetLoading {
        is_loading: bool,
    },
    SetError {
        message: Option<String>,
    },
    InitializeSteps {
        steps: Vec<Step>,
        current_step_id: Option<String>,
    },
    Reset,
}

/// What an operation reported back to its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpOutcome {
    /// The operation has no return value.
    Done,
    /// The operation returned whether it took effect.
    Applied(bool),
    /// Re-initialization was rejected; the message is the error text.
    Rejected(String),
}

impl WizardOp {
    pub fn apply<S: WizardStore + ?Sized>(&self, store: &S) -> OpOutcome {
        match self {
            WizardOp::MoveNext => OpOutcome::Applied(store.move_next()),
            WizardOp::MoveBack => OpOutcome::Applied(store.move_back()),
            WizardOp::SetCurrentStep { step_id } => {
                OpOutcome::Applied(store.set_current_step(step_id))
            }
            WizardOp::SetStepData { step_id, record } => {
                OpOutcome::Applied(store.set_step_data(step_id, record.clone()))
            }
            WizardOp::UpdateField {
                step_id,
                field,
                value,
            } => {
                store.update_field(step_id, field, value.clone());
                OpOutcome::Done
            }
            WizardOp::SetCanMoveNext {
                step_id,
                can_move_next,
            } => OpOutcome::Applied(store.set_can_move_next(step_id, *can_move_next)),
            WizardOp::SetLoading { is_loading } => {
                store.set_loading(*is_loading);
                OpOutcome::Done
            }
            WizardOp::SetError { message } => {
                store.set_error(message.clone());
                OpOutcome::Done
            }
            WizardOp::InitializeSteps {
                steps,
                current_step_id,
            } => match store.initialize_steps(steps.clone(), current_step_id.as_deref()) {
                Ok(()) => OpOutcome::Done,
                Err(err) => OpOutcome::Rejected(err.to_string()),
            },
            WizardOp::Reset => {
                store.reset();
                OpOutcome::Done
            }
        }
    }
}

impl fmt::Display for WizardOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardOp::MoveNext => write!(f, "moveNext()"),
            WizardOp::MoveBack => write!(f, "moveBack()"),
            WizardOp::SetCurrentStep { step_id } => write!(f, "setCurrentStep({step_id:?})"),
            WizardOp::SetStepData { step_id, record } => {
                write!(f, "setStepData({step_id:?}, {})", Value::Object(record.clone()))
            }
            WizardOp::UpdateField {
                step_id,
                field,
                value,
            } => write!(f, "updateField({step_id:?}, {field:?}, {value})"),
            WizardOp::SetCanMoveNext {
                step_id,
                can_move_next,
            } => write!(f, "setCanMoveNext({step_id:?}, {can_move_next})"),
            WizardOp::SetLoading { is_loading } => write!(f, "setLoading({is_loading})"),
            WizardOp::SetError { message } => write!(f, "setError({message:?})"),
            WizardOp::InitializeSteps {
                steps,
                current_step_id,
            } => write!(
                f,
                "initializeSteps({} steps, {current_step_id:?})",
                steps.len()
            ),
            WizardOp::Reset => write!(f, "reset()"),
        }
    }
}

/// One replayed operation and the state it left behind.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptStep {
    pub op: WizardOp,
    pub outcome: OpOutcome,
    pub snapshot: WizardSnapshot,
}

/// Result of replaying a script against one store.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptTrace {
    pub initial: WizardSnapshot,
    pub steps: Vec<ScriptStep>,
}

/// Replay `ops` against `store`, snapshotting after every operation.
pub fn run_script<S: WizardStore + ?Sized>(store: &S, ops: &[WizardOp]) -> ScriptTrace {
    let initial = store.snapshot();
    let steps = ops
        .iter()
        .map(|op| {
            let outcome = op.apply(store);
            ScriptStep {
                op: op.clone(),
                outcome,
                snapshot: store.snapshot(),
            }
        })
        .collect();
    ScriptTrace { initial, steps }
}

/// First point at which two variants disagreed.
#[derive(Debug, Clone, Error)]
#[error("wizard variants diverged {}: {fields:?}", at_label(.op_index, .op))]
pub struct Divergence {
    /// Index of the operation after which the states differed, or `None`
    /// for the just-constructed state.
    pub op_index: Option<usize>,
    pub op: Option<WizardOp>,
    /// Names of the differing fields; `outcome` if only the return value
    /// of the operation differed.
    pub fields: Vec<&'static str>,
    pub left: WizardSnapshot,
    pub right: WizardSnapshot,
}

fn at_label(op_index: &Option<usize>, op: &Option<WizardOp>) -> String {
    match (op_index, op) {
        (Some(index), Some(op)) => format!("after op #{index} {op}"),
        _ => "after construction".to_string(),
    }
}

/// Replay `ops` against both stores in lockstep and compare every observable
/// value after each operation.
///
/// Returns the number of states compared (construction plus one per op).
pub fn check_equivalence<L, R>(left: &L, right: &R, ops: &[WizardOp]) -> Result<usize, Divergence>
where
    L: WizardStore + ?Sized,
    R: WizardStore + ?Sized,
{
    let (a, b) = (left.snapshot(), right.snapshot());
    let fields = a.diff(&b);
    if !fields.is_empty() {
        return Err(Divergence {
            op_index: None,
            op: None,
            fields,
            left: a,
            right: b,
        });
    }

    for (index, op) in ops.iter().enumerate() {
        let left_outcome = op.apply(left);
        let right_outcome = op.apply(right);
        let (a, b) = (left.snapshot(), right.snapshot());

        let mut fields = a.diff(&b);
        if left_outcome != right_outcome {
            fields.push("outcome");
        }
        if !fields.is_empty() {
            return Err(Divergence {
                op_index: Some(index),
                op: Some(op.clone()),
                fields,
                left: a,
                right: b,
            });
        }
        debug!(index, %op, "variants agree");
    }

    Ok(ops.len() + 1)
}
