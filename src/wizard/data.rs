use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::registry::StepRegistry;

/// Opaque field values contributed by one step.
pub type StepRecord = serde_json::Map<String, Value>;

/// Records of every step that has contributed data, keyed by step id.
pub type WizardData = BTreeMap<String, StepRecord>;

/// Per-step field storage, independent of navigation position.
///
/// The store itself does not know which step ids exist. Whole-record writes
/// go through [`replace_known`](Self::replace_known), which checks the
/// registry; field merges accept any id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepDataStore {
    records: WizardData,
}

impl StepDataStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole record for `step_id`.
    pub fn replace(&mut self, step_id: &str, record: StepRecord) {
        self.records.insert(step_id.to_string(), record);
    }

    /// Replace the record of a registered step. Unknown ids are reported and
    /// nothing is stored.
    pub fn replace_known(
        &mut self,
        registry: &StepRegistry,
        step_id: &str,
        record: StepRecord,
    ) -> bool {
        if !registry.contains(step_id) {
            warn!(step_id, "step not found, step data not stored");
            return false;
        }
        debug!(step_id, fields = record.len(), "step data replaced");
        self.replace(step_id, record);
        true
    }

    /// Merge one field into the record for `step_id`, creating the record if
    /// needed.
    pub fn update_field(&mut self, step_id: &str, field: &str, value: Value) {
        debug!(step_id, field, "step field updated");
        self.records
            .entry(step_id.to_string())
            .or_default()
            .insert(field.to_string(), value);
    }

    /// The record for `step_id`, or an empty record.
    pub fn get(&self, step_id: &str) -> StepRecord {
        self.records.get(step_id).cloned().unwrap_or_default()
    }

    /// Whether `step_id` has a stored record, even an empty one.
    pub fn contains(&self, step_id: &str) -> bool {
        self.records.contains_key(step_id)
    }

    /// Every stored record. Steps that never contributed are absent.
    pub fn wizard_data(&self) -> WizardData {
        self.records.clone()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no step has stored anything.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
