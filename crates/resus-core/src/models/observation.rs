use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::fields;

/// A single collected answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
#[ts(export)]
pub enum ObservationValue {
    Numeric(f64),
    Choice(String),
    MultiSelect(Vec<String>),
    Flag(bool),
}

impl ObservationValue {
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Self::Numeric(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_choice(&self) -> Option<&str> {
        match self {
            Self::Choice(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_selections(&self) -> &[String] {
        match self {
            Self::MultiSelect(v) => v,
            _ => &[],
        }
    }
}

impl std::fmt::Display for ObservationValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numeric(v) => write!(f, "{v}"),
            Self::Choice(v) => write!(f, "{v}"),
            Self::MultiSelect(v) => write!(f, "[{}]", v.join(", ")),
            Self::Flag(v) => write!(f, "{v}"),
        }
    }
}

/// An observation as forwarded by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ObservationInput {
    pub step_id: String,
    pub field: String,
    pub value: ObservationValue,
}

impl ObservationInput {
    pub fn new(step_id: impl Into<String>, field: impl Into<String>, value: ObservationValue) -> Self {
        Self {
            step_id: step_id.into(),
            field: field.into(),
            value,
        }
    }
}

/// Flat, exportable form of one stored observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ObservationRecord {
    pub step_id: String,
    pub field: String,
    pub value: ObservationValue,
}

/// All observations of a session, keyed by step then field.
///
/// Back-navigation never removes entries, so re-entering a step finds its
/// previous answers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ObservationSet {
    steps: BTreeMap<String, BTreeMap<String, ObservationValue>>,
}

impl ObservationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.values().all(|f| f.is_empty())
    }

    pub fn insert(&mut self, step_id: &str, field: &str, value: ObservationValue) {
        self.steps
            .entry(step_id.to_string())
            .or_default()
            .insert(field.to_string(), value);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, step_id: &str, field: &str, value: ObservationValue) -> Self {
        self.insert(step_id, field, value);
        self
    }

    pub fn for_step(&self, step_id: &str) -> Option<&BTreeMap<String, ObservationValue>> {
        self.steps.get(step_id)
    }

    pub fn get_at(&self, step_id: &str, field: &str) -> Option<&ObservationValue> {
        self.steps.get(step_id).and_then(|f| f.get(field))
    }

    /// Look a field up across all steps.
    pub fn get(&self, field: &str) -> Option<&ObservationValue> {
        self.steps.values().find_map(|f| f.get(field))
    }

    pub fn numeric(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(ObservationValue::as_numeric)
    }

    pub fn choice(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(ObservationValue::as_choice)
    }

    /// `true` only when the flag was recorded and set.
    pub fn flag(&self, field: &str) -> bool {
        self.get(field)
            .and_then(ObservationValue::as_flag)
            .unwrap_or(false)
    }

    pub fn choice_is(&self, field: &str, expected: &str) -> bool {
        self.choice(field) == Some(expected)
    }

    /// Every provider-selected critical finding across all steps, sorted and
    /// deduplicated.
    pub fn critical_selections(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .steps
            .values()
            .filter_map(|f| f.get(fields::CRITICAL_FINDINGS))
            .flat_map(|v| v.as_selections().iter().cloned())
            .collect();
        out.sort();
        out.dedup();
        out
    }

    pub fn records(&self) -> Vec<ObservationRecord> {
        self.steps
            .iter()
            .flat_map(|(step_id, fields)| {
                fields.iter().map(move |(field, value)| ObservationRecord {
                    step_id: step_id.clone(),
                    field: field.clone(),
                    value: value.clone(),
                })
            })
            .collect()
    }
}
