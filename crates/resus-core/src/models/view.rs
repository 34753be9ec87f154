use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::intervention::Intervention;
use super::observation::ObservationValue;

/// Inclusive accepted range for a numeric prompt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
    /// Accepted values are `min + n * step`. `None` accepts any value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            step: None,
        }
    }

    /// Whole numbers only, e.g. coma-scale components.
    pub const fn whole(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            step: Some(1.0),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }

    /// `true` when the value lies on the range's step grid.
    pub fn on_step(&self, value: f64) -> bool {
        let Some(step) = self.step else {
            return true;
        };
        let remainder = (value - self.min) % step;
        // Allow floating point tolerance
        remainder.abs() < 1e-9 || (step - remainder.abs()) < 1e-9
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum PromptKind {
    Numeric { unit: String, range: ValueRange },
    Choice { options: Vec<String> },
    MultiSelect { options: Vec<String> },
    Flag,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Prompt {
    pub field: String,
    pub label: String,
    pub kind: PromptKind,
}

/// What the presentation layer renders for the current step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentStepView {
    pub id: String,
    pub phase: String,
    pub title: String,
    pub prompts: Vec<Prompt>,
    pub applicable_options: Vec<String>,
    pub intervention_options: Vec<String>,
    /// Previously entered answers for this step, by field.
    pub prefilled: Vec<(String, ObservationValue)>,
    /// Time-dependent target shown with the step, e.g. `SpO2 target 70-75%`.
    pub target: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InterventionView {
    #[serde(flatten)]
    pub intervention: Intervention,
    pub performed: bool,
}
