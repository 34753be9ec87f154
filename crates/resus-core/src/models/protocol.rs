use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ProtocolId {
    PrimarySurvey,
    StepByStepSurvey,
    NeonatalResuscitation,
    TraumaPrimarySurvey,
}

impl ProtocolId {
    pub const ALL: [ProtocolId; 4] = [
        Self::PrimarySurvey,
        Self::StepByStepSurvey,
        Self::NeonatalResuscitation,
        Self::TraumaPrimarySurvey,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PrimarySurvey => "primary_survey",
            Self::StepByStepSurvey => "step_by_step_survey",
            Self::NeonatalResuscitation => "neonatal_resuscitation",
            Self::TraumaPrimarySurvey => "trauma_primary_survey",
        }
    }
}

impl std::fmt::Display for ProtocolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProtocolId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown protocol: {s}"))
    }
}

/// Position of a session in the assessment state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "state", rename_all = "snake_case")]
#[ts(export)]
pub enum SequencerState {
    PatientData,
    Step { step_id: String },
    Interventions,
    Reassessment,
    CaseComplete,
}

impl SequencerState {
    pub fn step(step_id: impl Into<String>) -> Self {
        Self::Step {
            step_id: step_id.into(),
        }
    }

    pub fn step_id(&self) -> Option<&str> {
        match self {
            Self::Step { step_id } => Some(step_id),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::CaseComplete)
    }

    pub fn name(&self) -> &str {
        match self {
            Self::PatientData => "patient_data",
            Self::Step { step_id } => step_id,
            Self::Interventions => "interventions",
            Self::Reassessment => "reassessment",
            Self::CaseComplete => "case_complete",
        }
    }
}

/// Operator actions forwarded by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "action", rename_all = "snake_case")]
#[ts(export)]
pub enum UserAction {
    Continue,
    Back,
    SelectFinding { step_id: String, finding: String },
    ToggleIntervention { intervention_id: String },
    Resolve,
    Escalate,
}

impl UserAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Continue => "continue",
            Self::Back => "back",
            Self::SelectFinding { .. } => "select_finding",
            Self::ToggleIntervention { .. } => "toggle_intervention",
            Self::Resolve => "resolve",
            Self::Escalate => "escalate",
        }
    }
}

/// An externally delivered clock tick.
///
/// `seq` identifies the tick so redelivery can be detected; a tick that
/// coalesces several intervals simply carries their summed delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Tick {
    pub seq: u64,
    pub delta_seconds: u64,
}
