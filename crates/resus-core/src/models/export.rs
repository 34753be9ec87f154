use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::finding::Finding;
use super::intervention::{Intervention, InterventionLogEntry};
use super::observation::ObservationRecord;
use super::patient::PatientContext;
use super::protocol::{ProtocolId, SequencerState};
use crate::error::CoreError;

/// Bump only when a field is removed or changes meaning. Adding optional
/// fields keeps the version.
pub const EXPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionMeta {
    pub id: Uuid,
    pub protocol: ProtocolId,
    pub created_at: jiff::Timestamp,
    pub elapsed_seconds: u64,
    pub state: SequencerState,
    pub completed_step_ids: Vec<String>,
    pub reassessment_cycles: u32,
    pub patient: Option<PatientContext>,
}

/// Immutable snapshot of a session for persistence or export collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionExport {
    pub schema_version: u32,
    pub session_meta: SessionMeta,
    pub observations: Vec<ObservationRecord>,
    pub findings: Vec<Finding>,
    pub interventions: Vec<Intervention>,
    pub intervention_log: Vec<InterventionLogEntry>,
}

impl SessionExport {
    pub fn to_json_pretty(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }
}
