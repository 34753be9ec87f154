use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::finding::FindingSet;
use super::intervention::{Intervention, InterventionLogEntry};
use super::observation::ObservationSet;
use super::patient::PatientContext;
use super::protocol::{ProtocolId, SequencerState};

/// The aggregate state of one patient assessment.
///
/// Borrowed mutably by every engine call, which either applies in full or
/// leaves it untouched. Holds no external resources, so abandoning a session
/// needs no cleanup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Session {
    pub id: Uuid,
    pub protocol: ProtocolId,
    pub created_at: jiff::Timestamp,
    /// Set by the first committed observation.
    pub timer_started: bool,
    pub elapsed_seconds: u64,
    pub last_tick_seq: Option<u64>,
    pub state: SequencerState,
    pub completed_step_ids: Vec<String>,
    pub patient: Option<PatientContext>,
    pub observations: ObservationSet,
    pub findings: FindingSet,
    pub interventions: Vec<Intervention>,
    pub performed: BTreeSet<String>,
    pub intervention_log: Vec<InterventionLogEntry>,
    pub reassessment_cycles: u32,
}

impl Session {
    pub fn new(protocol: ProtocolId, created_at: jiff::Timestamp) -> Self {
        Self {
            id: Uuid::new_v4(),
            protocol,
            created_at,
            timer_started: false,
            elapsed_seconds: 0,
            last_tick_seq: None,
            state: SequencerState::PatientData,
            completed_step_ids: Vec::new(),
            patient: None,
            observations: ObservationSet::new(),
            findings: FindingSet::new(),
            interventions: Vec::new(),
            performed: BTreeSet::new(),
            intervention_log: Vec::new(),
            reassessment_cycles: 0,
        }
    }

    pub fn current_step_id(&self) -> Option<&str> {
        self.state.step_id()
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn elapsed_minutes(&self) -> u64 {
        self.elapsed_seconds / 60
    }
}
