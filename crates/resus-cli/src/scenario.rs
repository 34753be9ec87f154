//! Scenario files: a scripted session replayed through the engine.
//!
//! ```json
//! {
//!   "protocol": "primary_survey",
//!   "patient": { "age_years": 6, "weight_kg": 20 },
//!   "events": [
//!     { "event": "action", "action": "continue" },
//!     { "event": "observe", "step_id": "initial", "field": "avpu",
//!       "value": { "kind": "choice", "value": "alert" } },
//!     { "event": "tick", "seq": 1, "delta_seconds": 30 }
//!   ]
//! }
//! ```

use std::path::Path;

use resus_core::models::observation::ObservationInput;
use resus_core::models::patient::PatientContextInput;
use resus_core::models::protocol::{ProtocolId, Tick, UserAction};
use resus_core::models::session::Session;
use resus_engine::{Engine, EngineError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub protocol: ProtocolId,
    /// Session creation time; defaults to now.
    #[serde(default)]
    pub started_at: Option<jiff::Timestamp>,
    /// Entered before the first event.
    #[serde(default)]
    pub patient: Option<PatientContextInput>,
    #[serde(default)]
    pub events: Vec<ScenarioEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScenarioEvent {
    /// Enter or correct patient details.
    Patient(PatientContextInput),
    Observe(ObservationInput),
    Action(UserAction),
    Tick(Tick),
}

impl Scenario {
    pub fn from_path(path: &Path) -> eyre::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| eyre::eyre!("failed to read scenario at {}: {e}", path.display()))?;
        serde_json::from_str(&contents)
            .map_err(|e| eyre::eyre!("invalid scenario {}: {e}", path.display()))
    }
}

/// Replay every event in order, stopping at the first engine error.
pub fn replay(engine: &Engine, scenario: &Scenario) -> Result<Session, ReplayError> {
    let started_at = scenario.started_at.unwrap_or_else(jiff::Timestamp::now);
    let mut session = engine.start_session(scenario.protocol, started_at);

    if let Some(patient) = &scenario.patient {
        engine
            .set_patient(&mut session, patient)
            .map_err(ReplayError::Patient)?;
    }

    for (index, event) in scenario.events.iter().enumerate() {
        let result = match event {
            ScenarioEvent::Patient(patient) => engine.set_patient(&mut session, patient),
            ScenarioEvent::Observe(input) => engine.commit_observation(&mut session, input.clone()),
            ScenarioEvent::Action(action) => engine.apply(&mut session, action),
            ScenarioEvent::Tick(tick) => engine.tick(&mut session, *tick).map(drop),
        };
        result.map_err(|source| ReplayError::Event { index, source })?;
    }
    Ok(session)
}

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("patient details rejected: {0}")]
    Patient(#[source] EngineError),

    #[error("event {index} rejected: {source}")]
    Event {
        index: usize,
        #[source]
        source: EngineError,
    },
}
