use resus_calc::patient::resolve_patient;
use resus_calc::ranges::{ReferenceRanges, neonatal_spo2_target};
use resus_core::config::EngineConfig;
use resus_core::error::{LogicError, ValidationError};
use resus_core::fields;
use resus_core::models::export::{EXPORT_SCHEMA_VERSION, SessionExport, SessionMeta};
use resus_core::models::intervention::InterventionLogEntry;
use resus_core::models::observation::{ObservationInput, ObservationSet, ObservationValue};
use resus_core::models::patient::{PatientContext, PatientContextInput};
use resus_core::models::protocol::{ProtocolId, SequencerState, Tick, UserAction};
use resus_core::models::session::Session;
use resus_core::models::view::{AssessmentStepView, InterventionView};
use resus_protocols::sequencer::{check_early_exit, reachable_observations, transition};
use resus_protocols::{Protocol, get_protocol};
use resus_rules::{RuleSettings, catalog, derive_interventions, evaluate};
use serde_json::json;
use tracing::{debug, warn};

use crate::error::EngineError;
use crate::events::SessionEvent;
use crate::timer::{self, TickOutcome};

/// Stateless dispatcher over sessions.
///
/// Every operation either applies in full or leaves the session exactly as
/// it was, so a rejected answer can simply be corrected and resubmitted.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn start_session(&self, protocol: ProtocolId, now: jiff::Timestamp) -> Session {
        let session = Session::new(protocol, now);
        SessionEvent::new(&session, "session_started")
            .with_details(json!({ "protocol": protocol }))
            .emit();
        session
    }

    /// Resolve and store the patient. May be called again to correct the
    /// demographics; everything derived is recomputed.
    pub fn set_patient(
        &self,
        session: &mut Session,
        input: &PatientContextInput,
    ) -> Result<(), EngineError> {
        self.update(session, |session| {
            if session.is_complete() {
                return self.reject(session, LogicError::SessionComplete);
            }
            let formula = self.config.formulas.for_protocol(session.protocol).weight;
            let patient = resolve_patient(input, formula)?;
            let corrected = session.patient.is_some();
            session.patient = Some(patient);
            self.recompute(session)?;

            SessionEvent::new(session, if corrected { "patient_corrected" } else { "patient_set" })
                .with_details(json!({
                    "age_months": patient.age_months,
                    "weight_kg": patient.weight_kg,
                    "patient_type": patient.patient_type,
                    "weight_source": patient.weight_source,
                }))
                .emit();
            Ok(())
        })
    }

    /// Record one answer for the step on screen, or re-record an answer for a
    /// visited step during reassessment.
    pub fn commit_observation(
        &self,
        session: &mut Session,
        input: ObservationInput,
    ) -> Result<(), EngineError> {
        let protocol = get_protocol(session.protocol);
        let writable = match &session.state {
            SequencerState::Step { step_id } => *step_id == input.step_id,
            SequencerState::Reassessment => session.completed_step_ids.contains(&input.step_id),
            _ => false,
        };
        if !writable {
            let err = LogicError::InvalidTransition {
                state: session.state.name().to_string(),
                action: format!("commit_observation({})", input.step_id),
            };
            return self.reject(session, err);
        }
        require_patient(session)?;
        protocol.validate_observation(&input)?;

        self.update(session, |session| self.record(session, protocol.as_ref(), input))
    }

    /// Dispatch one operator action.
    pub fn apply(&self, session: &mut Session, action: &UserAction) -> Result<(), EngineError> {
        let protocol = get_protocol(session.protocol);

        if session.state == SequencerState::PatientData && *action == UserAction::Continue {
            require_patient(session)?;
        }
        let Some(patient) = session.patient else {
            let err = LogicError::InvalidTransition {
                state: session.state.name().to_string(),
                action: action.name().to_string(),
            };
            return self.reject(session, err);
        };

        let next = match transition(
            protocol.as_ref(),
            &session.state,
            action,
            &patient,
            &session.observations,
        ) {
            Ok(next) => next,
            Err(e) => return self.reject(session, e),
        };

        self.update(session, |session| {
            match action {
                UserAction::Continue => {
                    if let Some(step_id) = session.state.step_id() {
                        let step_id = step_id.to_string();
                        if !session.completed_step_ids.contains(&step_id) {
                            session.completed_step_ids.push(step_id);
                        }
                    }
                }
                UserAction::SelectFinding { step_id, finding } => {
                    let mut selected = session
                        .observations
                        .get_at(step_id, fields::CRITICAL_FINDINGS)
                        .map(|v| v.as_selections().to_vec())
                        .unwrap_or_default();
                    match selected.iter().position(|s| s == finding) {
                        Some(i) => {
                            selected.remove(i);
                        }
                        None => selected.push(finding.clone()),
                    }
                    let input = ObservationInput::new(
                        step_id.clone(),
                        fields::CRITICAL_FINDINGS,
                        ObservationValue::MultiSelect(selected),
                    );
                    protocol.validate_observation(&input)?;
                    return self.record(session, protocol.as_ref(), input);
                }
                UserAction::ToggleIntervention { intervention_id } => {
                    self.toggle_intervention(session, intervention_id)?;
                }
                UserAction::Escalate => {
                    session.reassessment_cycles += 1;
                    session.performed.clear();
                }
                UserAction::Back | UserAction::Resolve => {}
            }

            let from = session.state.name().to_string();
            session.state = next;
            if *action == UserAction::Escalate {
                self.recompute(session)?;
            }

            if from != session.state.name() || matches!(action, UserAction::Escalate) {
                SessionEvent::new(session, action.name())
                    .with_details(json!({
                        "from": from,
                        "reassessment_cycles": session.reassessment_cycles,
                        "interventions": session.interventions.len(),
                    }))
                    .emit();
            }
            Ok(())
        })
    }

    /// Advance the session clock. Redelivered ticks and ticks before the first
    /// observation are ignored.
    pub fn tick(&self, session: &mut Session, tick: Tick) -> Result<TickOutcome, EngineError> {
        self.update(session, |session| {
            let outcome = timer::advance(session, tick);
            match outcome {
                TickOutcome::Applied => {
                    // Time-bucketed targets may have moved.
                    if session.protocol == ProtocolId::NeonatalResuscitation {
                        self.recompute(session)?;
                    }
                }
                outcome => debug!(session.id = %session.id, seq = tick.seq, ?outcome, "tick ignored"),
            }
            Ok(outcome)
        })
    }

    /// The step on screen, pre-filled with earlier answers.
    pub fn current_view(&self, session: &Session) -> Option<AssessmentStepView> {
        let step_id = session.current_step_id()?;
        let protocol = get_protocol(session.protocol);
        let target = protocol
            .step(step_id)?
            .find_prompt(fields::NEONATAL_SPO2)
            .map(|_| {
                let t = neonatal_spo2_target(session.elapsed_seconds);
                format!("SpO2 target {}-{}%", t.min, t.max)
            });
        protocol.step_view(step_id, &session.observations, target)
    }

    pub fn intervention_views(&self, session: &Session) -> Vec<InterventionView> {
        session
            .interventions
            .iter()
            .map(|i| InterventionView {
                intervention: i.clone(),
                performed: session.performed.contains(&i.id),
            })
            .collect()
    }

    pub fn reference_ranges(&self, session: &Session) -> Option<ReferenceRanges> {
        session
            .patient
            .map(|p| ReferenceRanges::for_patient(&p, session.elapsed_seconds))
    }

    /// Snapshot the session for an export collaborator.
    pub fn export(&self, session: &Session) -> SessionExport {
        SessionExport {
            schema_version: EXPORT_SCHEMA_VERSION,
            session_meta: SessionMeta {
                id: session.id,
                protocol: session.protocol,
                created_at: session.created_at,
                elapsed_seconds: session.elapsed_seconds,
                state: session.state.clone(),
                completed_step_ids: session.completed_step_ids.clone(),
                reassessment_cycles: session.reassessment_cycles,
                patient: session.patient,
            },
            observations: session.observations.records(),
            findings: session.findings.iter().cloned().collect(),
            interventions: session.interventions.clone(),
            intervention_log: session.intervention_log.clone(),
        }
    }

    /// Run `change` on a copy and keep the copy only if it succeeds.
    fn update<T>(
        &self,
        session: &mut Session,
        change: impl FnOnce(&mut Session) -> Result<T, EngineError>,
    ) -> Result<T, EngineError> {
        let mut draft = session.clone();
        let out = change(&mut draft)?;
        *session = draft;
        Ok(out)
    }

    /// Store a validated observation, start the clock, re-derive, and take
    /// the early exit if the answers call for it.
    fn record(
        &self,
        session: &mut Session,
        protocol: &dyn Protocol,
        input: ObservationInput,
    ) -> Result<(), EngineError> {
        session
            .observations
            .insert(&input.step_id, &input.field, input.value);
        let started = timer::start(session);
        self.recompute(session)?;
        if started {
            SessionEvent::new(session, "timer_started").emit();
        }

        let reachable = self.reachable(session);
        if let Some(exit) = check_early_exit(protocol, &session.state, &reachable) {
            if let Some(step_id) = session.state.step_id() {
                let step_id = step_id.to_string();
                if !session.completed_step_ids.contains(&step_id) {
                    session.completed_step_ids.push(step_id);
                }
            }
            if !session.findings.contains(exit.finding) {
                session
                    .findings
                    .insert(catalog::finding(exit.finding, "early exit"));
                self.derive(session)?;
            }
            session.state = SequencerState::Interventions;
            SessionEvent::new(session, "early_exit")
                .with_details(json!({ "finding": exit.finding }))
                .emit();
        }
        Ok(())
    }

    fn toggle_intervention(&self, session: &mut Session, id: &str) -> Result<(), EngineError> {
        if !session.interventions.iter().any(|i| i.id == id) {
            return Err(ValidationError::new(
                "intervention_id",
                format!("'{id}' is not a current intervention"),
            )
            .into());
        }
        let performed = if session.performed.remove(id) {
            false
        } else {
            session.performed.insert(id.to_string());
            true
        };
        session.intervention_log.push(InterventionLogEntry {
            intervention_id: id.to_string(),
            performed,
            elapsed_seconds: session.elapsed_seconds,
            reassessment_cycle: session.reassessment_cycles,
        });
        SessionEvent::new(session, "toggle_intervention")
            .with_details(json!({ "intervention": id, "performed": performed }))
            .emit();
        Ok(())
    }

    /// Answers on steps the protocol still reaches for this patient.
    fn reachable(&self, session: &Session) -> ObservationSet {
        match session.patient {
            Some(patient) => reachable_observations(
                get_protocol(session.protocol).as_ref(),
                &patient,
                &session.observations,
            ),
            None => ObservationSet::new(),
        }
    }

    /// Findings and interventions from scratch, from the reachable answers.
    fn recompute(&self, session: &mut Session) -> Result<(), EngineError> {
        let Some(patient) = session.patient else {
            return Ok(());
        };
        let ranges = ReferenceRanges::for_patient(&patient, session.elapsed_seconds);
        session.findings = evaluate(&self.reachable(session), &patient, &ranges);
        self.derive(session)
    }

    fn derive(&self, session: &mut Session) -> Result<(), EngineError> {
        let Some(patient) = session.patient else {
            return Ok(());
        };
        let settings = RuleSettings::from_config(&self.config, session.protocol);
        session.interventions = derive_interventions(&session.findings, &patient, &settings)?;
        debug!(
            session.id = %session.id,
            findings = session.findings.len(),
            interventions = session.interventions.len(),
            "session recomputed"
        );
        Ok(())
    }

    /// Strict mode reports an impossible transition; lenient mode logs it and
    /// leaves the session untouched.
    fn reject(&self, session: &Session, err: LogicError) -> Result<(), EngineError> {
        if self.config.strict_transitions {
            return Err(err.into());
        }
        warn!(session.id = %session.id, error = %err, "ignored impossible transition");
        Ok(())
    }
}

fn require_patient(session: &Session) -> Result<PatientContext, ValidationError> {
    session
        .patient
        .ok_or_else(|| ValidationError::new("patient", "enter patient details first"))
}
