//! Pure transition function over a protocol template.
//!
//! The sequencer holds no state of its own: every call takes the current
//! state, the patient and the answers so far, and returns the next state.
//! Which steps are reachable is recomputed on every call, so an answer that
//! makes a later step applicable (or not) takes effect on the next move.

use resus_core::error::LogicError;
use resus_core::models::observation::ObservationSet;
use resus_core::models::patient::PatientContext;
use resus_core::models::protocol::{SequencerState, UserAction};

use crate::step::AssessmentStep;
use crate::{EarlyExit, Protocol};

/// Walk the template in order, deciding each step against the patient and
/// the answers on steps already found reachable. Answers left behind on a
/// step that no longer applies therefore neither open later steps nor reach
/// the evaluator.
fn walk(
    protocol: &dyn Protocol,
    patient: &PatientContext,
    observations: &ObservationSet,
) -> (Vec<usize>, ObservationSet) {
    let mut reachable = ObservationSet::new();
    let mut indices = Vec::new();
    for (index, step) in protocol.steps().iter().enumerate() {
        if !step.applies(patient, &reachable) {
            continue;
        }
        indices.push(index);
        if let Some(answers) = observations.for_step(&step.id) {
            for (field, value) in answers {
                reachable.insert(&step.id, field, value.clone());
            }
        }
    }
    (indices, reachable)
}

/// Steps that currently apply, in template order.
pub fn effective_steps<'a>(
    protocol: &'a dyn Protocol,
    patient: &PatientContext,
    observations: &ObservationSet,
) -> Vec<&'a AssessmentStep> {
    let steps = protocol.steps();
    walk(protocol, patient, observations)
        .0
        .into_iter()
        .map(|i| &steps[i])
        .collect()
}

/// The answers recorded on steps that are still reachable.
///
/// The full set is kept on the session so back-navigation can pre-fill
/// earlier answers; findings are derived from this subset only.
pub fn reachable_observations(
    protocol: &dyn Protocol,
    patient: &PatientContext,
    observations: &ObservationSet,
) -> ObservationSet {
    walk(protocol, patient, observations).1
}

fn step_at(protocol: &dyn Protocol, index: Option<&usize>) -> Option<SequencerState> {
    index.map(|&i| SequencerState::step(protocol.steps()[i].id.clone()))
}

pub fn first_step(
    protocol: &dyn Protocol,
    patient: &PatientContext,
    observations: &ObservationSet,
) -> SequencerState {
    let (indices, _) = walk(protocol, patient, observations);
    step_at(protocol, indices.first()).unwrap_or(SequencerState::Interventions)
}

/// The next applicable step after `current`, or the interventions screen when
/// none remain.
pub fn next_step(
    protocol: &dyn Protocol,
    current: &str,
    patient: &PatientContext,
    observations: &ObservationSet,
) -> Result<SequencerState, LogicError> {
    let index = template_index(protocol, current)?;
    let (indices, _) = walk(protocol, patient, observations);
    Ok(step_at(protocol, indices.iter().find(|&&i| i > index))
        .unwrap_or(SequencerState::Interventions))
}

/// The closest applicable step before `current`, or patient data entry when
/// `current` is the first.
pub fn previous_step(
    protocol: &dyn Protocol,
    current: &str,
    patient: &PatientContext,
    observations: &ObservationSet,
) -> Result<SequencerState, LogicError> {
    let index = template_index(protocol, current)?;
    let (indices, _) = walk(protocol, patient, observations);
    Ok(step_at(protocol, indices.iter().rev().find(|&&i| i < index))
        .unwrap_or(SequencerState::PatientData))
}

fn last_step(
    protocol: &dyn Protocol,
    patient: &PatientContext,
    observations: &ObservationSet,
) -> SequencerState {
    let (indices, _) = walk(protocol, patient, observations);
    step_at(protocol, indices.last()).unwrap_or(SequencerState::PatientData)
}

fn template_index(protocol: &dyn Protocol, step_id: &str) -> Result<usize, LogicError> {
    protocol
        .steps()
        .iter()
        .position(|s| s.id == step_id)
        .ok_or_else(|| LogicError::UnknownStep {
            protocol_id: protocol.id().to_string(),
            step_id: step_id.to_string(),
        })
}

/// Apply one operator action.
///
/// `SelectFinding` and `ToggleIntervention` do not move the session; the
/// caller records their effect and the state is returned unchanged when the
/// action is allowed where the session stands.
pub fn transition(
    protocol: &dyn Protocol,
    state: &SequencerState,
    action: &UserAction,
    patient: &PatientContext,
    observations: &ObservationSet,
) -> Result<SequencerState, LogicError> {
    use SequencerState as S;
    use UserAction as A;

    let next = match (state, action) {
        (S::CaseComplete, _) => return Err(LogicError::SessionComplete),

        (S::PatientData, A::Continue) => first_step(protocol, patient, observations),

        (S::Step { step_id }, A::Continue) => next_step(protocol, step_id, patient, observations)?,
        (S::Step { step_id }, A::Back) => previous_step(protocol, step_id, patient, observations)?,
        (S::Step { step_id }, A::SelectFinding { step_id: target, .. }) if target == step_id => {
            state.clone()
        }

        (S::Interventions, A::Continue) => S::Reassessment,
        (S::Interventions, A::Back) => last_step(protocol, patient, observations),
        (S::Reassessment, A::Back) => S::Interventions,

        (S::Interventions | S::Reassessment, A::ToggleIntervention { .. }) => state.clone(),
        (S::Interventions | S::Reassessment, A::Resolve) => S::CaseComplete,
        (S::Interventions | S::Reassessment, A::Escalate) => S::Interventions,

        _ => {
            return Err(LogicError::InvalidTransition {
                state: state.name().to_string(),
                action: action.name().to_string(),
            });
        }
    };

    tracing::debug!(
        protocol = %protocol.id(),
        from = state.name(),
        action = action.name(),
        to = next.name(),
        "sequencer transition"
    );
    Ok(next)
}

/// Check whether the answers so far force a jump to interventions.
///
/// Only meaningful while the survey is still running; once the session is on
/// the interventions or reassessment screens there is nothing to skip.
pub fn check_early_exit(
    protocol: &dyn Protocol,
    state: &SequencerState,
    observations: &ObservationSet,
) -> Option<EarlyExit> {
    match state {
        SequencerState::PatientData | SequencerState::Step { .. } => protocol.early_exit(observations),
        _ => None,
    }
}
