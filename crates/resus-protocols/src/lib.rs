//! resus-protocols
//!
//! Protocol definitions and the step sequencer. Each protocol is an ordered
//! template of steps with declarative applicability; the effective step list
//! is recomputed from the current answers on every move.

pub mod protocols;
pub mod sequencer;
pub mod step;

use resus_core::error::ValidationError;
use resus_core::fields;
use resus_core::models::observation::{ObservationInput, ObservationSet, ObservationValue};
use resus_core::models::protocol::ProtocolId;
use resus_core::models::view::{AssessmentStepView, PromptKind};

use step::AssessmentStep;

/// Why the survey was cut short.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EarlyExit {
    /// Finding that forced the jump to interventions.
    pub finding: &'static str,
}

/// Trait implemented by each assessment protocol.
pub trait Protocol: Send + Sync {
    fn id(&self) -> ProtocolId;

    /// Human-readable name (e.g., "Paediatric primary survey").
    fn name(&self) -> &str;

    /// The full step template in traversal order.
    fn steps(&self) -> &[AssessmentStep];

    fn step(&self, step_id: &str) -> Option<&AssessmentStep> {
        self.steps().iter().find(|s| s.id == step_id)
    }

    /// Observation combinations that end the survey immediately.
    fn early_exit(&self, observations: &ObservationSet) -> Option<EarlyExit> {
        cardiac_arrest_shortcut(observations)
    }

    /// Check an observation against the step's prompt definitions.
    fn validate_observation(&self, input: &ObservationInput) -> Result<(), ValidationError> {
        let step = self.step(&input.step_id).ok_or_else(|| {
            ValidationError::new(
                "step_id",
                format!("{}: unknown step '{}'", self.name(), input.step_id),
            )
        })?;

        if input.field == fields::CRITICAL_FINDINGS {
            let ObservationValue::MultiSelect(selected) = &input.value else {
                return Err(ValidationError::new(
                    fields::CRITICAL_FINDINGS,
                    "critical findings must be a multi-select",
                ));
            };
            return match selected
                .iter()
                .find(|s| !step.critical_finding_options.contains(s))
            {
                Some(unknown) => Err(ValidationError::new(
                    fields::CRITICAL_FINDINGS,
                    format!("'{unknown}' is not a critical finding of step '{}'", step.id),
                )),
                None => Ok(()),
            };
        }

        let prompt = step.find_prompt(&input.field).ok_or_else(|| {
            ValidationError::new(
                input.field.clone(),
                format!("step '{}' has no field '{}'", step.id, input.field),
            )
        })?;

        let ok = match (&prompt.kind, &input.value) {
            (PromptKind::Numeric { range, .. }, ObservationValue::Numeric(v)) => {
                if !range.contains(*v) {
                    return Err(ValidationError::new(
                        input.field.clone(),
                        format!(
                            "{} {} is outside range [{}, {}]",
                            prompt.label, v, range.min, range.max
                        ),
                    )
                    .with_value(v));
                }
                if !range.on_step(*v) {
                    return Err(ValidationError::new(
                        input.field.clone(),
                        format!("{} must be a whole number, got {}", prompt.label, v),
                    )
                    .with_value(v));
                }
                true
            }
            (PromptKind::Choice { options }, ObservationValue::Choice(v)) => options.contains(v),
            (PromptKind::MultiSelect { options }, ObservationValue::MultiSelect(vs)) => {
                vs.iter().all(|v| options.contains(v))
            }
            (PromptKind::Flag, ObservationValue::Flag(_)) => true,
            _ => {
                return Err(ValidationError::new(
                    input.field.clone(),
                    format!("{} expects a different kind of answer", prompt.label),
                ));
            }
        };

        if ok {
            Ok(())
        } else {
            Err(ValidationError::new(
                input.field.clone(),
                format!("{} is not an option for {}", input.value, prompt.label),
            )
            .with_value(&input.value))
        }
    }

    /// Render a step for the presentation layer, pre-filled with any earlier
    /// answers.
    fn step_view(
        &self,
        step_id: &str,
        observations: &ObservationSet,
        target: Option<String>,
    ) -> Option<AssessmentStepView> {
        let step = self.step(step_id)?;
        let prefilled = observations
            .for_step(step_id)
            .map(|f| f.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default();
        Some(AssessmentStepView {
            id: step.id.clone(),
            phase: step.phase.letter().to_string(),
            title: step.title.clone(),
            prompts: step.all_prompts(),
            applicable_options: step.critical_finding_options.clone(),
            intervention_options: step.intervention_options.clone(),
            prefilled,
            target,
        })
    }
}

/// Unresponsive with no pulse, or an operator-declared arrest.
pub fn cardiac_arrest_shortcut(observations: &ObservationSet) -> Option<EarlyExit> {
    let arrest = (observations.choice_is(fields::AVPU, "unresponsive")
        && observations.choice_is(fields::PULSE, "absent"))
        || observations
            .critical_selections()
            .iter()
            .any(|s| s == "cardiac-arrest");
    arrest.then_some(EarlyExit {
        finding: "cardiac-arrest",
    })
}

/// Return all registered protocols.
pub fn all_protocols() -> Vec<Box<dyn Protocol>> {
    vec![
        Box::new(protocols::primary_survey::PrimarySurvey),
        Box::new(protocols::step_by_step::StepByStepSurvey),
        Box::new(protocols::neonatal::NeonatalResuscitation),
        Box::new(protocols::trauma::TraumaPrimarySurvey),
    ]
}

/// Look up a protocol by ID.
pub fn get_protocol(id: ProtocolId) -> Box<dyn Protocol> {
    match id {
        ProtocolId::PrimarySurvey => Box::new(protocols::primary_survey::PrimarySurvey),
        ProtocolId::StepByStepSurvey => Box::new(protocols::step_by_step::StepByStepSurvey),
        ProtocolId::NeonatalResuscitation => Box::new(protocols::neonatal::NeonatalResuscitation),
        ProtocolId::TraumaPrimarySurvey => Box::new(protocols::trauma::TraumaPrimarySurvey),
    }
}
