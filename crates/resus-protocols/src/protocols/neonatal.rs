use resus_core::fields::*;
use resus_core::models::finding::AbcdeSystem;
use resus_core::models::protocol::ProtocolId;

use crate::Protocol;
use crate::step::{Applicability, AssessmentStep, choice, flag, numeric};

/// Newborn life support: rapid evaluation, initial steps, ventilation,
/// compressions and medication, each reached only if the baby still needs it.
pub struct NeonatalResuscitation;

fn not_vigorous() -> Applicability {
    Applicability::Any(vec![
        Applicability::not(Applicability::flag(TERM_GESTATION)),
        Applicability::choice_is(NEONATAL_TONE, "poor"),
        Applicability::choice_in(NEONATAL_BREATHING, &["gasping", "apneic"]),
    ])
}

fn needs_ventilation() -> Applicability {
    Applicability::Any(vec![
        Applicability::choice_in(NEONATAL_BREATHING, &["gasping", "apneic"]),
        Applicability::numeric_below(NEONATAL_HEART_RATE, 100.0),
    ])
}

impl Protocol for NeonatalResuscitation {
    fn id(&self) -> ProtocolId {
        ProtocolId::NeonatalResuscitation
    }

    fn name(&self) -> &str {
        "Neonatal resuscitation"
    }

    fn steps(&self) -> &[AssessmentStep] {
        static STEPS: std::sync::LazyLock<Vec<AssessmentStep>> = std::sync::LazyLock::new(|| {
            vec![
                AssessmentStep::new("birth_assessment", AbcdeSystem::General, "Rapid evaluation at birth")
                    .prompt(flag(TERM_GESTATION, "Term gestation"))
                    .prompt(choice(NEONATAL_TONE, "Tone", &["good", "poor"]))
                    .prompt(choice(
                        NEONATAL_BREATHING,
                        "Breathing or crying",
                        &["crying", "breathing", "gasping", "apneic"],
                    ))
                    .interventions(&["delayed cord clamping", "skin-to-skin"]),
                AssessmentStep::new("initial_steps", AbcdeSystem::Airway, "Initial steps")
                    .applies_when(not_vigorous())
                    .prompt(numeric(NEONATAL_HEART_RATE, "Heart rate", "/min", 0.0, 250.0))
                    .prompt(numeric(TEMPERATURE, "Temperature", "°C", 25.0, 45.0))
                    .critical(&["neonatal-apnea"])
                    .interventions(&["warm", "dry", "stimulate", "position airway", "suction if needed"]),
                AssessmentStep::new("ventilation", AbcdeSystem::Breathing, "Positive-pressure ventilation")
                    .applies_when(needs_ventilation())
                    .prompt(flag(VENTILATION_EFFECTIVE, "Chest rising with each breath"))
                    .prompt(numeric(NEONATAL_SPO2, "Pre-ductal SpO2", "%", 0.0, 100.0))
                    .prompt(numeric(
                        NEONATAL_HEART_RATE_AFTER_PPV,
                        "Heart rate after 30 s of ventilation",
                        "/min",
                        0.0,
                        250.0,
                    ))
                    .interventions(&["PPV", "SpO2 monitor", "ventilation corrective steps"]),
                AssessmentStep::new("compressions", AbcdeSystem::Circulation, "Chest compressions")
                    .applies_when(Applicability::numeric_below(NEONATAL_HEART_RATE_AFTER_PPV, 60.0))
                    .prompt(numeric(
                        NEONATAL_HEART_RATE_AFTER_COMPRESSIONS,
                        "Heart rate after 60 s of compressions",
                        "/min",
                        0.0,
                        250.0,
                    ))
                    .critical(&["neonatal-severe-bradycardia"])
                    .interventions(&["intubate", "100% oxygen", "3:1 compressions"]),
                AssessmentStep::new("medication", AbcdeSystem::Circulation, "Medication")
                    .applies_when(Applicability::numeric_below(
                        NEONATAL_HEART_RATE_AFTER_COMPRESSIONS,
                        60.0,
                    ))
                    .prompt(choice(VASCULAR_ACCESS, "Vascular access", &["uvc", "io", "none"]))
                    .critical(&["neonatal-hypovolemia"])
                    .interventions(&["umbilical venous catheter", "adrenaline", "volume"]),
            ]
        });
        &STEPS
    }
}
