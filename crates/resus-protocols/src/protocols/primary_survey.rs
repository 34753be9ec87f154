use resus_core::fields::*;
use resus_core::models::finding::AbcdeSystem;
use resus_core::models::protocol::ProtocolId;

use crate::Protocol;
use crate::step::{AssessmentStep, choice, flag, numeric};

/// Paediatric ABCDE primary survey: a quick look, then one step per system.
pub struct PrimarySurvey;

impl Protocol for PrimarySurvey {
    fn id(&self) -> ProtocolId {
        ProtocolId::PrimarySurvey
    }

    fn name(&self) -> &str {
        "Paediatric primary survey"
    }

    fn steps(&self) -> &[AssessmentStep] {
        static STEPS: std::sync::LazyLock<Vec<AssessmentStep>> = std::sync::LazyLock::new(|| {
            vec![
                AssessmentStep::new("initial", AbcdeSystem::General, "General impression")
                    .prompt(choice(
                        APPEARANCE,
                        "Appearance",
                        &["well", "unwell", "critically_unwell"],
                    ))
                    .prompt(choice(AVPU, "Responsiveness (AVPU)", &["alert", "voice", "pain", "unresponsive"]))
                    .prompt(flag(TRAUMA, "Mechanism of injury"))
                    .critical(&["cardiac-arrest"])
                    .interventions(&["call for help", "attach monitoring"]),
                AssessmentStep::new("airway", AbcdeSystem::Airway, "Airway")
                    .prompt(choice(AIRWAY_PATENCY, "Airway", &["patent", "at_risk", "obstructed"]))
                    .prompt(choice(
                        AIRWAY_SOUNDS,
                        "Airway sounds",
                        &["none", "stridor", "gurgling", "snoring"],
                    ))
                    .critical(&["airway-obstruction", "anaphylaxis"])
                    .interventions(&["head tilt-chin lift", "jaw thrust", "suction", "airway adjunct"]),
                AssessmentStep::new("breathing", AbcdeSystem::Breathing, "Breathing")
                    .prompt(choice(
                        BREATHING_EFFORT,
                        "Work of breathing",
                        &["normal", "increased", "decreased", "absent"],
                    ))
                    .prompt(numeric(RESPIRATORY_RATE, "Respiratory rate", "/min", 0.0, 120.0))
                    .prompt(numeric(SPO2, "SpO2", "%", 0.0, 100.0))
                    .prompt(choice(
                        BREATH_SOUNDS,
                        "Breath sounds",
                        &["clear", "wheeze", "crackles", "reduced", "silent"],
                    ))
                    .critical(&["apnea", "tension-pneumothorax"])
                    .interventions(&["oxygen", "bag-valve-mask ventilation"]),
                AssessmentStep::new("circulation", AbcdeSystem::Circulation, "Circulation")
                    .prompt(choice(PULSE, "Central pulse", &["present", "weak", "absent"]))
                    .prompt(numeric(HEART_RATE, "Heart rate", "/min", 0.0, 300.0))
                    .prompt(numeric(CAPILLARY_REFILL, "Capillary refill", "s", 0.0, 15.0))
                    .prompt(numeric(SYSTOLIC_BP, "Systolic BP", "mmHg", 0.0, 250.0))
                    .prompt(choice(
                        SKIN_TEMPERATURE,
                        "Peripheries",
                        &["warm", "cool", "mottled"],
                    ))
                    .prompt(numeric(
                        FLUID_GIVEN_ML_PER_KG,
                        "Fluid given so far",
                        "mL/kg",
                        0.0,
                        200.0,
                    ))
                    .critical(&["cardiac-arrest", "poor-perfusion"])
                    .interventions(&["IV/IO access", "fluid bolus"]),
                AssessmentStep::new("disability", AbcdeSystem::Disability, "Disability")
                    .prompt(choice(
                        PUPILS,
                        "Pupils",
                        &["equal_reactive", "unequal", "fixed_dilated", "pinpoint"],
                    ))
                    .prompt(flag(SEIZURE, "Seizure activity"))
                    .prompt(numeric(GLUCOSE_MMOL_L, "Blood glucose", "mmol/L", 0.0, 50.0))
                    .critical(&["active-seizure", "hypoglycemia"])
                    .interventions(&["check glucose", "recovery position"]),
                AssessmentStep::new("exposure", AbcdeSystem::Exposure, "Exposure")
                    .prompt(numeric(TEMPERATURE, "Temperature", "°C", 25.0, 45.0))
                    .prompt(choice(
                        RASH,
                        "Rash",
                        &["none", "blanching", "non_blanching", "urticarial"],
                    ))
                    .prompt(flag(ANAPHYLAXIS_SIGNS, "Signs of anaphylaxis"))
                    .critical(&["non-blanching-rash", "anaphylaxis"])
                    .interventions(&["keep warm", "full exposure"]),
            ]
        });
        &STEPS
    }
}
