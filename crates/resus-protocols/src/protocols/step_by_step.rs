use resus_core::fields::*;
use resus_core::models::finding::AbcdeSystem;
use resus_core::models::patient::PatientType;
use resus_core::models::protocol::ProtocolId;

use crate::Protocol;
use crate::step::{Applicability, AssessmentStep, choice, flag, numeric, whole};

/// Extended survey: one question group per screen, with steps that appear
/// only for certain patients or after certain answers.
pub struct StepByStepSurvey;

impl Protocol for StepByStepSurvey {
    fn id(&self) -> ProtocolId {
        ProtocolId::StepByStepSurvey
    }

    fn name(&self) -> &str {
        "Step-by-step ABCDE survey"
    }

    fn steps(&self) -> &[AssessmentStep] {
        static STEPS: std::sync::LazyLock<Vec<AssessmentStep>> = std::sync::LazyLock::new(|| {
            vec![
                AssessmentStep::new("general_impression", AbcdeSystem::General, "General impression")
                    .prompt(choice(
                        APPEARANCE,
                        "Appearance",
                        &["well", "unwell", "critically_unwell"],
                    ))
                    .prompt(flag(TRAUMA, "Mechanism of injury")),
                AssessmentStep::new("responsiveness", AbcdeSystem::General, "Responsiveness")
                    .prompt(choice(AVPU, "AVPU", &["alert", "voice", "pain", "unresponsive"]))
                    .critical(&["cardiac-arrest"]),
                AssessmentStep::new("airway_patency", AbcdeSystem::Airway, "Airway patency")
                    .prompt(choice(AIRWAY_PATENCY, "Airway", &["patent", "at_risk", "obstructed"]))
                    .prompt(choice(
                        AIRWAY_SOUNDS,
                        "Airway sounds",
                        &["none", "stridor", "gurgling", "snoring"],
                    ))
                    .prompt(flag(FACIAL_SWELLING, "Facial or tongue swelling"))
                    .critical(&["airway-obstruction"])
                    .interventions(&["head tilt-chin lift", "jaw thrust", "suction"]),
                AssessmentStep::new("breathing_effort", AbcdeSystem::Breathing, "Breathing effort")
                    .prompt(choice(
                        BREATHING_EFFORT,
                        "Work of breathing",
                        &["normal", "increased", "decreased", "absent"],
                    ))
                    .prompt(choice(
                        BREATH_SOUNDS,
                        "Breath sounds",
                        &["clear", "wheeze", "crackles", "reduced", "silent"],
                    ))
                    .prompt(flag(TRACHEAL_DEVIATION, "Tracheal deviation"))
                    .critical(&["apnea", "tension-pneumothorax"]),
                AssessmentStep::new("breathing_measurements", AbcdeSystem::Breathing, "Breathing measurements")
                    .applies_when(Applicability::not(Applicability::choice_is(
                        BREATHING_EFFORT,
                        "absent",
                    )))
                    .prompt(numeric(RESPIRATORY_RATE, "Respiratory rate", "/min", 0.0, 120.0))
                    .prompt(numeric(SPO2, "SpO2", "%", 0.0, 100.0))
                    .interventions(&["oxygen"]),
                AssessmentStep::new("pulse_check", AbcdeSystem::Circulation, "Pulse check")
                    .prompt(choice(PULSE, "Central pulse", &["present", "weak", "absent"]))
                    .prompt(choice(
                        RHYTHM,
                        "Rhythm",
                        &["sinus", "svt", "bradycardia", "vf_pvt", "asystole_pea"],
                    ))
                    .critical(&["cardiac-arrest"]),
                AssessmentStep::new("perfusion", AbcdeSystem::Circulation, "Perfusion")
                    .applies_when(Applicability::not(Applicability::choice_is(PULSE, "absent")))
                    .prompt(numeric(HEART_RATE, "Heart rate", "/min", 0.0, 300.0))
                    .prompt(numeric(CAPILLARY_REFILL, "Capillary refill", "s", 0.0, 15.0))
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
                    .critical(&["poor-perfusion"])
                    .interventions(&["IV/IO access", "fluid bolus"]),
                AssessmentStep::new("blood_pressure", AbcdeSystem::Circulation, "Blood pressure")
                    .applies_when(Applicability::not(Applicability::choice_is(PULSE, "absent")))
                    .prompt(numeric(SYSTOLIC_BP, "Systolic BP", "mmHg", 0.0, 250.0)),
                AssessmentStep::new("jugular_venous_pressure", AbcdeSystem::Circulation, "Jugular venous pressure")
                    .applies_when(Applicability::patient_types(&[
                        PatientType::Adult,
                        PatientType::Pregnant,
                    ]))
                    .prompt(choice(JVP, "JVP", &["normal", "raised"])),
                AssessmentStep::new("uterine_assessment", AbcdeSystem::Circulation, "Uterine assessment")
                    .applies_when(Applicability::patient_types(&[PatientType::Pregnant]))
                    .prompt(flag(FUNDAL_HEIGHT_ABOVE_UMBILICUS, "Fundus at or above umbilicus"))
                    .interventions(&["left uterine displacement"]),
                AssessmentStep::new("neurological", AbcdeSystem::Disability, "Neurological")
                    .prompt(whole(GCS_EYE, "GCS eye", 1.0, 4.0))
                    .prompt(whole(GCS_VERBAL, "GCS verbal", 1.0, 5.0))
                    .prompt(whole(GCS_MOTOR, "GCS motor", 1.0, 6.0))
                    .prompt(choice(
                        PUPILS,
                        "Pupils",
                        &["equal_reactive", "unequal", "fixed_dilated", "pinpoint"],
                    ))
                    .prompt(flag(SEIZURE, "Seizure activity"))
                    .critical(&["active-seizure"]),
                AssessmentStep::new("glucose", AbcdeSystem::Disability, "Blood glucose")
                    .prompt(numeric(GLUCOSE_MMOL_L, "Glucose", "mmol/L", 0.0, 50.0))
                    .prompt(numeric(GLUCOSE_MG_DL, "Glucose", "mg/dL", 0.0, 900.0))
                    .critical(&["hypoglycemia"]),
                AssessmentStep::new("toxin_history", AbcdeSystem::Disability, "Toxin history")
                    .applies_when(Applicability::flag(TRAUMA))
                    .prompt(choice(
                        TOXIN_EXPOSURE,
                        "Suspected toxin",
                        &["none", "opioid", "sedative", "stimulant", "unknown"],
                    )),
                AssessmentStep::new("exposure", AbcdeSystem::Exposure, "Exposure")
                    .prompt(numeric(TEMPERATURE, "Temperature", "°C", 25.0, 45.0))
                    .prompt(choice(
                        RASH,
                        "Rash",
                        &["none", "blanching", "non_blanching", "urticarial"],
                    ))
                    .prompt(flag(ANAPHYLAXIS_SIGNS, "Signs of anaphylaxis"))
                    .critical(&["non-blanching-rash", "anaphylaxis"])
                    .interventions(&["keep warm"]),
            ]
        });
        &STEPS
    }
}
