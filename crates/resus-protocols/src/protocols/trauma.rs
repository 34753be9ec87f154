use resus_core::fields::*;
use resus_core::models::finding::AbcdeSystem;
use resus_core::models::patient::PatientType;
use resus_core::models::protocol::ProtocolId;

use crate::Protocol;
use crate::step::{Applicability, AssessmentStep, choice, flag, numeric, whole};

/// Trauma primary survey (xABCDE): catastrophic bleeding first.
pub struct TraumaPrimarySurvey;

impl Protocol for TraumaPrimarySurvey {
    fn id(&self) -> ProtocolId {
        ProtocolId::TraumaPrimarySurvey
    }

    fn name(&self) -> &str {
        "Trauma primary survey"
    }

    fn steps(&self) -> &[AssessmentStep] {
        static STEPS: std::sync::LazyLock<Vec<AssessmentStep>> = std::sync::LazyLock::new(|| {
            vec![
                AssessmentStep::new(
                    "catastrophic_hemorrhage",
                    AbcdeSystem::CatastrophicHemorrhage,
                    "Catastrophic haemorrhage",
                )
                .prompt(flag(CATASTROPHIC_HEMORRHAGE, "Uncontrolled external bleeding"))
                .critical(&["catastrophic-hemorrhage"])
                .interventions(&["direct pressure", "tourniquet", "haemostatic packing"]),
                AssessmentStep::new("airway_cspine", AbcdeSystem::Airway, "Airway and cervical spine")
                    .prompt(choice(AVPU, "Responsiveness (AVPU)", &["alert", "voice", "pain", "unresponsive"]))
                    .prompt(choice(AIRWAY_PATENCY, "Airway", &["patent", "at_risk", "obstructed"]))
                    .prompt(choice(
                        AIRWAY_SOUNDS,
                        "Airway sounds",
                        &["none", "stridor", "gurgling", "snoring"],
                    ))
                    .prompt(flag(CSPINE_CONCERN, "Cervical spine injury possible"))
                    .critical(&["airway-obstruction", "cardiac-arrest"])
                    .interventions(&["jaw thrust", "suction", "manual in-line stabilisation"]),
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
                    .prompt(flag(TRACHEAL_DEVIATION, "Tracheal deviation"))
                    .critical(&["tension-pneumothorax", "apnea"])
                    .interventions(&["oxygen", "needle decompression"]),
                AssessmentStep::new("circulation", AbcdeSystem::Circulation, "Circulation")
                    .prompt(choice(PULSE, "Central pulse", &["present", "weak", "absent"]))
                    .prompt(numeric(HEART_RATE, "Heart rate", "/min", 0.0, 300.0))
                    .prompt(numeric(SYSTOLIC_BP, "Systolic BP", "mmHg", 0.0, 250.0))
                    .prompt(numeric(CAPILLARY_REFILL, "Capillary refill", "s", 0.0, 15.0))
                    .prompt(choice(HEMORRHAGE_CLASS, "Haemorrhage class", &["i", "ii", "iii", "iv"]))
                    .prompt(numeric(
                        FLUID_GIVEN_ML_PER_KG,
                        "Fluid given so far",
                        "mL/kg",
                        0.0,
                        200.0,
                    ))
                    .critical(&["cardiac-arrest", "poor-perfusion"])
                    .interventions(&["two large-bore IV/IO", "blood products", "pelvic binder"]),
                AssessmentStep::new("uterine_assessment", AbcdeSystem::Circulation, "Uterine assessment")
                    .applies_when(Applicability::patient_types(&[PatientType::Pregnant]))
                    .prompt(flag(FUNDAL_HEIGHT_ABOVE_UMBILICUS, "Fundus at or above umbilicus"))
                    .interventions(&["left uterine displacement"]),
                AssessmentStep::new("disability", AbcdeSystem::Disability, "Disability")
                    .prompt(whole(GCS_EYE, "GCS eye", 1.0, 4.0))
                    .prompt(whole(GCS_VERBAL, "GCS verbal", 1.0, 5.0))
                    .prompt(whole(GCS_MOTOR, "GCS motor", 1.0, 6.0))
                    .prompt(choice(
                        PUPILS,
                        "Pupils",
                        &["equal_reactive", "unequal", "fixed_dilated", "pinpoint"],
                    ))
                    .prompt(numeric(GLUCOSE_MMOL_L, "Blood glucose", "mmol/L", 0.0, 50.0))
                    .critical(&["active-seizure"]),
                AssessmentStep::new("exposure", AbcdeSystem::Exposure, "Exposure")
                    .prompt(numeric(TEMPERATURE, "Temperature", "°C", 25.0, 45.0))
                    .prompt(flag(BURNS, "Burns present"))
                    .interventions(&["log roll", "prevent heat loss"]),
                AssessmentStep::new("burns", AbcdeSystem::Exposure, "Burns")
                    .applies_when(Applicability::flag(BURNS))
                    .prompt(numeric(BURN_TBSA, "Burned area", "% TBSA", 0.0, 100.0))
                    .interventions(&["cool the burn", "cling film dressing"]),
            ]
        });
        &STEPS
    }
}
