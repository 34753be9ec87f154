//! Observation field names shared by protocols, the evaluator and the UI.
//!
//! A field name is unique within a protocol, so the evaluator can look a value
//! up by field alone regardless of which step collected it.

/// Provider-selected critical findings, present on every step.
pub const CRITICAL_FINDINGS: &str = "critical_findings";

// General impression
pub const TRAUMA: &str = "trauma";
pub const APPEARANCE: &str = "appearance";

// Airway
pub const AIRWAY_PATENCY: &str = "airway_patency";
pub const AIRWAY_SOUNDS: &str = "airway_sounds";
pub const CSPINE_CONCERN: &str = "cspine_concern";
pub const FACIAL_SWELLING: &str = "facial_swelling";

// Breathing
pub const BREATHING_EFFORT: &str = "breathing_effort";
pub const RESPIRATORY_RATE: &str = "respiratory_rate";
pub const SPO2: &str = "spo2";
pub const BREATH_SOUNDS: &str = "breath_sounds";
pub const TRACHEAL_DEVIATION: &str = "tracheal_deviation";

// Circulation
pub const PULSE: &str = "pulse";
pub const HEART_RATE: &str = "heart_rate";
pub const RHYTHM: &str = "rhythm";
pub const SYSTOLIC_BP: &str = "systolic_bp";
pub const CAPILLARY_REFILL: &str = "capillary_refill_s";
pub const SKIN_TEMPERATURE: &str = "skin_temperature";
pub const JVP: &str = "jvp";
pub const FLUID_GIVEN_ML_PER_KG: &str = "fluid_given_ml_per_kg";
pub const CATASTROPHIC_HEMORRHAGE: &str = "catastrophic_hemorrhage";
pub const HEMORRHAGE_CLASS: &str = "hemorrhage_class";
pub const FUNDAL_HEIGHT_ABOVE_UMBILICUS: &str = "fundal_height_above_umbilicus";

// Disability
pub const AVPU: &str = "avpu";
pub const GCS_EYE: &str = "gcs_eye";
pub const GCS_VERBAL: &str = "gcs_verbal";
pub const GCS_MOTOR: &str = "gcs_motor";
pub const PUPILS: &str = "pupils";
pub const SEIZURE: &str = "seizure";
pub const GLUCOSE_MMOL_L: &str = "glucose_mmol_l";
pub const GLUCOSE_MG_DL: &str = "glucose_mg_dl";
pub const TOXIN_EXPOSURE: &str = "toxin_exposure";

// Exposure
pub const TEMPERATURE: &str = "temperature_c";
pub const RASH: &str = "rash";
pub const ANAPHYLAXIS_SIGNS: &str = "anaphylaxis_signs";
pub const BURNS: &str = "burns";
pub const BURN_TBSA: &str = "burn_tbsa_pct";

// Neonatal
pub const TERM_GESTATION: &str = "term_gestation";
pub const NEONATAL_TONE: &str = "neonatal_tone";
pub const NEONATAL_BREATHING: &str = "neonatal_breathing";
pub const NEONATAL_HEART_RATE: &str = "neonatal_heart_rate";
pub const NEONATAL_SPO2: &str = "neonatal_spo2";
pub const VENTILATION_EFFECTIVE: &str = "ventilation_effective";
pub const NEONATAL_HEART_RATE_AFTER_PPV: &str = "neonatal_heart_rate_after_ppv";
pub const NEONATAL_HEART_RATE_AFTER_COMPRESSIONS: &str = "neonatal_heart_rate_after_compressions";
pub const VASCULAR_ACCESS: &str = "vascular_access";
