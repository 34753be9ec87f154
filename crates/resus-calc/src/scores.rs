//! Coma scale and hemorrhage classification.

use resus_core::error::ValidationError;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum GcsInterpretation {
    Severe,
    Moderate,
    Mild,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GcsResult {
    pub eye: u8,
    pub verbal: u8,
    pub motor: u8,
    pub total: u8,
    pub airway_intervention_needed: bool,
    pub interpretation: GcsInterpretation,
}

/// Glasgow Coma Scale from its three components.
pub fn glasgow_coma_scale(eye: u8, verbal: u8, motor: u8) -> Result<GcsResult, ValidationError> {
    for (field, value, max) in [("gcs_eye", eye, 4), ("gcs_verbal", verbal, 5), ("gcs_motor", motor, 6)] {
        if !(1..=max).contains(&value) {
            return Err(ValidationError::new(field, format!("{field} must be between 1 and {max}"))
                .with_value(value));
        }
    }
    let total = eye + verbal + motor;
    let interpretation = match total {
        0..=8 => GcsInterpretation::Severe,
        9..=12 => GcsInterpretation::Moderate,
        _ => GcsInterpretation::Mild,
    };
    Ok(GcsResult {
        eye,
        verbal,
        motor,
        total,
        airway_intervention_needed: total <= 8,
        interpretation,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum HemorrhageClass {
    I,
    II,
    III,
    IV,
}

impl HemorrhageClass {
    pub fn from_number(n: u8) -> Result<Self, ValidationError> {
        match n {
            1 => Ok(Self::I),
            2 => Ok(Self::II),
            3 => Ok(Self::III),
            4 => Ok(Self::IV),
            _ => Err(ValidationError::new("hemorrhage_class", "hemorrhage class must be 1 to 4")
                .with_value(n)),
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            Self::I => 1,
            Self::II => 2,
            Self::III => 3,
            Self::IV => 4,
        }
    }
}

/// Expected presentation and fluid guidance for one hemorrhage class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HemorrhageProfile {
    pub class: HemorrhageClass,
    pub blood_loss_pct: &'static str,
    pub heart_rate: &'static str,
    pub systolic_bp: &'static str,
    pub pulse_pressure: &'static str,
    pub respiratory_rate: &'static str,
    pub mental_status: &'static str,
    pub fluid_guidance: &'static str,
}

const HEMORRHAGE_TABLE: [HemorrhageProfile; 4] = [
    HemorrhageProfile {
        class: HemorrhageClass::I,
        blood_loss_pct: "<15%",
        heart_rate: "normal",
        systolic_bp: "normal",
        pulse_pressure: "normal",
        respiratory_rate: "normal",
        mental_status: "slightly anxious",
        fluid_guidance: "monitor; fluids usually not required",
    },
    HemorrhageProfile {
        class: HemorrhageClass::II,
        blood_loss_pct: "15-30%",
        heart_rate: "mildly raised",
        systolic_bp: "normal",
        pulse_pressure: "decreased",
        respiratory_rate: "mildly raised",
        mental_status: "mildly anxious",
        fluid_guidance: "crystalloid; consider blood products",
    },
    HemorrhageProfile {
        class: HemorrhageClass::III,
        blood_loss_pct: "31-40%",
        heart_rate: "raised",
        systolic_bp: "decreased",
        pulse_pressure: "decreased",
        respiratory_rate: "raised",
        mental_status: "anxious, confused",
        fluid_guidance: "blood products",
    },
    HemorrhageProfile {
        class: HemorrhageClass::IV,
        blood_loss_pct: ">40%",
        heart_rate: "markedly raised",
        systolic_bp: "markedly decreased",
        pulse_pressure: "decreased",
        respiratory_rate: "markedly raised",
        mental_status: "confused, lethargic",
        fluid_guidance: "massive transfusion protocol",
    },
];

/// Look up the provider-selected class. Classification is a clinical
/// judgement recorded by the operator; it is never derived from vitals here.
pub fn hemorrhage_profile(class: HemorrhageClass) -> &'static HemorrhageProfile {
    &HEMORRHAGE_TABLE[class.number() as usize - 1]
}
