use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PatientType {
    Neonate,
    Infant,
    Child,
    Adolescent,
    Adult,
    Pregnant,
}

impl PatientType {
    /// Pediatric flows restrict age to 0–18 years and may estimate weight.
    pub fn is_pediatric(&self) -> bool {
        matches!(
            self,
            Self::Neonate | Self::Infant | Self::Child | Self::Adolescent
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Neonate => "neonate",
            Self::Infant => "infant",
            Self::Child => "child",
            Self::Adolescent => "adolescent",
            Self::Adult => "adult",
            Self::Pregnant => "pregnant",
        }
    }
}

/// Where the working weight came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum WeightSource {
    Measured,
    AgeFormula,
    GestationalTable,
}

/// Raw demographics as entered by the operator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientContextInput {
    #[serde(default)]
    pub age_years: Option<f64>,
    #[serde(default)]
    pub age_months: Option<f64>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub patient_type: Option<PatientType>,
    #[serde(default)]
    pub gestational_age_weeks: Option<u32>,
}

/// Canonical patient demographics for a session.
///
/// Set once per session; replaced only by an explicit correction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientContext {
    pub age_months: f64,
    pub weight_kg: f64,
    pub patient_type: PatientType,
    pub weight_source: WeightSource,
    pub gestational_age_weeks: Option<u32>,
}

impl PatientContext {
    pub fn age_years(&self) -> f64 {
        self.age_months / 12.0
    }

    /// Completed years of age.
    pub fn whole_years(&self) -> u32 {
        (self.age_months / 12.0).floor() as u32
    }

    pub fn is_pediatric(&self) -> bool {
        self.patient_type.is_pediatric()
    }
}
