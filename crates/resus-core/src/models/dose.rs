use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DoseUnit {
    Mg,
    Mcg,
    Ml,
    Joules,
}

impl DoseUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Mg => "mg",
            Self::Mcg => "mcg",
            Self::Ml => "mL",
            Self::Joules => "J",
        }
    }

    /// Decimal places shown for this unit. Volumes and energies are whole
    /// numbers to match syringe graduations and defibrillator settings.
    pub fn display_decimals(&self) -> usize {
        match self {
            Self::Mg | Self::Mcg => 1,
            Self::Ml | Self::Joules => 0,
        }
    }

    /// Round a raw value the way it is displayed.
    pub fn round(&self, value: f64) -> f64 {
        let factor = 10f64.powi(self.display_decimals() as i32);
        (value * factor).round() / factor
    }

    pub fn format(&self, value: f64) -> String {
        format!("{:.*} {}", self.display_decimals(), value, self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Route {
    Iv,
    IvIo,
    Io,
    Im,
    Buccal,
    Nebulised,
    Oral,
    Transthoracic,
}

impl Route {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Iv => "IV",
            Self::IvIo => "IV/IO",
            Self::Io => "IO",
            Self::Im => "IM",
            Self::Buccal => "buccal",
            Self::Nebulised => "nebulised",
            Self::Oral => "PO",
            Self::Transthoracic => "transthoracic",
        }
    }
}

/// A computed weight-based dose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Dose {
    pub drug: String,
    pub per_kg: f64,
    pub weight_kg: f64,
    /// Rounded to display precision.
    pub value: f64,
    pub unit: DoseUnit,
    pub route: Route,
    pub max: f64,
    /// `true` when the per-kg result exceeded `max`.
    pub capped: bool,
    /// e.g. `4.0 mg`
    pub display: String,
    /// e.g. `0.1 mg/kg x 20 kg = 2.0 mg (max 4 mg)`
    pub expression: String,
}
