//! Engine configuration.
//!
//! Resolved once by the host (the CLI loads it from disk) and passed into the
//! engine. Every field has a default so partial config files stay valid.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::models::protocol::ProtocolId;

/// Current config version. Bump this when adding fields or changing shape.
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Age-based weight estimate used when no weight is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum WeightFormula {
    /// `<12 m: (months+9)/2`, `1-5 y: (years+4)x2`, `>5 y: years x 4`.
    Standard,
    /// `<12 m: months/2+4`, `1-5 y: 2 x years+8`, `>5 y: 3 x years+7`.
    Apls2011,
}

/// Suction catheter size (French) from the tracheal tube size (mm).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SuctionFormula {
    /// `2 x ETT`.
    DoubleTube,
    /// `2 x ETT` rounded down to the nearest stocked even French gauge.
    EvenFrench,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProtocolFormulas {
    pub weight: WeightFormula,
    pub suction: SuctionFormula,
}

impl ProtocolFormulas {
    pub const STANDARD: Self = Self {
        weight: WeightFormula::Standard,
        suction: SuctionFormula::DoubleTube,
    };
}

/// One formula pair per protocol variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FormulaSelection {
    pub primary_survey: ProtocolFormulas,
    pub step_by_step_survey: ProtocolFormulas,
    pub neonatal_resuscitation: ProtocolFormulas,
    pub trauma_primary_survey: ProtocolFormulas,
}

impl Default for FormulaSelection {
    fn default() -> Self {
        Self {
            primary_survey: ProtocolFormulas::STANDARD,
            step_by_step_survey: ProtocolFormulas {
                weight: WeightFormula::Apls2011,
                suction: SuctionFormula::EvenFrench,
            },
            neonatal_resuscitation: ProtocolFormulas::STANDARD,
            trauma_primary_survey: ProtocolFormulas::STANDARD,
        }
    }
}

impl FormulaSelection {
    pub fn for_protocol(&self, protocol: ProtocolId) -> ProtocolFormulas {
        match protocol {
            ProtocolId::PrimarySurvey => self.primary_survey,
            ProtocolId::StepByStepSurvey => self.step_by_step_survey,
            ProtocolId::NeonatalResuscitation => self.neonatal_resuscitation,
            ProtocolId::TraumaPrimarySurvey => self.trauma_primary_survey,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct EngineConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    pub config_version: u32,
    /// Reject impossible transitions with an error instead of ignoring them.
    pub strict_transitions: bool,
    pub formulas: FormulaSelection,
    /// Pediatric crystalloid bolus volume.
    pub fluid_bolus_ml_per_kg: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_CONFIG_VERSION,
            strict_transitions: cfg!(debug_assertions),
            formulas: FormulaSelection::default(),
            fluid_bolus_ml_per_kg: 20.0,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(5.0..=20.0).contains(&self.fluid_bolus_ml_per_kg) {
            return Err(ValidationError::new(
                "fluid_bolus_ml_per_kg",
                "fluid bolus must be between 5 and 20 mL/kg",
            )
            .with_value(self.fluid_bolus_ml_per_kg));
        }
        if self.config_version > CURRENT_CONFIG_VERSION {
            return Err(ValidationError::new(
                "config_version",
                format!("config version is newer than this build supports ({CURRENT_CONFIG_VERSION})"),
            )
            .with_value(self.config_version));
        }
        Ok(())
    }
}
