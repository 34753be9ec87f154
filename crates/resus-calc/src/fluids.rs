//! Fluid regimens: burns, maintenance, antifibrinolytic and infusions.

use resus_core::error::{DomainError, ValidationError};
use resus_core::models::dose::Dose;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::drugs::{Drug, compute_dose};
use crate::{CalcError, check_weight};

/// Parkland burn resuscitation over 24 hours from the time of injury.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ParklandPlan {
    pub total_24h_ml: f64,
    pub first_8h_ml: f64,
    pub first_8h_rate_ml_per_hr: f64,
    pub next_16h_ml: f64,
    pub next_16h_rate_ml_per_hr: f64,
}

/// `4 mL x kg x %TBSA`; half in the first 8 hours, half over the next 16.
pub fn parkland(weight_kg: f64, tbsa_pct: f64) -> Result<ParklandPlan, CalcError> {
    let weight_kg = check_weight(weight_kg)?;
    if !tbsa_pct.is_finite() || tbsa_pct <= 0.0 || tbsa_pct > 100.0 {
        return Err(ValidationError::new("burn_tbsa_pct", "TBSA must be between 0 and 100%")
            .with_value(tbsa_pct)
            .into());
    }
    let total = (4.0 * weight_kg * tbsa_pct).round();
    let half = total / 2.0;
    Ok(ParklandPlan {
        total_24h_ml: total,
        first_8h_ml: half,
        first_8h_rate_ml_per_hr: (half / 8.0).round(),
        next_16h_ml: half,
        next_16h_rate_ml_per_hr: (half / 16.0).round(),
    })
}

/// Holliday-Segar maintenance rate: 4 mL/kg/h for the first 10 kg, 2 for the
/// next 10, 1 for each kg above 20.
pub fn maintenance_rate_ml_per_hr(weight_kg: f64) -> Result<f64, DomainError> {
    let kg = check_weight(weight_kg)?;
    let first = kg.min(10.0) * 4.0;
    let second = (kg - 10.0).clamp(0.0, 10.0) * 2.0;
    let rest = (kg - 20.0).max(0.0);
    Ok((first + second + rest).round())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TxaPlan {
    pub loading: Dose,
    pub loading_minutes: u32,
    pub maintenance_mg_per_hr: f64,
    pub maintenance_hours: u32,
}

pub const TXA_MAINTENANCE_MG_PER_KG_HR: f64 = 2.0;

/// Tranexamic acid: 15 mg/kg (max 1 g) over 10 minutes, then 2 mg/kg/h for
/// 8 hours.
pub fn txa(weight_kg: f64) -> Result<TxaPlan, DomainError> {
    let loading = compute_dose(Drug::TranexamicAcidLoading, weight_kg)?;
    let maintenance = (TXA_MAINTENANCE_MG_PER_KG_HR * loading.weight_kg * 10.0).round() / 10.0;
    Ok(TxaPlan {
        loading,
        loading_minutes: 10,
        maintenance_mg_per_hr: maintenance,
        maintenance_hours: 8,
    })
}

/// Infusion rate in mcg/min for a mcg/kg/min prescription.
pub fn infusion_mcg_per_min(mcg_per_kg_min: f64, weight_kg: f64) -> Result<f64, DomainError> {
    let kg = check_weight(weight_kg)?;
    Ok((mcg_per_kg_min * kg * 100.0).round() / 100.0)
}
