//! Airway equipment sizing.

use resus_core::config::SuctionFormula;
use resus_core::error::DomainError;
use resus_core::models::patient::{PatientContext, PatientType};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::check_weight;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EquipmentSizes {
    /// Internal diameter, mm.
    pub ett_uncuffed_mm: f64,
    pub ett_cuffed_mm: Option<f64>,
    /// Insertion depth at the lips, cm.
    pub ett_depth_cm: f64,
    /// French gauge.
    pub suction_fr: f64,
}

/// Uncuffed tracheal tube size for a child of one year or older:
/// `age / 4 + 4`, rounded down to the nearest half millimetre.
pub fn ett_uncuffed_mm(age_years: f64) -> f64 {
    round_down_half(age_years / 4.0 + 4.0)
}

/// Cuffed tube: `age / 4 + 3.5`.
pub fn ett_cuffed_mm(age_years: f64) -> f64 {
    round_down_half(age_years / 4.0 + 3.5)
}

/// Oral tube depth: `age / 2 + 12` cm.
pub fn ett_depth_cm(age_years: f64) -> f64 {
    age_years / 2.0 + 12.0
}

/// Newborn tube size by birth weight.
pub fn neonatal_ett_mm(weight_kg: f64) -> Result<f64, DomainError> {
    let kg = check_weight(weight_kg)?;
    Ok(match kg {
        w if w < 1.0 => 2.5,
        w if w < 2.0 => 3.0,
        _ => 3.5,
    })
}

/// Newborn oral tube depth: `weight + 6` cm.
pub fn neonatal_ett_depth_cm(weight_kg: f64) -> Result<f64, DomainError> {
    Ok(check_weight(weight_kg)? + 6.0)
}

pub fn suction_catheter_fr(ett_mm: f64, formula: SuctionFormula) -> f64 {
    let fr = ett_mm * 2.0;
    match formula {
        SuctionFormula::DoubleTube => fr,
        SuctionFormula::EvenFrench => (fr / 2.0).floor() * 2.0,
    }
}

/// Size the airway kit for a resolved patient.
///
/// Newborns are sized by weight; older children use the age formulas.
/// Infants under 12 months override the formula with a fixed 3.5 mm uncuffed
/// (3.0 mm cuffed) tube at 10.5 cm, where `age / 4 + 4` would give 4.0 mm.
pub fn equipment_for(
    patient: &PatientContext,
    suction: SuctionFormula,
) -> Result<EquipmentSizes, DomainError> {
    let years = patient.whole_years() as f64;
    let sizes = match patient.patient_type {
        PatientType::Neonate => {
            let ett = neonatal_ett_mm(patient.weight_kg)?;
            EquipmentSizes {
                ett_uncuffed_mm: ett,
                ett_cuffed_mm: None,
                ett_depth_cm: neonatal_ett_depth_cm(patient.weight_kg)?,
                suction_fr: suction_catheter_fr(ett, suction),
            }
        }
        _ if patient.age_months < 12.0 => EquipmentSizes {
            ett_uncuffed_mm: 3.5,
            ett_cuffed_mm: Some(3.0),
            // 3 x tube size
            ett_depth_cm: 10.5,
            suction_fr: suction_catheter_fr(3.5, suction),
        },
        _ => {
            let ett = ett_uncuffed_mm(years);
            EquipmentSizes {
                ett_uncuffed_mm: ett,
                ett_cuffed_mm: Some(ett_cuffed_mm(years)),
                ett_depth_cm: ett_depth_cm(years),
                suction_fr: suction_catheter_fr(ett, suction),
            }
        }
    };
    Ok(sizes)
}

fn round_down_half(mm: f64) -> f64 {
    (mm * 2.0).floor() / 2.0
}
