//! Weight-based drug formulary.
//!
//! Each entry carries its per-kg dose, an absolute maximum, a unit and a
//! route. Doses are `per_kg x weight`, capped at the maximum, and rounded to
//! the unit's display precision.

use resus_core::error::DomainError;
use resus_core::models::dose::{Dose, DoseUnit, Route};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::check_weight;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Drug {
    AdrenalineArrest,
    AdrenalineAnaphylaxis,
    AdrenalineNebulised,
    NeonatalAdrenaline,
    Amiodarone,
    AdenosineFirst,
    AdenosineSecond,
    Atropine,
    Lorazepam,
    MidazolamBuccal,
    Levetiracetam,
    Phenobarbital,
    Dextrose10,
    CrystalloidBolus,
    NeonatalVolume,
    PackedRedCells,
    Hydrocortisone,
    Dexamethasone,
    Ceftriaxone,
    Naloxone,
    Paracetamol,
    HypertonicSaline,
    Defibrillation,
    TranexamicAcidLoading,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrugSpec {
    pub name: &'static str,
    pub per_kg: f64,
    pub max: f64,
    pub unit: DoseUnit,
    pub route: Route,
}

impl DrugSpec {
    /// Same drug at a different per-kg dose (e.g. a configured bolus volume).
    pub fn with_per_kg(mut self, per_kg: f64) -> Self {
        self.per_kg = per_kg;
        self
    }
}

const fn spec(name: &'static str, per_kg: f64, max: f64, unit: DoseUnit, route: Route) -> DrugSpec {
    DrugSpec {
        name,
        per_kg,
        max,
        unit,
        route,
    }
}

impl Drug {
    pub const ALL: [Drug; 24] = [
        Self::AdrenalineArrest,
        Self::AdrenalineAnaphylaxis,
        Self::AdrenalineNebulised,
        Self::NeonatalAdrenaline,
        Self::Amiodarone,
        Self::AdenosineFirst,
        Self::AdenosineSecond,
        Self::Atropine,
        Self::Lorazepam,
        Self::MidazolamBuccal,
        Self::Levetiracetam,
        Self::Phenobarbital,
        Self::Dextrose10,
        Self::CrystalloidBolus,
        Self::NeonatalVolume,
        Self::PackedRedCells,
        Self::Hydrocortisone,
        Self::Dexamethasone,
        Self::Ceftriaxone,
        Self::Naloxone,
        Self::Paracetamol,
        Self::HypertonicSaline,
        Self::Defibrillation,
        Self::TranexamicAcidLoading,
    ];

    pub fn spec(&self) -> DrugSpec {
        use DoseUnit::*;
        match self {
            // 1:10,000 IV/IO
            Self::AdrenalineArrest => spec("adrenaline", 10.0, 1000.0, Mcg, Route::IvIo),
            // 1:1000 IM, anterolateral thigh
            Self::AdrenalineAnaphylaxis => spec("adrenaline", 10.0, 500.0, Mcg, Route::Im),
            // 1:1000 undiluted
            Self::AdrenalineNebulised => spec("adrenaline 1:1000", 0.5, 5.0, Ml, Route::Nebulised),
            Self::NeonatalAdrenaline => spec("adrenaline", 20.0, 100.0, Mcg, Route::Iv),
            Self::Amiodarone => spec("amiodarone", 5.0, 300.0, Mg, Route::IvIo),
            Self::AdenosineFirst => spec("adenosine", 0.1, 6.0, Mg, Route::Iv),
            Self::AdenosineSecond => spec("adenosine", 0.2, 12.0, Mg, Route::Iv),
            Self::Atropine => spec("atropine", 20.0, 500.0, Mcg, Route::IvIo),
            Self::Lorazepam => spec("lorazepam", 0.1, 4.0, Mg, Route::IvIo),
            Self::MidazolamBuccal => spec("midazolam", 0.3, 10.0, Mg, Route::Buccal),
            Self::Levetiracetam => spec("levetiracetam", 40.0, 3000.0, Mg, Route::IvIo),
            Self::Phenobarbital => spec("phenobarbital", 20.0, 1000.0, Mg, Route::IvIo),
            Self::Dextrose10 => spec("dextrose 10%", 2.0, 250.0, Ml, Route::IvIo),
            Self::CrystalloidBolus => spec("0.9% sodium chloride", 20.0, 1000.0, Ml, Route::IvIo),
            Self::NeonatalVolume => spec("0.9% sodium chloride", 10.0, 100.0, Ml, Route::Iv),
            Self::PackedRedCells => spec("packed red cells", 10.0, 350.0, Ml, Route::IvIo),
            Self::Hydrocortisone => spec("hydrocortisone", 4.0, 100.0, Mg, Route::IvIo),
            Self::Dexamethasone => spec("dexamethasone", 0.15, 10.0, Mg, Route::Oral),
            Self::Ceftriaxone => spec("ceftriaxone", 80.0, 4000.0, Mg, Route::IvIo),
            Self::Naloxone => spec("naloxone", 100.0, 2000.0, Mcg, Route::IvIo),
            Self::Paracetamol => spec("paracetamol", 15.0, 1000.0, Mg, Route::Oral),
            Self::HypertonicSaline => spec("3% sodium chloride", 3.0, 250.0, Ml, Route::IvIo),
            Self::Defibrillation => spec("defibrillation", 4.0, 200.0, Joules, Route::Transthoracic),
            Self::TranexamicAcidLoading => {
                spec("tranexamic acid", 15.0, 1000.0, Mg, Route::Iv)
            }
        }
    }
}

/// Compute the dose of a formulary drug for a patient weight.
pub fn compute_dose(drug: Drug, weight_kg: f64) -> Result<Dose, DomainError> {
    dose_for(&drug.spec(), weight_kg)
}

/// Compute a dose from an explicit spec.
pub fn dose_for(spec: &DrugSpec, weight_kg: f64) -> Result<Dose, DomainError> {
    let weight_kg = check_weight(weight_kg)?;
    let raw = spec.per_kg * weight_kg;
    let capped = raw > spec.max;
    if capped {
        tracing::debug!(drug = spec.name, raw, max = spec.max, "dose capped at maximum");
    }
    let (value, display) = round_for_display(raw.min(spec.max), spec.unit);
    let unit = spec.unit.symbol();

    let mut expression = format!(
        "{} {unit}/kg x {} kg = {display} (max {} {unit})",
        trim(spec.per_kg),
        trim(weight_kg),
        trim(spec.max),
    );
    if capped {
        expression.push_str(", capped");
    }

    Ok(Dose {
        drug: spec.name.to_string(),
        per_kg: spec.per_kg,
        weight_kg,
        value,
        unit: spec.unit,
        route: spec.route,
        max: spec.max,
        capped,
        display,
        expression,
    })
}

/// Nebulised salbutamol: a fixed dose by age band, not by weight.
pub fn salbutamol_nebulised(age_months: f64, weight_kg: f64) -> Result<Dose, DomainError> {
    let weight_kg = check_weight(weight_kg)?;
    let mg = if age_months < 60.0 { 2.5 } else { 5.0 };
    let display = DoseUnit::Mg.format(mg);
    Ok(Dose {
        drug: "salbutamol".to_string(),
        per_kg: 0.0,
        weight_kg,
        value: mg,
        unit: DoseUnit::Mg,
        route: Route::Nebulised,
        max: 5.0,
        capped: false,
        expression: format!("{display} fixed dose (2.5 mg under 5 years, 5 mg from 5 years)"),
        display,
    })
}

/// Round to the unit's precision. A positive dose that would display as zero
/// gets extra decimals instead.
fn round_for_display(value: f64, unit: DoseUnit) -> (f64, String) {
    let mut decimals = unit.display_decimals();
    loop {
        let factor = 10f64.powi(decimals as i32);
        let rounded = (value * factor).round() / factor;
        if rounded > 0.0 || value <= 0.0 || decimals >= 3 {
            return (
                rounded,
                format!("{rounded:.decimals$} {}", unit.symbol()),
            );
        }
        decimals += 1;
    }
}

/// Format a number without trailing zeros.
pub(crate) fn trim(value: f64) -> String {
    let s = format!("{value:.3}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
