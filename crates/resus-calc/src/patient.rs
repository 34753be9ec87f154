//! PatientContext resolution: canonical age, weight and patient type from raw
//! demographics.

use resus_core::config::WeightFormula;
use resus_core::error::{DomainError, ValidationError};
use resus_core::models::patient::{PatientContext, PatientContextInput, PatientType, WeightSource};

use crate::CalcError;

/// Oldest age, in years, a pediatric flow accepts.
pub const PEDIATRIC_MAX_YEARS: f64 = 18.0;
pub const MAX_AGE_YEARS: f64 = 120.0;

/// Expected birth weight by gestational age, keyed by inclusive lower bound in
/// completed weeks.
const GESTATIONAL_WEIGHTS: [(u32, f64); 11] = [
    (22, 0.5),
    (24, 0.65),
    (26, 0.85),
    (28, 1.1),
    (30, 1.4),
    (32, 1.7),
    (34, 2.1),
    (36, 2.6),
    (38, 3.0),
    (40, 3.4),
    (42, 3.6),
];
const GESTATIONAL_MAX_WEEKS: u32 = 44;

/// Resolve raw demographics into a canonical [`PatientContext`].
pub fn resolve_patient(
    input: &PatientContextInput,
    formula: WeightFormula,
) -> Result<PatientContext, CalcError> {
    let age_months = canonical_age_months(input)?;

    let patient_type = match (input.patient_type, age_months) {
        (Some(t), _) => t,
        (None, Some(months)) => patient_type_for_age(months),
        (None, None) => {
            return Err(ValidationError::new(
                "age_years",
                "an age or a patient type is required",
            )
            .into());
        }
    };

    let age_months = match (age_months, patient_type) {
        (Some(months), _) => months,
        // A newborn with no recorded age is at birth.
        (None, PatientType::Neonate) => 0.0,
        (None, _) => {
            return Err(ValidationError::new(
                "age_years",
                format!("age is required for a {} patient", patient_type.as_str()),
            )
            .into());
        }
    };

    let max_years = if patient_type.is_pediatric() {
        PEDIATRIC_MAX_YEARS
    } else {
        MAX_AGE_YEARS
    };
    if age_months / 12.0 > max_years {
        return Err(ValidationError::new(
            "age_years",
            format!(
                "age must not exceed {max_years} years for a {} patient",
                patient_type.as_str()
            ),
        )
        .with_value(age_months / 12.0)
        .into());
    }

    let (weight_kg, weight_source) = match input.weight_kg {
        Some(kg) => (kg, WeightSource::Measured),
        None => estimate_weight(patient_type, age_months, input.gestational_age_weeks, formula)?,
    };

    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(ValidationError::new("weight_kg", "weight must be greater than 0 kg")
            .with_value(weight_kg)
            .into());
    }

    Ok(PatientContext {
        age_months,
        weight_kg,
        patient_type,
        weight_source,
        gestational_age_weeks: input.gestational_age_weeks,
    })
}

fn canonical_age_months(input: &PatientContextInput) -> Result<Option<f64>, ValidationError> {
    for (field, value) in [("age_years", input.age_years), ("age_months", input.age_months)] {
        if let Some(v) = value
            && (!v.is_finite() || v < 0.0)
        {
            return Err(ValidationError::new(field, format!("{field} must be 0 or greater"))
                .with_value(v));
        }
    }

    Ok(match (input.age_years, input.age_months) {
        (None, None) => None,
        (years, months) => Some(years.unwrap_or(0.0) * 12.0 + months.unwrap_or(0.0)),
    })
}

/// Patient type implied by age alone. Pregnancy is never inferred.
pub fn patient_type_for_age(age_months: f64) -> PatientType {
    match age_months {
        m if m < 1.0 => PatientType::Neonate,
        m if m < 12.0 => PatientType::Infant,
        m if m < 144.0 => PatientType::Child,
        m if m < 216.0 => PatientType::Adolescent,
        _ => PatientType::Adult,
    }
}

fn estimate_weight(
    patient_type: PatientType,
    age_months: f64,
    gestational_age_weeks: Option<u32>,
    formula: WeightFormula,
) -> Result<(f64, WeightSource), CalcError> {
    match patient_type {
        PatientType::Neonate => {
            let weeks = gestational_age_weeks.ok_or_else(|| {
                ValidationError::new(
                    "gestational_age_weeks",
                    "a weight or gestational age is required for a neonate",
                )
            })?;
            Ok((gestational_weight(weeks)?, WeightSource::GestationalTable))
        }
        PatientType::Adult | PatientType::Pregnant => Err(ValidationError::new(
            "weight_kg",
            format!("weight is required for a {} patient", patient_type.as_str()),
        )
        .into()),
        _ => Ok((estimate_weight_kg(age_months, formula), WeightSource::AgeFormula)),
    }
}

/// Age-based weight estimate for a non-neonatal pediatric patient.
///
/// Uses completed months below one year and completed years above, so the
/// estimate never decreases as age increases.
pub fn estimate_weight_kg(age_months: f64, formula: WeightFormula) -> f64 {
    let months = age_months.max(0.0).floor();
    let years = (months / 12.0).floor();
    match formula {
        WeightFormula::Standard => match months {
            m if m < 12.0 => (m + 9.0) / 2.0,
            _ if years <= 5.0 => (years + 4.0) * 2.0,
            _ => years * 4.0,
        },
        WeightFormula::Apls2011 => match months {
            m if m < 12.0 => m / 2.0 + 4.0,
            _ if years <= 5.0 => 2.0 * years + 8.0,
            _ => 3.0 * years + 7.0,
        },
    }
}

/// Expected weight for a newborn of the given gestation.
pub fn gestational_weight(weeks: u32) -> Result<f64, DomainError> {
    if weeks > GESTATIONAL_MAX_WEEKS {
        return Err(DomainError::OutOfTable {
            table: "gestational weight",
            value: weeks as f64,
        });
    }
    GESTATIONAL_WEIGHTS
        .iter()
        .rev()
        .find(|(lower, _)| weeks >= *lower)
        .map(|(_, kg)| *kg)
        .ok_or(DomainError::NoReference {
            table: "gestational weight",
            key: format!("{weeks} weeks"),
        })
}
