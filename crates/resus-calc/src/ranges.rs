//! Age-banded normal ranges and time-bucketed targets.

use resus_core::error::DomainError;
use resus_core::models::patient::{PatientContext, PatientType};
use resus_core::models::view::ValueRange;

/// Normal vital-sign ranges for one age band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VitalBand {
    /// Inclusive lower bound of the band, in months.
    pub from_months: f64,
    pub label: &'static str,
    pub heart_rate: ValueRange,
    pub respiratory_rate: ValueRange,
    pub systolic_bp: ValueRange,
}

const fn band(
    from_months: f64,
    label: &'static str,
    hr: (f64, f64),
    rr: (f64, f64),
    sbp: (f64, f64),
) -> VitalBand {
    VitalBand {
        from_months,
        label,
        heart_rate: ValueRange::new(hr.0, hr.1),
        respiratory_rate: ValueRange::new(rr.0, rr.1),
        systolic_bp: ValueRange::new(sbp.0, sbp.1),
    }
}

/// Bands ordered by lower bound. A patient whose age equals a boundary
/// belongs to the band starting there.
pub const VITAL_BANDS: [VitalBand; 7] = [
    band(0.0, "newborn", (100.0, 180.0), (30.0, 60.0), (60.0, 90.0)),
    band(1.0, "infant", (100.0, 160.0), (30.0, 53.0), (70.0, 100.0)),
    band(12.0, "toddler", (90.0, 150.0), (22.0, 37.0), (86.0, 106.0)),
    band(36.0, "preschool", (80.0, 140.0), (20.0, 28.0), (89.0, 112.0)),
    band(72.0, "school age", (70.0, 120.0), (18.0, 25.0), (97.0, 115.0)),
    band(144.0, "adolescent", (60.0, 100.0), (12.0, 20.0), (110.0, 131.0)),
    band(216.0, "adult", (60.0, 100.0), (12.0, 20.0), (90.0, 140.0)),
];

/// Ages at or beyond this have no reference band.
pub const VITAL_BANDS_END_MONTHS: f64 = 1440.0;

pub fn vital_band(age_months: f64) -> Result<&'static VitalBand, DomainError> {
    if !age_months.is_finite() || !(0.0..VITAL_BANDS_END_MONTHS).contains(&age_months) {
        return Err(DomainError::NoReference {
            table: "vital signs",
            key: format!("age {age_months} months"),
        });
    }
    VITAL_BANDS
        .iter()
        .rev()
        .find(|b| age_months >= b.from_months)
        .ok_or(DomainError::NoReference {
            table: "vital signs",
            key: format!("age {age_months} months"),
        })
}

/// Systolic pressure below which a patient is hypotensive.
pub fn hypotension_threshold(age_months: f64) -> f64 {
    let years = (age_months / 12.0).floor();
    match age_months {
        m if m < 1.0 => 60.0,
        m if m < 12.0 => 70.0,
        _ if years <= 10.0 => 70.0 + 2.0 * years,
        _ => 90.0,
    }
}

/// Pre-ductal SpO2 target after birth, by completed minutes elapsed.
pub fn neonatal_spo2_target(elapsed_seconds: u64) -> ValueRange {
    match elapsed_seconds / 60 {
        0 | 1 => ValueRange::new(60.0, 65.0),
        2 => ValueRange::new(65.0, 70.0),
        3 => ValueRange::new(70.0, 75.0),
        4 => ValueRange::new(75.0, 80.0),
        5..=9 => ValueRange::new(80.0, 85.0),
        _ => ValueRange::new(85.0, 95.0),
    }
}

/// Everything the finding evaluator compares observations against.
///
/// A `None` range means no reference exists for this patient; the evaluator
/// reports that instead of guessing.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceRanges {
    pub heart_rate: Option<ValueRange>,
    pub respiratory_rate: Option<ValueRange>,
    pub systolic_bp: Option<ValueRange>,
    pub hypotension_sbp: Option<f64>,
    pub spo2_target: Option<ValueRange>,
    pub unavailable: Option<DomainError>,
}

impl ReferenceRanges {
    pub fn for_patient(patient: &PatientContext, elapsed_seconds: u64) -> Self {
        let spo2_target = (patient.patient_type == PatientType::Neonate)
            .then(|| neonatal_spo2_target(elapsed_seconds));

        match vital_band(patient.age_months) {
            Ok(band) => Self {
                heart_rate: Some(band.heart_rate),
                respiratory_rate: Some(band.respiratory_rate),
                systolic_bp: Some(band.systolic_bp),
                hypotension_sbp: Some(hypotension_threshold(patient.age_months)),
                spo2_target,
                unavailable: None,
            },
            Err(e) => Self {
                heart_rate: None,
                respiratory_rate: None,
                systolic_bp: None,
                hypotension_sbp: None,
                spo2_target,
                unavailable: Some(e),
            },
        }
    }
}
