//! Printable dose and equipment sheet for one patient.

use std::fmt::Write as _;

use resus_calc::CalcError;
use resus_calc::drugs::{Drug, compute_dose, salbutamol_nebulised};
use resus_calc::equipment::{EquipmentSizes, equipment_for};
use resus_calc::fluids::maintenance_rate_ml_per_hr;
use resus_calc::patient::resolve_patient;
use resus_core::config::ProtocolFormulas;
use resus_core::models::dose::Dose;
use resus_core::models::patient::{PatientContext, PatientContextInput};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoseSheet {
    pub patient: PatientContext,
    pub equipment: EquipmentSizes,
    pub maintenance_ml_per_hr: f64,
    pub doses: Vec<Dose>,
}

pub fn dose_sheet(input: &PatientContextInput, formulas: ProtocolFormulas) -> Result<DoseSheet, CalcError> {
    let patient = resolve_patient(input, formulas.weight)?;
    let weight = patient.weight_kg;

    let mut doses = Drug::ALL
        .into_iter()
        .map(|drug| compute_dose(drug, weight))
        .collect::<Result<Vec<_>, _>>()?;
    doses.push(salbutamol_nebulised(patient.age_months, weight)?);

    Ok(DoseSheet {
        patient,
        equipment: equipment_for(&patient, formulas.suction)?,
        maintenance_ml_per_hr: maintenance_rate_ml_per_hr(weight)?,
        doses,
    })
}

impl DoseSheet {
    /// Plain-text rendering, one drug per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let p = &self.patient;
        let _ = writeln!(
            out,
            "{} {:.0} months, {} kg ({:?})",
            p.patient_type.as_str(),
            p.age_months,
            p.weight_kg,
            p.weight_source,
        );
        let e = &self.equipment;
        let _ = writeln!(
            out,
            "ETT {} mm uncuffed{}, {:.1} cm at the lips; suction {} Fr",
            e.ett_uncuffed_mm,
            e.ett_cuffed_mm
                .map(|c| format!(" / {c} mm cuffed"))
                .unwrap_or_default(),
            e.ett_depth_cm,
            e.suction_fr,
        );
        let _ = writeln!(out, "maintenance fluid {:.0} mL/h", self.maintenance_ml_per_hr);
        out.push('\n');
        for dose in &self.doses {
            let _ = writeln!(
                out,
                "{:<24} {:>10}  {:<14} {}",
                dose.drug,
                dose.display,
                dose.route.label(),
                dose.expression
            );
        }
        out
    }
}
