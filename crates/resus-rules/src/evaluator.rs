//! Observations plus reference ranges in, findings out.
//!
//! `evaluate` is deterministic: the same observations, patient and ranges
//! always produce the same finding set. Findings accumulate; a single
//! observation may raise several of them.

use resus_calc::ranges::ReferenceRanges;
use resus_calc::scores::{GcsInterpretation, glasgow_coma_scale};
use resus_calc::units::glucose_mg_dl_to_mmol_l;
use resus_core::fields;
use resus_core::models::finding::FindingSet;
use resus_core::models::observation::ObservationSet;
use resus_core::models::patient::{PatientContext, PatientType};
use resus_core::models::view::ValueRange;

use crate::catalog::finding;

pub const CAPILLARY_REFILL_MAX_S: f64 = 2.0;
pub const SPO2_HYPOXEMIA: f64 = 94.0;
pub const SPO2_SEVERE_HYPOXEMIA: f64 = 90.0;
pub const HYPOTHERMIA_C: f64 = 36.0;
pub const FEVER_C: f64 = 38.0;
pub const HYPOGLYCEMIA_MMOL_L: f64 = 3.0;
pub const FLUID_REFRACTORY_ML_PER_KG: f64 = 40.0;
pub const MAJOR_BURN_PEDIATRIC_PCT: f64 = 10.0;
pub const MAJOR_BURN_ADULT_PCT: f64 = 15.0;
pub const NEONATAL_BRADYCARDIA: f64 = 100.0;
pub const NEONATAL_SEVERE_BRADYCARDIA: f64 = 60.0;
pub const TERM_WEEKS: u32 = 37;

pub fn evaluate(
    observations: &ObservationSet,
    patient: &PatientContext,
    ranges: &ReferenceRanges,
) -> FindingSet {
    let mut out = FindingSet::new();

    vitals(observations, ranges, &mut out);
    airway(observations, &mut out);
    breathing(observations, &mut out);
    circulation(observations, patient, &mut out);
    disability(observations, &mut out);
    exposure(observations, patient, &mut out);
    neonatal(observations, patient, ranges, &mut out);

    for selected in observations.critical_selections() {
        out.insert(finding(&selected, "selected by provider"));
    }

    tracing::debug!(
        count = out.len(),
        findings = ?out.ids().collect::<Vec<_>>(),
        "findings evaluated"
    );
    out
}

/// Compare a measured vital against its band, or flag that no band exists.
fn threshold(
    out: &mut FindingSet,
    observations: &ObservationSet,
    field: &str,
    prefix: &str,
    range: Option<ValueRange>,
    ranges: &ReferenceRanges,
) {
    let Some(value) = observations.numeric(field) else {
        return;
    };
    let Some(range) = range else {
        let reason = ranges
            .unavailable
            .as_ref()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no reference range".to_string());
        out.insert(finding("no-reference-available", format!("{field}: {reason}")));
        return;
    };
    if value < range.min {
        out.insert(
            finding(&format!("{prefix}-low"), format!("{field} {value} < {}", range.min))
                .with_value(value),
        );
    } else if value > range.max {
        out.insert(
            finding(&format!("{prefix}-high"), format!("{field} {value} > {}", range.max))
                .with_value(value),
        );
    }
}

fn vitals(observations: &ObservationSet, ranges: &ReferenceRanges, out: &mut FindingSet) {
    threshold(out, observations, fields::HEART_RATE, "heart-rate", ranges.heart_rate, ranges);
    threshold(
        out,
        observations,
        fields::RESPIRATORY_RATE,
        "respiratory-rate",
        ranges.respiratory_rate,
        ranges,
    );
    threshold(out, observations, fields::SYSTOLIC_BP, "systolic-bp", ranges.systolic_bp, ranges);

    if let (Some(sbp), Some(limit)) = (observations.numeric(fields::SYSTOLIC_BP), ranges.hypotension_sbp) {
        if sbp < limit {
            out.insert(
                finding("hypotension", format!("{} {sbp} < {limit}", fields::SYSTOLIC_BP))
                    .with_value(sbp),
            );
        }
    }
}

fn airway(observations: &ObservationSet, out: &mut FindingSet) {
    match observations.choice(fields::AIRWAY_PATENCY) {
        Some("obstructed") => out.insert(finding("airway-obstruction", "airway_patency obstructed")),
        Some("at_risk") => out.insert(finding("airway-at-risk", "airway_patency at_risk")),
        _ => {}
    }
    match observations.choice(fields::AIRWAY_SOUNDS) {
        Some("stridor") => out.insert(finding("stridor", "airway_sounds stridor")),
        Some(sound @ ("gurgling" | "snoring")) => {
            out.insert(finding("airway-at-risk", format!("airway_sounds {sound}")))
        }
        _ => {}
    }
    if observations.flag(fields::FACIAL_SWELLING) {
        out.insert(finding("airway-at-risk", "facial_swelling"));
    }
    if observations.flag(fields::CSPINE_CONCERN) {
        out.insert(finding("cervical-spine-risk", "cspine_concern"));
    }
}

fn breathing(observations: &ObservationSet, out: &mut FindingSet) {
    match observations.choice(fields::BREATHING_EFFORT) {
        Some("absent") => out.insert(finding("apnea", "breathing_effort absent")),
        Some(effort @ ("increased" | "decreased")) => {
            out.insert(finding("respiratory-distress", format!("breathing_effort {effort}")))
        }
        _ => {}
    }
    if observations.numeric(fields::RESPIRATORY_RATE) == Some(0.0) {
        out.insert(finding("apnea", "respiratory_rate 0"));
    }

    if let Some(spo2) = observations.numeric(fields::SPO2) {
        if spo2 < SPO2_SEVERE_HYPOXEMIA {
            out.insert(
                finding("severe-hypoxemia", format!("spo2 {spo2} < {SPO2_SEVERE_HYPOXEMIA}"))
                    .with_value(spo2),
            );
        } else if spo2 < SPO2_HYPOXEMIA {
            out.insert(finding("hypoxemia", format!("spo2 {spo2} < {SPO2_HYPOXEMIA}")).with_value(spo2));
        }
    }

    match observations.choice(fields::BREATH_SOUNDS) {
        Some("wheeze") => out.insert(finding("wheeze", "breath_sounds wheeze")),
        Some("silent") => {
            out.insert(finding("wheeze", "breath_sounds silent"));
            out.insert(finding("respiratory-distress", "breath_sounds silent"));
        }
        _ => {}
    }

    if observations.flag(fields::TRACHEAL_DEVIATION)
        && observations.choice_is(fields::BREATH_SOUNDS, "reduced")
    {
        out.insert(finding(
            "tension-pneumothorax",
            "tracheal_deviation with reduced breath_sounds",
        ));
    }
}

fn circulation(observations: &ObservationSet, patient: &PatientContext, out: &mut FindingSet) {
    if observations.choice_is(fields::PULSE, "absent") {
        if observations.choice_is(fields::AVPU, "unresponsive") {
            out.insert(finding("cardiac-arrest", "avpu unresponsive, pulse absent"));
        } else {
            out.insert(finding("cardiac-arrest", "pulse absent"));
        }
    }
    if let Some(rhythm @ ("vf_pvt" | "asystole_pea")) = observations.choice(fields::RHYTHM) {
        out.insert(finding("cardiac-arrest", format!("rhythm {rhythm}")));
    }
    if observations.choice_is(fields::RHYTHM, "svt") {
        out.insert(finding("svt", "rhythm svt"));
    }

    let mut poor_perfusion = false;
    if let Some(crt) = observations.numeric(fields::CAPILLARY_REFILL) {
        if crt > CAPILLARY_REFILL_MAX_S {
            poor_perfusion = true;
            out.insert(
                finding(
                    "poor-perfusion",
                    format!("{} {crt} > {CAPILLARY_REFILL_MAX_S}", fields::CAPILLARY_REFILL),
                )
                .with_value(crt),
            );
        }
    }
    if observations.choice_is(fields::PULSE, "weak") {
        poor_perfusion = true;
        out.insert(finding("poor-perfusion", "pulse weak"));
    }

    match observations.choice(fields::SKIN_TEMPERATURE) {
        Some(skin @ ("cool" | "mottled")) => {
            out.insert(finding("cold-peripheries", format!("skin_temperature {skin}")))
        }
        Some("warm") => out.insert(finding("warm-peripheries", "skin_temperature warm")),
        _ => {}
    }

    if let Some(given) = observations.numeric(fields::FLUID_GIVEN_ML_PER_KG) {
        if given >= FLUID_REFRACTORY_ML_PER_KG && poor_perfusion {
            out.insert(
                finding(
                    "fluid-refractory-shock",
                    format!("{given} mL/kg given with ongoing poor perfusion"),
                )
                .with_value(given),
            );
        }
    }

    if observations.choice_is(fields::JVP, "raised") {
        out.insert(finding("raised-jvp", "jvp raised"));
    }
    if patient.patient_type == PatientType::Pregnant
        && observations.flag(fields::FUNDAL_HEIGHT_ABOVE_UMBILICUS)
    {
        out.insert(finding(
            "aortocaval-compression-risk",
            "pregnant with fundus at or above umbilicus",
        ));
    }

    if observations.flag(fields::CATASTROPHIC_HEMORRHAGE) {
        out.insert(finding("catastrophic-hemorrhage", "uncontrolled external bleeding"));
    }
    let class = match observations.choice(fields::HEMORRHAGE_CLASS) {
        Some("i") => Some(1),
        Some("ii") => Some(2),
        Some("iii") => Some(3),
        Some("iv") => Some(4),
        _ => None,
    };
    if let Some(n) = class {
        out.insert(
            finding(&format!("hemorrhage-class-{n}"), format!("hemorrhage class {n} selected"))
                .with_value(f64::from(n)),
        );
    }
}

fn disability(observations: &ObservationSet, out: &mut FindingSet) {
    match observations.choice(fields::AVPU) {
        Some("voice") => out.insert(finding("altered-mental-status", "avpu voice")),
        Some(level @ ("pain" | "unresponsive")) => {
            out.insert(finding("decreased-consciousness", format!("avpu {level}")))
        }
        _ => {}
    }

    coma_scale(observations, out);

    match observations.choice(fields::PUPILS) {
        Some(pupils @ ("unequal" | "fixed_dilated")) => {
            out.insert(finding("unequal-pupils", format!("pupils {pupils}")))
        }
        Some("pinpoint") => out.insert(finding("pinpoint-pupils", "pupils pinpoint")),
        _ => {}
    }

    if observations.flag(fields::SEIZURE) {
        out.insert(finding("active-seizure", "seizure activity"));
    }

    let glucose = observations.numeric(fields::GLUCOSE_MMOL_L).map(|v| (v, "mmol/L")).or_else(|| {
        observations
            .numeric(fields::GLUCOSE_MG_DL)
            .map(|v| (glucose_mg_dl_to_mmol_l(v), "mmol/L from mg/dL"))
    });
    if let Some((mmol, source)) = glucose {
        if mmol < HYPOGLYCEMIA_MMOL_L {
            out.insert(
                finding(
                    "hypoglycemia",
                    format!("glucose {mmol:.1} {source} < {HYPOGLYCEMIA_MMOL_L}"),
                )
                .with_value(mmol),
            );
        }
    }

    match observations.choice(fields::TOXIN_EXPOSURE) {
        Some("opioid") => {
            out.insert(finding("toxin-exposure", "toxin_exposure opioid"));
            let depressed = observations.choice_is(fields::PUPILS, "pinpoint")
                || matches!(observations.choice(fields::AVPU), Some("pain" | "unresponsive"))
                || matches!(
                    observations.choice(fields::BREATHING_EFFORT),
                    Some("decreased" | "absent")
                );
            if depressed {
                out.insert(finding(
                    "opioid-toxidrome",
                    "opioid exposure with depressed consciousness, breathing or pinpoint pupils",
                ));
            }
        }
        Some(toxin @ ("sedative" | "stimulant" | "unknown")) => {
            out.insert(finding("toxin-exposure", format!("toxin_exposure {toxin}")))
        }
        _ => {}
    }
}

fn coma_scale(observations: &ObservationSet, out: &mut FindingSet) {
    let (Some(eye), Some(verbal), Some(motor)) = (
        observations.numeric(fields::GCS_EYE),
        observations.numeric(fields::GCS_VERBAL),
        observations.numeric(fields::GCS_MOTOR),
    ) else {
        return;
    };
    let (Some(e), Some(v), Some(m)) = (component(eye), component(verbal), component(motor)) else {
        tracing::debug!(eye, verbal, motor, "coma scale with a fractional component ignored");
        return;
    };
    match glasgow_coma_scale(e, v, m) {
        Ok(score) => {
            let evidence = format!(
                "GCS {} (E{} V{} M{})",
                score.total, score.eye, score.verbal, score.motor
            );
            match score.interpretation {
                GcsInterpretation::Severe => out.insert(
                    finding("gcs-severe", evidence.clone()).with_value(f64::from(score.total)),
                ),
                GcsInterpretation::Moderate => out.insert(
                    finding("gcs-moderate", evidence.clone()).with_value(f64::from(score.total)),
                ),
                GcsInterpretation::Mild => {}
            }
            if score.airway_intervention_needed {
                out.insert(finding("airway-protection-needed", evidence));
            }
        }
        Err(e) => tracing::debug!(error = %e, "incomplete coma scale ignored"),
    }
}

/// Coma-scale components are whole numbers; anything else is not a score.
fn component(value: f64) -> Option<u8> {
    (value.fract() == 0.0 && (0.0..=15.0).contains(&value)).then_some(value as u8)
}

fn exposure(observations: &ObservationSet, patient: &PatientContext, out: &mut FindingSet) {
    if let Some(t) = observations.numeric(fields::TEMPERATURE) {
        if t < HYPOTHERMIA_C {
            out.insert(finding("hypothermia", format!("temperature {t} < {HYPOTHERMIA_C}")).with_value(t));
        } else if t > FEVER_C {
            out.insert(finding("fever", format!("temperature {t} > {FEVER_C}")).with_value(t));
        }
    }

    match observations.choice(fields::RASH) {
        Some("non_blanching") => out.insert(finding("non-blanching-rash", "rash non_blanching")),
        Some("urticarial") => out.insert(finding("urticaria", "rash urticarial")),
        _ => {}
    }
    if observations.flag(fields::ANAPHYLAXIS_SIGNS) {
        out.insert(finding("anaphylaxis", "signs of anaphylaxis"));
    }

    if let Some(tbsa) = observations.numeric(fields::BURN_TBSA) {
        let major = if patient.is_pediatric() {
            MAJOR_BURN_PEDIATRIC_PCT
        } else {
            MAJOR_BURN_ADULT_PCT
        };
        if tbsa >= major {
            out.insert(
                finding("major-burn", format!("burn {tbsa}% TBSA >= {major}%")).with_value(tbsa),
            );
        } else if tbsa > 0.0 {
            out.insert(finding("burn", format!("burn {tbsa}% TBSA")).with_value(tbsa));
        }
    } else if observations.flag(fields::BURNS) {
        out.insert(finding("burn", "burns present, extent not recorded"));
    }
}

fn neonatal(
    observations: &ObservationSet,
    patient: &PatientContext,
    ranges: &ReferenceRanges,
    out: &mut FindingSet,
) {
    if let Some(breathing @ ("gasping" | "apneic")) = observations.choice(fields::NEONATAL_BREATHING) {
        out.insert(finding("neonatal-apnea", format!("neonatal_breathing {breathing}")));
    }
    if observations.choice_is(fields::NEONATAL_TONE, "poor") {
        out.insert(finding("neonatal-poor-tone", "neonatal_tone poor"));
    }
    let preterm_by_age = patient
        .gestational_age_weeks
        .is_some_and(|weeks| weeks < TERM_WEEKS);
    let preterm_by_answer = matches!(
        observations.get(fields::TERM_GESTATION).and_then(|v| v.as_flag()),
        Some(false)
    );
    if patient.patient_type == PatientType::Neonate && (preterm_by_age || preterm_by_answer) {
        out.insert(finding("preterm", "born before 37 weeks"));
    }

    if matches!(
        observations.get(fields::VENTILATION_EFFECTIVE).and_then(|v| v.as_flag()),
        Some(false)
    ) {
        out.insert(finding("ineffective-ventilation", "chest not rising with ventilation"));
    }

    // Latest recorded heart rate drives the bradycardia findings.
    let heart_rate = [
        fields::NEONATAL_HEART_RATE_AFTER_COMPRESSIONS,
        fields::NEONATAL_HEART_RATE_AFTER_PPV,
        fields::NEONATAL_HEART_RATE,
    ]
    .into_iter()
    .find_map(|field| observations.numeric(field).map(|hr| (field, hr)));
    if let Some((field, hr)) = heart_rate {
        if hr < NEONATAL_BRADYCARDIA {
            out.insert(
                finding("neonatal-bradycardia", format!("{field} {hr} < {NEONATAL_BRADYCARDIA}"))
                    .with_value(hr),
            );
        }
        if hr < NEONATAL_SEVERE_BRADYCARDIA {
            out.insert(
                finding(
                    "neonatal-severe-bradycardia",
                    format!("{field} {hr} < {NEONATAL_SEVERE_BRADYCARDIA}"),
                )
                .with_value(hr),
            );
            if field == fields::NEONATAL_HEART_RATE_AFTER_COMPRESSIONS {
                out.insert(
                    finding(
                        "persistent-severe-bradycardia",
                        format!("{field} {hr} < {NEONATAL_SEVERE_BRADYCARDIA}"),
                    )
                    .with_value(hr),
                );
            }
        }
    }

    if let (Some(spo2), Some(target)) = (observations.numeric(fields::NEONATAL_SPO2), ranges.spo2_target) {
        if spo2 < target.min {
            out.insert(
                finding(
                    "spo2-below-target",
                    format!("neonatal_spo2 {spo2} < target {}-{}", target.min, target.max),
                )
                .with_value(spo2),
            );
        } else if spo2 > target.max {
            out.insert(
                finding(
                    "spo2-above-target",
                    format!("neonatal_spo2 {spo2} > target {}-{}", target.min, target.max),
                )
                .with_value(spo2),
            );
        }
    }
}
