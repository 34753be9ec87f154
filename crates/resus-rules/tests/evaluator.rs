use proptest::prelude::*;
use resus_calc::ranges::ReferenceRanges;
use resus_core::fields;
use resus_core::models::finding::{AbcdeSystem, Severity};
use resus_core::models::observation::{ObservationSet, ObservationValue};
use resus_core::models::patient::{PatientContext, PatientType, WeightSource};
use resus_rules::catalog;
use resus_rules::evaluate;

fn patient(patient_type: PatientType, age_months: f64, weight_kg: f64) -> PatientContext {
    PatientContext {
        age_months,
        weight_kg,
        patient_type,
        weight_source: WeightSource::Measured,
        gestational_age_weeks: None,
    }
}

fn child() -> PatientContext {
    patient(PatientType::Child, 60.0, 20.0)
}

fn num(v: f64) -> ObservationValue {
    ObservationValue::Numeric(v)
}

fn pick(v: &str) -> ObservationValue {
    ObservationValue::Choice(v.to_string())
}

fn run(obs: &ObservationSet, p: &PatientContext) -> resus_core::models::finding::FindingSet {
    evaluate(obs, p, &ReferenceRanges::for_patient(p, 0))
}

#[test]
fn slow_capillary_refill_is_poor_perfusion() {
    let obs = ObservationSet::new().with("circulation", fields::CAPILLARY_REFILL, num(4.0));
    let found = run(&obs, &child());
    let f = found.get("poor-perfusion").unwrap();
    assert_eq!(f.system, AbcdeSystem::Circulation);
    assert_eq!(f.value, Some(4.0));

    let normal = ObservationSet::new().with("circulation", fields::CAPILLARY_REFILL, num(2.0));
    assert!(!run(&normal, &child()).contains("poor-perfusion"));
}

#[test]
fn vitals_compared_against_age_band() {
    // 60 months falls in the 36-72 month band: HR 80-140, RR 20-28.
    let obs = ObservationSet::new()
        .with("circulation", fields::HEART_RATE, num(190.0))
        .with("breathing", fields::RESPIRATORY_RATE, num(12.0));
    let found = run(&obs, &child());
    assert_eq!(
        found.get("heart-rate-high").unwrap().evidence,
        vec!["heart_rate 190 > 140"]
    );
    assert!(found.contains("respiratory-rate-low"));
    assert!(!found.contains("heart-rate-low"));
}

#[test]
fn hypotension_uses_age_threshold() {
    // 70 + 2 x 5 = 80
    let obs = ObservationSet::new().with("circulation", fields::SYSTOLIC_BP, num(78.0));
    let found = run(&obs, &child());
    assert!(found.contains("hypotension"));
    assert!(found.contains("systolic-bp-low"));
}

#[test]
fn oxygenation_bands() {
    let severe = ObservationSet::new().with("breathing", fields::SPO2, num(88.0));
    let found = run(&severe, &child());
    assert!(found.contains("severe-hypoxemia"));
    assert!(!found.contains("hypoxemia"));

    let mild = ObservationSet::new().with("breathing", fields::SPO2, num(92.0));
    assert!(run(&mild, &child()).contains("hypoxemia"));
}

#[test]
fn glucose_in_mg_dl_is_converted() {
    let obs = ObservationSet::new().with("glucose", fields::GLUCOSE_MG_DL, num(45.0));
    let found = run(&obs, &child());
    assert_eq!(found.get("hypoglycemia").unwrap().value, Some(2.5));
}

#[test]
fn low_coma_scale_needs_airway_protection() {
    let obs = ObservationSet::new()
        .with("neurological", fields::GCS_EYE, num(1.0))
        .with("neurological", fields::GCS_VERBAL, num(1.0))
        .with("neurological", fields::GCS_MOTOR, num(4.0));
    let found = run(&obs, &child());
    assert_eq!(found.get("gcs-severe").unwrap().value, Some(6.0));
    assert!(found.contains("airway-protection-needed"));
}

#[test]
fn fractional_coma_scale_is_not_scored() {
    let obs = ObservationSet::new()
        .with("neurological", fields::GCS_EYE, num(1.5))
        .with("neurological", fields::GCS_VERBAL, num(1.0))
        .with("neurological", fields::GCS_MOTOR, num(4.0));
    let found = run(&obs, &child());
    assert!(!found.contains("gcs-severe"));
    assert!(!found.contains("gcs-moderate"));
}

#[test]
fn one_observation_can_raise_several_findings() {
    let obs = ObservationSet::new()
        .with("initial", fields::AVPU, pick("unresponsive"))
        .with("circulation", fields::PULSE, pick("absent"));
    let found = run(&obs, &child());
    assert!(found.contains("cardiac-arrest"));
    assert!(found.contains("decreased-consciousness"));
}

#[test]
fn missing_reference_band_is_reported_not_guessed() {
    let very_old = patient(PatientType::Adult, 1450.0, 60.0);
    let obs = ObservationSet::new().with("circulation", fields::HEART_RATE, num(130.0));
    let found = run(&obs, &very_old);

    let marker = found.get("no-reference-available").unwrap();
    assert_eq!(marker.severity, Severity::Info);
    assert!(!found.contains("heart-rate-high"));

    let nothing_measured = ObservationSet::new().with("initial", fields::AVPU, pick("alert"));
    assert!(!run(&nothing_measured, &very_old).contains("no-reference-available"));
}

#[test]
fn neonatal_spo2_follows_minutes_since_birth() {
    let newborn = patient(PatientType::Neonate, 0.0, 3.2);
    let obs = ObservationSet::new().with("ventilation", fields::NEONATAL_SPO2, num(68.0));

    // 3 minutes: 70-75
    let at_three = evaluate(&obs, &newborn, &ReferenceRanges::for_patient(&newborn, 180));
    assert!(at_three.contains("spo2-below-target"));

    // 1 minute: 60-65
    let at_one = evaluate(&obs, &newborn, &ReferenceRanges::for_patient(&newborn, 60));
    assert!(at_one.contains("spo2-above-target"));
}

#[test]
fn latest_neonatal_heart_rate_wins() {
    let newborn = patient(PatientType::Neonate, 0.0, 3.2);
    let obs = ObservationSet::new()
        .with("initial_steps", fields::NEONATAL_HEART_RATE, num(50.0))
        .with("ventilation", fields::NEONATAL_HEART_RATE_AFTER_PPV, num(110.0));
    let found = run(&obs, &newborn);
    assert!(!found.contains("neonatal-bradycardia"));

    let obs = obs
        .with("ventilation", fields::NEONATAL_HEART_RATE_AFTER_PPV, num(50.0))
        .with("compressions", fields::NEONATAL_HEART_RATE_AFTER_COMPRESSIONS, num(40.0));
    let found = run(&obs, &newborn);
    assert!(found.contains("neonatal-bradycardia"));
    assert!(found.contains("neonatal-severe-bradycardia"));
    assert!(found.contains("persistent-severe-bradycardia"));
}

#[test]
fn major_burn_threshold_depends_on_age() {
    let obs = ObservationSet::new().with("burns", fields::BURN_TBSA, num(12.0));
    assert!(run(&obs, &child()).contains("major-burn"));

    let adult = patient(PatientType::Adult, 360.0, 70.0);
    let found = run(&obs, &adult);
    assert!(found.contains("burn"));
    assert!(!found.contains("major-burn"));
}

#[test]
fn provider_selection_uses_catalog_classification() {
    let obs = ObservationSet::new().with(
        "airway",
        fields::CRITICAL_FINDINGS,
        ObservationValue::MultiSelect(vec!["airway-obstruction".into()]),
    );
    let found = run(&obs, &child());
    let f = found.get("airway-obstruction").unwrap();
    assert_eq!(f.severity, Severity::Critical);
    assert_eq!(f.system, AbcdeSystem::Airway);
    assert_eq!(f.evidence, vec!["selected by provider"]);
}

#[test]
fn every_selectable_critical_finding_is_catalogued() {
    for protocol in resus_protocols::all_protocols() {
        for step in protocol.steps() {
            for option in &step.critical_finding_options {
                assert!(
                    catalog::lookup(option).is_some(),
                    "{}/{}: '{option}' missing from catalog",
                    protocol.id(),
                    step.id
                );
            }
        }
    }
}

proptest! {
    #[test]
    fn evaluation_is_deterministic(
        hr in 0.0f64..300.0,
        rr in 0.0f64..120.0,
        spo2 in 0.0f64..100.0,
        crt in 0.0f64..15.0,
        temp in 25.0f64..45.0,
        age in 0.0f64..1500.0,
        avpu in prop::sample::select(vec!["alert", "voice", "pain", "unresponsive"]),
    ) {
        let p = patient(PatientType::Child, age, 20.0);
        let obs = ObservationSet::new()
            .with("circulation", fields::HEART_RATE, num(hr))
            .with("breathing", fields::RESPIRATORY_RATE, num(rr))
            .with("breathing", fields::SPO2, num(spo2))
            .with("circulation", fields::CAPILLARY_REFILL, num(crt))
            .with("exposure", fields::TEMPERATURE, num(temp))
            .with("initial", fields::AVPU, pick(avpu));
        let ranges = ReferenceRanges::for_patient(&p, 0);
        prop_assert_eq!(evaluate(&obs, &p, &ranges), evaluate(&obs, &p, &ranges));
    }
}
