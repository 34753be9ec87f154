use resus_calc::CalcError;
use resus_calc::equipment::{equipment_for, ett_uncuffed_mm};
use resus_calc::patient::{estimate_weight_kg, gestational_weight, resolve_patient};
use resus_core::config::{SuctionFormula, WeightFormula};
use resus_core::models::patient::{PatientContextInput, PatientType, WeightSource};

fn input(age_years: Option<f64>, age_months: Option<f64>, weight_kg: Option<f64>) -> PatientContextInput {
    PatientContextInput {
        age_years,
        age_months,
        weight_kg,
        ..Default::default()
    }
}

#[test]
fn two_year_old_without_weight_gets_formula_weight_and_tube() {
    let patient = resolve_patient(&input(Some(2.0), Some(0.0), None), WeightFormula::Standard).unwrap();
    assert_eq!(patient.weight_kg, 12.0);
    assert_eq!(patient.weight_source, WeightSource::AgeFormula);
    assert_eq!(patient.patient_type, PatientType::Child);

    let kit = equipment_for(&patient, SuctionFormula::DoubleTube).unwrap();
    assert_eq!(kit.ett_uncuffed_mm, 4.5);
    assert_eq!(kit.suction_fr, 9.0);
    assert_eq!(ett_uncuffed_mm(2.0), 4.5);
}

#[test]
fn weight_formula_bands() {
    assert_eq!(estimate_weight_kg(6.0, WeightFormula::Standard), 7.5);
    assert_eq!(estimate_weight_kg(60.0, WeightFormula::Standard), 18.0);
    assert_eq!(estimate_weight_kg(96.0, WeightFormula::Standard), 32.0);

    assert_eq!(estimate_weight_kg(6.0, WeightFormula::Apls2011), 7.0);
    assert_eq!(estimate_weight_kg(36.0, WeightFormula::Apls2011), 14.0);
    assert_eq!(estimate_weight_kg(96.0, WeightFormula::Apls2011), 31.0);
}

#[test]
fn weight_never_decreases_with_age() {
    for formula in [WeightFormula::Standard, WeightFormula::Apls2011] {
        let mut previous = 0.0;
        for months in 0..=216 {
            let kg = estimate_weight_kg(months as f64, formula);
            assert!(
                kg >= previous,
                "{formula:?}: {kg} kg at {months} months is below {previous} kg"
            );
            previous = kg;
        }
    }
}

#[test]
fn measured_weight_wins_over_formula() {
    let patient = resolve_patient(&input(Some(4.0), None, Some(20.0)), WeightFormula::Standard).unwrap();
    assert_eq!(patient.weight_kg, 20.0);
    assert_eq!(patient.weight_source, WeightSource::Measured);
}

#[test]
fn negative_age_is_rejected() {
    let err = resolve_patient(&input(Some(-1.0), None, None), WeightFormula::Standard).unwrap_err();
    match err {
        CalcError::Validation(v) => assert_eq!(v.field, "age_years"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn pediatric_age_above_eighteen_is_rejected() {
    let mut raw = input(Some(19.0), None, Some(70.0));
    raw.patient_type = Some(PatientType::Child);
    assert!(matches!(
        resolve_patient(&raw, WeightFormula::Standard),
        Err(CalcError::Validation(_))
    ));
}

#[test]
fn zero_weight_is_rejected() {
    let err = resolve_patient(&input(Some(3.0), None, Some(0.0)), WeightFormula::Standard).unwrap_err();
    match err {
        CalcError::Validation(v) => assert_eq!(v.field, "weight_kg"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn adult_needs_a_measured_weight() {
    let mut raw = input(Some(35.0), None, None);
    raw.patient_type = Some(PatientType::Pregnant);
    assert!(matches!(
        resolve_patient(&raw, WeightFormula::Standard),
        Err(CalcError::Validation(_))
    ));

    raw.weight_kg = Some(72.0);
    let patient = resolve_patient(&raw, WeightFormula::Standard).unwrap();
    assert_eq!(patient.patient_type, PatientType::Pregnant);
    assert_eq!(patient.age_months, 420.0);
}

#[test]
fn neonate_weight_comes_from_gestation() {
    let raw = PatientContextInput {
        patient_type: Some(PatientType::Neonate),
        gestational_age_weeks: Some(31),
        ..Default::default()
    };
    let patient = resolve_patient(&raw, WeightFormula::Standard).unwrap();
    assert_eq!(patient.age_months, 0.0);
    assert_eq!(patient.weight_kg, 1.4);
    assert_eq!(patient.weight_source, WeightSource::GestationalTable);

    let kit = equipment_for(&patient, SuctionFormula::DoubleTube).unwrap();
    assert_eq!(kit.ett_uncuffed_mm, 3.0);
    assert!((kit.ett_depth_cm - 7.4).abs() < 1e-9);
}

#[test]
fn neonate_without_weight_or_gestation_is_rejected() {
    let raw = PatientContextInput {
        patient_type: Some(PatientType::Neonate),
        ..Default::default()
    };
    assert!(matches!(
        resolve_patient(&raw, WeightFormula::Standard),
        Err(CalcError::Validation(_))
    ));
}

#[test]
fn gestation_outside_table_is_a_domain_error() {
    assert!(gestational_weight(21).is_err());
    assert!(gestational_weight(45).is_err());
    assert_eq!(gestational_weight(22).unwrap(), 0.5);
    assert_eq!(gestational_weight(40).unwrap(), 3.4);
}

#[test]
fn patient_type_is_derived_from_age() {
    let infant = resolve_patient(&input(None, Some(6.0), None), WeightFormula::Standard).unwrap();
    assert_eq!(infant.patient_type, PatientType::Infant);

    let teen = resolve_patient(&input(Some(14.0), None, Some(50.0)), WeightFormula::Standard).unwrap();
    assert_eq!(teen.patient_type, PatientType::Adolescent);
}

#[test]
fn infant_gets_fixed_tube_instead_of_age_formula() {
    let infant = resolve_patient(&input(None, Some(6.0), Some(7.5)), WeightFormula::Standard).unwrap();
    let kit = equipment_for(&infant, SuctionFormula::DoubleTube).unwrap();
    assert_eq!(kit.ett_uncuffed_mm, 3.5);
    assert_eq!(kit.ett_cuffed_mm, Some(3.0));
    assert_eq!(kit.ett_depth_cm, 10.5);
    assert_eq!(ett_uncuffed_mm(0.0), 4.0);
}

#[test]
fn even_french_suction_rounds_down() {
    let patient = resolve_patient(&input(Some(2.0), None, None), WeightFormula::Standard).unwrap();
    let kit = equipment_for(&patient, SuctionFormula::EvenFrench).unwrap();
    assert_eq!(kit.suction_fr, 8.0);
}
