use proptest::prelude::*;
use resus_calc::drugs::{Drug, compute_dose, salbutamol_nebulised};
use resus_calc::fluids::{infusion_mcg_per_min, maintenance_rate_ml_per_hr, parkland, txa};
use resus_core::error::DomainError;
use resus_core::models::dose::DoseUnit;

#[test]
fn fluid_bolus_for_twenty_kg() {
    let dose = compute_dose(Drug::CrystalloidBolus, 20.0).unwrap();
    assert_eq!(dose.value, 400.0);
    assert_eq!(dose.unit, DoseUnit::Ml);
    assert_eq!(dose.display, "400 mL");
    assert!(!dose.capped);
}

#[test]
fn lorazepam_is_capped_at_four_mg() {
    let dose = compute_dose(Drug::Lorazepam, 55.0).unwrap();
    assert_eq!(dose.value, 4.0);
    assert!(dose.capped);
    assert_eq!(dose.display, "4.0 mg");
    assert!(dose.expression.ends_with("capped"));
}

#[test]
fn phenobarbital_is_capped_at_one_gram() {
    let dose = compute_dose(Drug::Phenobarbital, 70.0).unwrap();
    assert_eq!(dose.value, 1000.0);
    assert!(dose.capped);

    let small = compute_dose(Drug::Phenobarbital, 12.0).unwrap();
    assert_eq!(small.value, 240.0);
    assert_eq!(small.display, "240.0 mg");
}

#[test]
fn mg_doses_show_one_decimal() {
    let dose = compute_dose(Drug::Lorazepam, 13.0).unwrap();
    assert_eq!(dose.display, "1.3 mg");
    assert_eq!(dose.expression, "0.1 mg/kg x 13 kg = 1.3 mg (max 4 mg)");
}

#[test]
fn tiny_doses_are_never_shown_as_zero() {
    let dose = compute_dose(Drug::AdenosineFirst, 0.4).unwrap();
    assert!(dose.value > 0.0);
    assert_eq!(dose.display, "0.04 mg");
}

#[test]
fn invalid_weight_is_a_domain_error() {
    for weight in [0.0, -3.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            compute_dose(Drug::Amiodarone, weight),
            Err(DomainError::InvalidWeight(_))
        ));
    }
}

#[test]
fn salbutamol_depends_on_age_band() {
    assert_eq!(salbutamol_nebulised(24.0, 12.0).unwrap().value, 2.5);
    assert_eq!(salbutamol_nebulised(60.0, 18.0).unwrap().value, 5.0);
}

#[test]
fn parkland_splits_over_eight_and_sixteen_hours() {
    let plan = parkland(20.0, 15.0).unwrap();
    assert_eq!(plan.total_24h_ml, 1200.0);
    assert_eq!(plan.first_8h_ml, 600.0);
    assert_eq!(plan.first_8h_rate_ml_per_hr, 75.0);
    assert_eq!(plan.next_16h_ml, 600.0);
    assert_eq!(plan.next_16h_rate_ml_per_hr, 38.0);
}

#[test]
fn parkland_rejects_impossible_tbsa() {
    assert!(parkland(20.0, 0.0).is_err());
    assert!(parkland(20.0, 120.0).is_err());
}

#[test]
fn txa_loading_capped_and_maintenance_per_kg() {
    let plan = txa(80.0).unwrap();
    assert_eq!(plan.loading.value, 1000.0);
    assert!(plan.loading.capped);
    assert_eq!(plan.loading_minutes, 10);
    assert_eq!(plan.maintenance_mg_per_hr, 160.0);

    let child = txa(20.0).unwrap();
    assert_eq!(child.loading.value, 300.0);
    assert_eq!(child.maintenance_mg_per_hr, 40.0);
}

#[test]
fn maintenance_follows_four_two_one() {
    assert_eq!(maintenance_rate_ml_per_hr(8.0).unwrap(), 32.0);
    assert_eq!(maintenance_rate_ml_per_hr(15.0).unwrap(), 50.0);
    assert_eq!(maintenance_rate_ml_per_hr(30.0).unwrap(), 70.0);
}

#[test]
fn infusion_rate_scales_with_weight() {
    assert_eq!(infusion_mcg_per_min(0.1, 20.0).unwrap(), 2.0);
}

proptest! {
    #[test]
    fn dose_is_a_pure_function_of_weight(weight in 0.5..150.0f64, index in 0usize..24) {
        let drug = Drug::ALL[index];
        let first = compute_dose(drug, weight).unwrap();
        let second = compute_dose(drug, weight).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert!(first.value > 0.0);
        prop_assert!(first.value <= first.max);
    }
}
