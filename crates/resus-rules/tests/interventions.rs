use proptest::prelude::*;
use resus_core::config::{EngineConfig, ProtocolFormulas};
use resus_core::models::finding::{AbcdeSystem, FindingSet, Severity};
use resus_core::models::intervention::Intervention;
use resus_core::models::patient::{PatientContext, PatientType, WeightSource};
use resus_core::models::protocol::ProtocolId;
use resus_rules::catalog::{self, CATALOG};
use resus_rules::rules::{ExclusiveGroup, rules};
use resus_rules::{RuleSettings, derive_interventions};

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
    patient(PatientType::Child, 72.0, 20.0)
}

fn findings(ids: &[&str]) -> FindingSet {
    ids.iter().map(|id| catalog::finding(id, "test")).collect()
}

fn derive(ids: &[&str]) -> Vec<Intervention> {
    derive_interventions(&findings(ids), &child(), &RuleSettings::default()).unwrap()
}

fn ids(list: &[Intervention]) -> Vec<&str> {
    list.iter().map(|i| i.id.as_str()).collect()
}

#[test]
fn poor_perfusion_gets_twenty_ml_per_kg_bolus() {
    let out = derive(&["poor-perfusion"]);
    assert_eq!(ids(&out), vec!["fluid-bolus"]);

    let bolus = out[0].actions.iter().find_map(|a| a.dose.as_ref()).unwrap();
    assert_eq!(bolus.value, 400.0);
    assert_eq!(bolus.display, "400 mL");
    assert_eq!(out[0].evidence, vec!["poor-perfusion"]);
    assert!(out[0].escalation_path.is_some());
}

#[test]
fn configured_bolus_volume_is_used() {
    let config = EngineConfig {
        fluid_bolus_ml_per_kg: 10.0,
        ..Default::default()
    };
    let settings = RuleSettings::from_config(&config, ProtocolId::PrimarySurvey);
    let out = derive_interventions(&findings(&["hypotension"]), &child(), &settings).unwrap();
    let bolus = out[0].actions.iter().find_map(|a| a.dose.as_ref()).unwrap();
    assert_eq!(bolus.value, 200.0);
}

#[test]
fn newborn_gets_ten_ml_per_kg() {
    let newborn = patient(PatientType::Neonate, 0.0, 3.0);
    let out = derive_interventions(
        &findings(&["poor-perfusion"]),
        &newborn,
        &RuleSettings::default(),
    )
    .unwrap();
    let bolus = out[0].actions.iter().find_map(|a| a.dose.as_ref()).unwrap();
    assert_eq!(bolus.value, 30.0);
}

#[test]
fn more_specific_shock_rule_suppresses_the_rest() {
    let out = derive(&["poor-perfusion", "cold-peripheries"]);
    assert_eq!(ids(&out), vec!["cold-shock"]);

    let out = derive(&["poor-perfusion", "cold-peripheries", "raised-jvp"]);
    assert_eq!(ids(&out), vec!["cardiogenic-shock"]);
}

#[test]
fn severe_hypoxemia_replaces_plain_oxygen() {
    let out = derive(&["severe-hypoxemia", "respiratory-distress"]);
    assert_eq!(ids(&out), vec!["high-flow-oxygen"]);
}

#[test]
fn non_exclusive_rules_all_fire() {
    let out = derive(&["wheeze", "fever", "hypoglycemia"]);
    assert_eq!(ids(&out), vec!["hypoglycemia", "bronchodilator", "antipyretic"]);
}

#[test]
fn airway_comes_before_circulation() {
    let out = derive(&["cardiac-arrest", "airway-obstruction"]);
    assert_eq!(ids(&out), vec!["airway-opening", "cpr"]);
    assert_eq!(out[0].severity, Severity::Critical);
}

#[test]
fn catastrophic_bleeding_comes_first() {
    let out = derive(&["airway-obstruction", "catastrophic-hemorrhage"]);
    assert_eq!(out[0].id, "hemorrhage-control");
    assert_eq!(out[0].system, AbcdeSystem::CatastrophicHemorrhage);
}

#[test]
fn burn_fluids_use_recorded_area() {
    let set: FindingSet = [catalog::finding("major-burn", "test").with_value(15.0)]
        .into_iter()
        .collect();
    let out = derive_interventions(&set, &child(), &RuleSettings::default()).unwrap();
    let first = &out[0].actions[0].action;
    assert!(first.ends_with("= 1200 mL in 24 h"), "{first}");
    assert_eq!(out[0].actions[1].frequency.as_deref(), Some("75 mL/h"));
}

#[test]
fn tube_sizes_follow_protocol_formula() {
    let two_year_old = patient(PatientType::Child, 24.0, 12.0);
    let out = derive_interventions(
        &findings(&["airway-protection-needed"]),
        &two_year_old,
        &RuleSettings {
            formulas: ProtocolFormulas::STANDARD,
            ..Default::default()
        },
    )
    .unwrap();
    assert!(
        out[0]
            .actions
            .iter()
            .any(|a| a.action.starts_with("Prepare ETT 4.5 mm uncuffed"))
    );
}

#[test]
fn rule_table_is_consistent() {
    let mut seen = std::collections::BTreeSet::new();
    for rule in rules() {
        assert!(seen.insert(rule.id), "duplicate rule {}", rule.id);
        for id in rule.trigger.ids() {
            assert!(catalog::lookup(id).is_some(), "{}: unknown finding {id}", rule.id);
        }
    }
}

fn catalog_ids() -> Vec<&'static str> {
    CATALOG.iter().map(|k| k.id).collect()
}

proptest! {
    #[test]
    fn ordering_and_exclusivity_hold(selected in prop::sample::subsequence(catalog_ids(), 0..=20)) {
        let out = derive(&selected);

        for pair in out.windows(2) {
            prop_assert!((pair[0].severity, pair[0].system) <= (pair[1].severity, pair[1].system));
        }

        let critical_airway = out
            .iter()
            .rposition(|i| i.severity == Severity::Critical && i.system == AbcdeSystem::Airway);
        let critical_circulation = out
            .iter()
            .position(|i| i.severity == Severity::Critical && i.system == AbcdeSystem::Circulation);
        if let (Some(a), Some(c)) = (critical_airway, critical_circulation) {
            prop_assert!(a < c);
        }

        for group in [ExclusiveGroup::Shock, ExclusiveGroup::Oxygen] {
            let fired = out
                .iter()
                .filter(|i| {
                    rules()
                        .iter()
                        .any(|r| r.id == i.id && r.exclusive.is_some_and(|e| e.group == group))
                })
                .count();
            prop_assert!(fired <= 1);
        }
    }

    #[test]
    fn derivation_is_deterministic(selected in prop::sample::subsequence(catalog_ids(), 0..=20)) {
        prop_assert_eq!(derive(&selected), derive(&selected));
    }
}
