use resus_core::error::LogicError;
use resus_core::fields;
use resus_core::models::observation::{ObservationSet, ObservationValue};
use resus_core::models::patient::{PatientContext, PatientType, WeightSource};
use resus_core::models::protocol::{ProtocolId, SequencerState, UserAction};
use resus_protocols::sequencer::{
    check_early_exit, effective_steps, next_step, previous_step, reachable_observations, transition,
};
use resus_protocols::{Protocol, get_protocol};

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

fn step_ids(protocol: &dyn Protocol, p: &PatientContext, obs: &ObservationSet) -> Vec<String> {
    effective_steps(protocol, p, obs)
        .into_iter()
        .map(|s| s.id.clone())
        .collect()
}

#[test]
fn jvp_step_only_for_adult_and_pregnant() {
    let protocol = get_protocol(ProtocolId::StepByStepSurvey);
    let obs = ObservationSet::new();

    let ids = step_ids(protocol.as_ref(), &child(), &obs);
    assert!(!ids.contains(&"jugular_venous_pressure".to_string()));

    let adult = patient(PatientType::Adult, 480.0, 70.0);
    let ids = step_ids(protocol.as_ref(), &adult, &obs);
    assert!(ids.contains(&"jugular_venous_pressure".to_string()));
    assert!(!ids.contains(&"uterine_assessment".to_string()));

    let pregnant = patient(PatientType::Pregnant, 360.0, 75.0);
    let ids = step_ids(protocol.as_ref(), &pregnant, &obs);
    assert!(ids.contains(&"jugular_venous_pressure".to_string()));
    assert!(ids.contains(&"uterine_assessment".to_string()));
}

#[test]
fn trauma_flag_makes_toxin_history_reachable() {
    let protocol = get_protocol(ProtocolId::StepByStepSurvey);
    let p = child();

    let without = ObservationSet::new();
    assert_eq!(
        next_step(protocol.as_ref(), "glucose", &p, &without).unwrap(),
        SequencerState::step("exposure")
    );

    let with = ObservationSet::new().with(
        "general_impression",
        fields::TRAUMA,
        ObservationValue::Flag(true),
    );
    assert_eq!(
        next_step(protocol.as_ref(), "glucose", &p, &with).unwrap(),
        SequencerState::step("toxin_history")
    );
}

#[test]
fn answers_on_hidden_steps_are_not_reachable() {
    let protocol = get_protocol(ProtocolId::StepByStepSurvey);
    let toxin = ObservationValue::Choice("opioid".into());
    let obs = ObservationSet::new()
        .with("general_impression", fields::TRAUMA, ObservationValue::Flag(false))
        .with("toxin_history", fields::TOXIN_EXPOSURE, toxin.clone())
        .with("jugular_venous_pressure", fields::JVP, ObservationValue::Choice("raised".into()));

    let reachable = reachable_observations(protocol.as_ref(), &child(), &obs);
    assert_eq!(reachable.get_at("toxin_history", fields::TOXIN_EXPOSURE), None);
    assert_eq!(reachable.get_at("jugular_venous_pressure", fields::JVP), None);
    assert_eq!(
        reachable.get_at("general_impression", fields::TRAUMA),
        Some(&ObservationValue::Flag(false))
    );

    let obs = obs.with("general_impression", fields::TRAUMA, ObservationValue::Flag(true));
    let reachable = reachable_observations(protocol.as_ref(), &child(), &obs);
    assert_eq!(reachable.get_at("toxin_history", fields::TOXIN_EXPOSURE), Some(&toxin));
}

#[test]
fn absent_pulse_skips_perfusion_steps() {
    let protocol = get_protocol(ProtocolId::StepByStepSurvey);
    let obs = ObservationSet::new().with(
        "pulse_check",
        fields::PULSE,
        ObservationValue::Choice("absent".into()),
    );
    assert_eq!(
        next_step(protocol.as_ref(), "pulse_check", &child(), &obs).unwrap(),
        SequencerState::step("neurological")
    );
}

#[test]
fn last_step_continues_to_interventions() {
    let protocol = get_protocol(ProtocolId::PrimarySurvey);
    let state = transition(
        protocol.as_ref(),
        &SequencerState::step("exposure"),
        &UserAction::Continue,
        &child(),
        &ObservationSet::new(),
    )
    .unwrap();
    assert_eq!(state, SequencerState::Interventions);
}

#[test]
fn back_then_forward_returns_to_same_step_with_answers_kept() {
    let protocol = get_protocol(ProtocolId::PrimarySurvey);
    let p = child();
    let obs = ObservationSet::new().with(
        "airway",
        fields::AIRWAY_PATENCY,
        ObservationValue::Choice("at_risk".into()),
    );

    let back = transition(
        protocol.as_ref(),
        &SequencerState::step("breathing"),
        &UserAction::Back,
        &p,
        &obs,
    )
    .unwrap();
    assert_eq!(back, SequencerState::step("airway"));

    let forward = transition(protocol.as_ref(), &back, &UserAction::Continue, &p, &obs).unwrap();
    assert_eq!(forward, SequencerState::step("breathing"));

    let view = protocol.step_view("airway", &obs, None).unwrap();
    assert_eq!(
        view.prefilled,
        vec![(
            fields::AIRWAY_PATENCY.to_string(),
            ObservationValue::Choice("at_risk".into())
        )]
    );
}

#[test]
fn back_from_first_step_returns_to_patient_data() {
    let protocol = get_protocol(ProtocolId::TraumaPrimarySurvey);
    let state = previous_step(
        protocol.as_ref(),
        "catastrophic_hemorrhage",
        &child(),
        &ObservationSet::new(),
    )
    .unwrap();
    assert_eq!(state, SequencerState::PatientData);
}

#[test]
fn resolve_and_escalate_from_interventions_and_reassessment() {
    let protocol = get_protocol(ProtocolId::PrimarySurvey);
    let p = child();
    let obs = ObservationSet::new();

    for from in [SequencerState::Interventions, SequencerState::Reassessment] {
        let resolved = transition(protocol.as_ref(), &from, &UserAction::Resolve, &p, &obs).unwrap();
        assert_eq!(resolved, SequencerState::CaseComplete);

        let escalated = transition(protocol.as_ref(), &from, &UserAction::Escalate, &p, &obs).unwrap();
        assert_eq!(escalated, SequencerState::Interventions);
    }
}

#[test]
fn nothing_leaves_case_complete() {
    let protocol = get_protocol(ProtocolId::PrimarySurvey);
    let err = transition(
        protocol.as_ref(),
        &SequencerState::CaseComplete,
        &UserAction::Continue,
        &child(),
        &ObservationSet::new(),
    )
    .unwrap_err();
    assert_eq!(err, LogicError::SessionComplete);
}

#[test]
fn resolve_mid_survey_is_rejected() {
    let protocol = get_protocol(ProtocolId::PrimarySurvey);
    let err = transition(
        protocol.as_ref(),
        &SequencerState::step("airway"),
        &UserAction::Resolve,
        &child(),
        &ObservationSet::new(),
    )
    .unwrap_err();
    assert!(matches!(err, LogicError::InvalidTransition { .. }));
}

#[test]
fn unknown_step_is_a_logic_error() {
    let protocol = get_protocol(ProtocolId::PrimarySurvey);
    let err = next_step(protocol.as_ref(), "nope", &child(), &ObservationSet::new()).unwrap_err();
    assert!(matches!(err, LogicError::UnknownStep { .. }));
}

#[test]
fn unresponsive_and_pulseless_triggers_early_exit() {
    let protocol = get_protocol(ProtocolId::PrimarySurvey);
    let obs = ObservationSet::new()
        .with("initial", fields::AVPU, ObservationValue::Choice("unresponsive".into()));
    assert!(check_early_exit(protocol.as_ref(), &SequencerState::step("initial"), &obs).is_none());

    let obs = obs.with("circulation", fields::PULSE, ObservationValue::Choice("absent".into()));
    let exit = check_early_exit(protocol.as_ref(), &SequencerState::step("circulation"), &obs).unwrap();
    assert_eq!(exit.finding, "cardiac-arrest");

    assert!(check_early_exit(protocol.as_ref(), &SequencerState::Interventions, &obs).is_none());
}

#[test]
fn neonatal_path_follows_heart_rate() {
    let protocol = get_protocol(ProtocolId::NeonatalResuscitation);
    let newborn = patient(PatientType::Neonate, 0.0, 3.2);

    let vigorous = ObservationSet::new()
        .with("birth_assessment", fields::TERM_GESTATION, ObservationValue::Flag(true))
        .with("birth_assessment", fields::NEONATAL_TONE, ObservationValue::Choice("good".into()))
        .with(
            "birth_assessment",
            fields::NEONATAL_BREATHING,
            ObservationValue::Choice("crying".into()),
        );
    assert_eq!(
        next_step(protocol.as_ref(), "birth_assessment", &newborn, &vigorous).unwrap(),
        SequencerState::Interventions
    );

    let apneic = vigorous
        .clone()
        .with(
            "birth_assessment",
            fields::NEONATAL_BREATHING,
            ObservationValue::Choice("apneic".into()),
        )
        .with("ventilation", fields::NEONATAL_HEART_RATE_AFTER_PPV, ObservationValue::Numeric(50.0));
    assert_eq!(
        step_ids(protocol.as_ref(), &newborn, &apneic),
        vec!["birth_assessment", "initial_steps", "ventilation", "compressions"]
    );
}
