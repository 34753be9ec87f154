use resus_core::config::EngineConfig;
use resus_core::fields;
use resus_core::models::observation::{ObservationInput, ObservationValue};
use resus_core::models::patient::{PatientContextInput, PatientType};
use resus_core::models::protocol::{ProtocolId, Tick, UserAction};
use resus_core::models::session::Session;
use resus_engine::Engine;
use resus_engine::timer::TickOutcome;

fn tick(seq: u64, delta_seconds: u64) -> Tick {
    Tick { seq, delta_seconds }
}

fn newborn(engine: &Engine) -> Session {
    let mut session =
        engine.start_session(ProtocolId::NeonatalResuscitation, jiff::Timestamp::UNIX_EPOCH);
    let input = PatientContextInput {
        patient_type: Some(PatientType::Neonate),
        weight_kg: Some(3.2),
        ..Default::default()
    };
    engine.set_patient(&mut session, &input).unwrap();
    engine.apply(&mut session, &UserAction::Continue).unwrap();
    session
}

fn first_answer(engine: &Engine, session: &mut Session) {
    engine
        .commit_observation(
            session,
            ObservationInput::new(
                "birth_assessment",
                fields::NEONATAL_BREATHING,
                ObservationValue::Choice("apneic".into()),
            ),
        )
        .unwrap();
}

fn answered_newborn(engine: &Engine) -> Session {
    let mut session = newborn(engine);
    first_answer(engine, &mut session);
    session
}

#[test]
fn clock_starts_with_first_observation() {
    let engine = Engine::default();
    let mut session = newborn(&engine);
    engine.tick(&mut session, tick(1, 30)).unwrap();
    assert_eq!(session.elapsed_seconds, 0);
    assert!(!session.timer_started);

    first_answer(&engine, &mut session);
    assert!(session.timer_started);
    let outcome = engine.tick(&mut session, tick(2, 30)).unwrap();
    assert_eq!(outcome, TickOutcome::Applied);
    assert_eq!(session.elapsed_seconds, 30);
}

#[test]
fn redelivered_ticks_are_ignored() {
    let engine = Engine::default();
    let mut session = answered_newborn(&engine);
    engine.tick(&mut session, tick(1, 10)).unwrap();
    engine.tick(&mut session, tick(1, 10)).unwrap();
    engine.tick(&mut session, tick(2, 5)).unwrap();
    let outcome = engine.tick(&mut session, tick(2, 5)).unwrap();
    assert_ne!(outcome, TickOutcome::Applied);
    assert_eq!(session.elapsed_seconds, 15);
    assert_eq!(session.last_tick_seq, Some(2));
}

#[test]
fn coalesced_tick_counts_the_whole_interval() {
    let engine = Engine::default();
    let mut session = answered_newborn(&engine);
    // Ticks 1 to 3 delivered as one.
    engine.tick(&mut session, tick(3, 3)).unwrap();
    engine.tick(&mut session, tick(2, 1)).unwrap();
    assert_eq!(session.elapsed_seconds, 3);
}

#[test]
fn spo2_target_moves_with_elapsed_time() {
    let engine = Engine::new(EngineConfig::default()).unwrap();
    let mut session = answered_newborn(&engine);
    while session.current_step_id() != Some("ventilation") {
        engine.apply(&mut session, &UserAction::Continue).unwrap();
    }

    let view = engine.current_view(&session).unwrap();
    assert_eq!(view.target.as_deref(), Some("SpO2 target 60-65%"));

    engine
        .commit_observation(
            &mut session,
            ObservationInput::new("ventilation", fields::NEONATAL_SPO2, ObservationValue::Numeric(68.0)),
        )
        .unwrap();
    assert!(session.findings.contains("spo2-above-target"));

    engine.tick(&mut session, tick(1, 200)).unwrap();
    assert_eq!(
        engine.current_view(&session).unwrap().target.as_deref(),
        Some("SpO2 target 70-75%")
    );
    assert!(session.findings.contains("spo2-below-target"));
    assert!(!session.findings.contains("spo2-above-target"));
}
