use std::collections::BTreeSet;

use resus_core::fields;
use resus_core::models::observation::{ObservationInput, ObservationValue};
use resus_core::models::protocol::ProtocolId;
use resus_core::models::view::PromptKind;
use resus_protocols::{all_protocols, get_protocol};

#[test]
fn every_protocol_is_registered_once() {
    let ids: Vec<ProtocolId> = all_protocols().iter().map(|p| p.id()).collect();
    assert_eq!(ids, ProtocolId::ALL.to_vec());
    for id in ProtocolId::ALL {
        assert_eq!(get_protocol(id).id(), id);
    }
}

#[test]
fn field_names_are_unique_within_a_protocol() {
    for protocol in all_protocols() {
        let mut seen = BTreeSet::new();
        for step in protocol.steps() {
            for prompt in &step.prompts {
                assert!(
                    seen.insert(prompt.field.clone()),
                    "{}: field '{}' appears twice",
                    protocol.id(),
                    prompt.field
                );
            }
        }
    }
}

#[test]
fn step_ids_are_unique_and_options_well_formed() {
    for protocol in all_protocols() {
        let mut ids = BTreeSet::new();
        for step in protocol.steps() {
            assert!(ids.insert(step.id.clone()), "{}: duplicate step {}", protocol.id(), step.id);
            for prompt in &step.prompts {
                match &prompt.kind {
                    PromptKind::Numeric { range, .. } => assert!(range.min <= range.max),
                    PromptKind::Choice { options } | PromptKind::MultiSelect { options } => {
                        assert!(!options.is_empty())
                    }
                    PromptKind::Flag => {}
                }
            }
        }
    }
}

#[test]
fn critical_findings_prompt_appended_to_view() {
    let protocol = get_protocol(ProtocolId::PrimarySurvey);
    let view = protocol
        .step_view("airway", &Default::default(), None)
        .unwrap();
    assert_eq!(view.phase, "A");
    let last = view.prompts.last().unwrap();
    assert_eq!(last.field, fields::CRITICAL_FINDINGS);
    assert_eq!(view.applicable_options, vec!["airway-obstruction", "anaphylaxis"]);
}

#[test]
fn out_of_range_numeric_is_rejected() {
    let protocol = get_protocol(ProtocolId::PrimarySurvey);
    let err = protocol
        .validate_observation(&ObservationInput::new(
            "breathing",
            fields::SPO2,
            ObservationValue::Numeric(140.0),
        ))
        .unwrap_err();
    assert_eq!(err.field, fields::SPO2);
    assert_eq!(err.value.as_deref(), Some("140"));
}

#[test]
fn coma_scale_components_must_be_whole_numbers() {
    for (id, step) in [
        (ProtocolId::StepByStepSurvey, "neurological"),
        (ProtocolId::TraumaPrimarySurvey, "disability"),
    ] {
        let protocol = get_protocol(id);
        let err = protocol
            .validate_observation(&ObservationInput::new(
                step,
                fields::GCS_EYE,
                ObservationValue::Numeric(2.5),
            ))
            .unwrap_err();
        assert_eq!(err.field, fields::GCS_EYE);
        assert_eq!(err.value.as_deref(), Some("2.5"));
        assert!(err.message.contains("whole number"));

        protocol
            .validate_observation(&ObservationInput::new(
                step,
                fields::GCS_EYE,
                ObservationValue::Numeric(3.0),
            ))
            .unwrap();
    }

    // Other numeric prompts keep accepting fractions.
    get_protocol(ProtocolId::StepByStepSurvey)
        .validate_observation(&ObservationInput::new(
            "perfusion",
            fields::CAPILLARY_REFILL,
            ObservationValue::Numeric(2.5),
        ))
        .unwrap();
}

#[test]
fn unknown_option_and_wrong_kind_are_rejected() {
    let protocol = get_protocol(ProtocolId::PrimarySurvey);

    let unknown = ObservationInput::new(
        "airway",
        fields::AIRWAY_PATENCY,
        ObservationValue::Choice("wide open".into()),
    );
    assert!(protocol.validate_observation(&unknown).is_err());

    let wrong_kind = ObservationInput::new(
        "airway",
        fields::AIRWAY_PATENCY,
        ObservationValue::Numeric(1.0),
    );
    assert!(protocol.validate_observation(&wrong_kind).is_err());

    let wrong_step = ObservationInput::new(
        "airway",
        fields::SPO2,
        ObservationValue::Numeric(95.0),
    );
    assert!(protocol.validate_observation(&wrong_step).is_err());
}

#[test]
fn critical_selection_must_belong_to_step() {
    let protocol = get_protocol(ProtocolId::PrimarySurvey);

    let ok = ObservationInput::new(
        "airway",
        fields::CRITICAL_FINDINGS,
        ObservationValue::MultiSelect(vec!["airway-obstruction".into()]),
    );
    assert!(protocol.validate_observation(&ok).is_ok());

    let foreign = ObservationInput::new(
        "airway",
        fields::CRITICAL_FINDINGS,
        ObservationValue::MultiSelect(vec!["active-seizure".into()]),
    );
    assert!(protocol.validate_observation(&foreign).is_err());
}
