use resus_cli::config::{load_config, migrate, save_config};
use resus_core::config::{CURRENT_CONFIG_VERSION, EngineConfig, WeightFormula};

#[test]
fn missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config(&dir.path().join("config.json")).unwrap();
    assert_eq!(config, EngineConfig::default());
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let mut config = EngineConfig {
        strict_transitions: true,
        fluid_bolus_ml_per_kg: 10.0,
        ..Default::default()
    };
    config.formulas.primary_survey.weight = WeightFormula::Apls2011;
    save_config(&path, &config).unwrap();

    assert!(!path.with_extension("json.tmp").exists());
    assert_eq!(load_config(&path).unwrap(), config);
}

#[test]
fn unversioned_config_is_migrated_to_lenient() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "fluid_bolus_ml_per_kg": 10 }"#).unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.config_version, CURRENT_CONFIG_VERSION);
    assert!(!config.strict_transitions);
    assert_eq!(config.fluid_bolus_ml_per_kg, 10.0);
}

#[test]
fn migration_keeps_an_explicit_flag() {
    let json = serde_json::json!({ "strict_transitions": true });
    let migrated = migrate(json, 0).unwrap();
    assert_eq!(migrated["strict_transitions"], true);
    assert_eq!(migrated["config_version"], 1);
}

#[test]
fn newer_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "config_version": 99 }"#).unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("newer than this build"));
}

#[test]
fn out_of_range_bolus_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "config_version": 1, "fluid_bolus_ml_per_kg": 40 }"#).unwrap();

    assert!(load_config(&path).is_err());
    assert!(save_config(&path, &serde_json::from_str(r#"{ "fluid_bolus_ml_per_kg": 2 }"#).unwrap()).is_err());
}
