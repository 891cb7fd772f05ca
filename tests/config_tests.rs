use stencil_sign::SignRequest;
use stencil_sign::config::{ConfigError, GeneratorConfig};

#[test]
fn missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = GeneratorConfig::load(dir.path().join("absent.json")).unwrap();
    assert_eq!(config, GeneratorConfig::default());
}

#[test]
fn defaults_match_the_documented_values() {
    let config = GeneratorConfig::default();
    assert_eq!(config.defaults.text, "LABEL");
    assert_eq!(config.defaults.font_family, "Arial");
    assert_eq!(config.limits.width_mm, (10.0, 500.0));
    assert_eq!(config.limits.thickness_mm, (0.2, 5.0));
    assert_eq!(config.predictor.threshold_percent, 70);
    assert_eq!(config.buckets.extra_bold, 1.30);
    assert_eq!(config.output.directory.to_str(), Some("output"));
    assert!(config.build.combined_preview);
}

#[test]
fn save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let mut config = GeneratorConfig::default();
    config.predictor.threshold_percent = 80;
    config.buckets.bold = 1.2;
    config.save_preset(
        "exit",
        SignRequest {
            text: "EXIT".into(),
            heaviness: 70,
            ..SignRequest::default()
        },
    );
    config.save(&path).unwrap();

    let loaded = GeneratorConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.preset("exit").map(|r| r.heaviness), Some(70));
}

#[test]
fn partial_files_keep_other_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{ "predictor": { "threshold_percent": 60 }, "defaults": { "text": "HELLO" } }"#,
    )
    .unwrap();

    let config = GeneratorConfig::load(&path).unwrap();
    assert_eq!(config.predictor.threshold_percent, 60);
    assert_eq!(config.predictor.coverage_weight, 45.0);
    assert_eq!(config.defaults.text, "HELLO");
    assert_eq!(config.defaults.width_mm, 100.0);
    assert_eq!(config.limits, GeneratorConfig::default().limits);
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = GeneratorConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Json { .. }));
    assert!(err.to_string().contains("config.json"));
}

#[test]
fn presets_can_be_replaced_and_removed() {
    let mut config = GeneratorConfig::default();
    config.save_preset("a", SignRequest::default());
    config.save_preset(
        "a",
        SignRequest {
            width_mm: 200.0,
            ..SignRequest::default()
        },
    );
    assert_eq!(config.presets.len(), 1);
    assert_eq!(config.preset("a").map(|r| r.width_mm), Some(200.0));
    assert!(config.remove_preset("a").is_some());
    assert!(config.preset("a").is_none());
}
