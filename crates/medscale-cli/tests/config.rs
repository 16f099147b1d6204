use medscale_cli::config::{CliConfig, load_config, migrate, save_config};

#[test]
fn missing_file_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config(&dir.path().join("config.json")).unwrap();
    assert_eq!(config, CliConfig::default());
}

#[test]
fn save_then_load_round_trips_with_current_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");
    let config = CliConfig {
        data_dir: Some(dir.path().join("data")),
        default_scale: Some("gfr".to_string()),
        ..CliConfig::default()
    };

    save_config(&path, &config).unwrap();
    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded.config_version, 1);
    assert_eq!(loaded.data_dir, config.data_dir);
    assert_eq!(loaded.default_scale.as_deref(), Some("gfr"));
    assert_eq!(loaded.log_filter, None);
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn unversioned_config_is_migrated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"log_filter": "debug"}"#).unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.config_version, 1);
    assert_eq!(config.log_filter.as_deref(), Some("debug"));
}

#[test]
fn newer_config_is_rejected() {
    let err = migrate(serde_json::json!({"config_version": 9}), 9).unwrap_err();
    assert!(err.to_string().contains("newer"));
}

#[test]
fn non_object_config_is_rejected() {
    assert!(migrate(serde_json::json!([1, 2]), 0).is_err());
}

#[test]
fn configured_data_dir_wins() {
    let config = CliConfig {
        data_dir: Some("/srv/medscale".into()),
        ..CliConfig::default()
    };
    assert_eq!(
        config.resolved_data_dir().unwrap(),
        std::path::PathBuf::from("/srv/medscale")
    );
}
