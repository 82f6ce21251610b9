//! Tests for configuration validation and loading

use std::collections::HashMap;
use std::path::Path;

use admission_control::config::{ControllerConfig, CONFIG_PATH_ENV};

fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_config_validation() {
    assert!(ControllerConfig::default().validate().is_ok());
}

#[test]
fn test_config_invalid_threshold() {
    let invalid = ControllerConfig {
        load_threshold: 0.0,
        ..ControllerConfig::default()
    };
    assert!(invalid.validate().is_err());

    let invalid = ControllerConfig {
        load_threshold: f64::NAN,
        ..ControllerConfig::default()
    };
    assert!(invalid.validate().is_err());
}

#[test]
fn test_config_invalid_pool_size() {
    let invalid = ControllerConfig {
        pool_size: 0,
        ..ControllerConfig::default()
    };
    assert!(invalid.validate().is_err());
}

#[test]
fn test_config_invalid_interval() {
    let invalid = ControllerConfig {
        poll_interval_secs: -1.0,
        ..ControllerConfig::default()
    };
    assert!(invalid.validate().is_err());
}

#[test]
fn test_config_empty_program() {
    let invalid = ControllerConfig {
        workload_program: "  ".into(),
        ..ControllerConfig::default()
    };
    assert!(invalid.validate().is_err());
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "load_threshold": 2.5,
        "mem_floor_mb": 4096,
        "poll_interval_secs": 0.5,
        "pool_size": 8,
        "workload_program": "/opt/bin/burn",
        "seed": 7
    }"#;

    let config = ControllerConfig::from_json_str(json).unwrap();
    assert_eq!(config.mem_floor_mb, 4096);
    assert_eq!(config.pool_size, 8);
    assert_eq!(config.seed, Some(7));
}

#[test]
fn test_config_from_partial_json_uses_defaults() {
    let config = ControllerConfig::from_json_str(r#"{ "pool_size": 3 }"#).unwrap();
    assert_eq!(config.pool_size, 3);
    assert_eq!(config.mem_floor_mb, 1700);
    assert_eq!(config.workload_program, "./process");
}

#[test]
fn test_config_from_json_rejects_invalid() {
    assert!(ControllerConfig::from_json_str(r#"{ "pool_size": 0 }"#).is_err());
    assert!(ControllerConfig::from_json_str("not json").is_err());
}

#[test]
fn test_config_from_sources_without_file_uses_defaults() {
    let config = ControllerConfig::from_sources(lookup_from(&[])).unwrap();
    assert_eq!(config, ControllerConfig::default());
}

#[test]
fn test_config_file_values_apply() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("admission.json");
    std::fs::write(&path, r#"{ "pool_size": 6, "mem_floor_mb": 4096 }"#).unwrap();

    let config = ControllerConfig::from_sources(lookup_from(&[(CONFIG_PATH_ENV, path_str(&path))])).unwrap();
    assert_eq!(config.pool_size, 6);
    assert_eq!(config.mem_floor_mb, 4096);
    assert_eq!(config.workload_program, "./process");
}

#[test]
fn test_env_overrides_win_over_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("admission.json");
    std::fs::write(&path, r#"{ "pool_size": 6, "load_threshold": 2.0 }"#).unwrap();

    let config = ControllerConfig::from_sources(lookup_from(&[
        (CONFIG_PATH_ENV, path_str(&path)),
        ("ADMISSION_POOL_SIZE", "9"),
    ]))
    .unwrap();
    assert_eq!(config.pool_size, 9);
    assert!((config.load_threshold - 2.0).abs() < f64::EPSILON);
}

#[test]
fn test_missing_config_file_is_contextual_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let err = ControllerConfig::from_sources(lookup_from(&[(CONFIG_PATH_ENV, path_str(&path))])).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("failed to read config file"), "{message}");
    assert!(message.contains("absent.json"), "{message}");
}

#[test]
fn test_malformed_config_file_is_contextual_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ pool_size: ").unwrap();

    let err = ControllerConfig::from_sources(lookup_from(&[(CONFIG_PATH_ENV, path_str(&path))])).unwrap_err();
    assert!(err.to_string().contains("failed to parse config file"));
}

#[test]
fn test_invalid_merged_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("admission.json");
    std::fs::write(&path, r#"{ "pool_size": 6 }"#).unwrap();

    let err = ControllerConfig::from_sources(lookup_from(&[
        (CONFIG_PATH_ENV, path_str(&path)),
        ("ADMISSION_POOL_SIZE", "0"),
    ]))
    .unwrap_err();
    assert!(err.to_string().contains("pool_size"));
}
