//! Tests for controller builders

use admission_control::builders::build_controller;
use admission_control::config::ControllerConfig;
use admission_control::core::{ControllerError, CycleOutcome, ResourceSnapshot};
use admission_control::infra::{ChildSupervisor, ScriptedSensor};

#[test]
fn test_build_controller_from_config() {
    let cfg = ControllerConfig {
        pool_size: 4,
        seed: Some(1),
        load_threshold: 1.0,
        ..ControllerConfig::default()
    };
    let mut controller = build_controller(
        &cfg,
        |_| Ok(ScriptedSensor::constant(ResourceSnapshot::new(1.5, 100))),
        |cfg| Ok(ChildSupervisor::new(&cfg.workload_program)),
    )
    .unwrap();

    assert_eq!(controller.pool().snapshot().waiting_count, 4);
    assert!((controller.policy().load_threshold - 1.0).abs() < f64::EPSILON);

    // Above the configured threshold with nothing running: no spawn attempted.
    let report = controller.run_cycle().unwrap();
    assert_eq!(report.outcome, CycleOutcome::Idle);
}

#[test]
fn test_build_controller_rejects_invalid_config() {
    let cfg = ControllerConfig {
        mem_floor_mb: 0,
        ..ControllerConfig::default()
    };
    let result = build_controller(
        &cfg,
        |_| Ok(ScriptedSensor::default()),
        |cfg| Ok(ChildSupervisor::new(&cfg.workload_program)),
    );
    assert!(matches!(result, Err(ControllerError::InvalidConfig(_))));
}
