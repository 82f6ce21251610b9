//! Tests for error types

use admission_control::core::ControllerError;

#[test]
fn test_empty_waiting_queue_error() {
    let err = ControllerError::EmptyWaitingQueue;
    assert_eq!(format!("{}", err), "waiting queue is empty");
}

#[test]
fn test_empty_running_queue_error() {
    let err = ControllerError::EmptyRunningQueue;
    assert_eq!(format!("{}", err), "running queue is empty");
}

#[test]
fn test_spawn_failure_error() {
    let err = ControllerError::SpawnFailure("./process: not found".to_string());
    assert_eq!(format!("{}", err), "spawn failure: ./process: not found");
}

#[test]
fn test_sensor_failure_error() {
    let err = ControllerError::SensorFailure("bad loadavg".to_string());
    assert_eq!(format!("{}", err), "sensor failure: bad loadavg");
}

#[test]
fn test_converts_into_anyhow() {
    let err: anyhow::Error = ControllerError::TerminationFailure("pid 7".into()).into();
    assert_eq!(err.to_string(), "termination failure: pid 7");
}
