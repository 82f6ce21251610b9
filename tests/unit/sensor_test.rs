//! Tests for the procfs sensor against the live system

use admission_control::core::ResourceSensor;
use admission_control::infra::ProcSensor;

#[cfg(target_os = "linux")]
#[test]
fn test_proc_sensor_reads_live_system() {
    let mut sensor = ProcSensor::new();
    let snapshot = sensor.read().unwrap();
    assert!(snapshot.load_average >= 0.0);
}

#[test]
fn test_proc_sensor_missing_files() {
    let mut sensor = ProcSensor::with_paths("/definitely/missing", "/definitely/missing");
    assert!(sensor.read().is_err());
}
