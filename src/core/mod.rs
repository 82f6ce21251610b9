//! Core admission abstractions, pool bookkeeping, and the decision loop.

pub mod controller;
pub mod error;
pub mod policy;
pub mod pool;
pub mod report;
pub mod workload;

pub use controller::AdmissionController;
pub use error::{AppResult, ControllerError};
pub use policy::{AdmissionPolicy, Decision};
pub use pool::{PoolSnapshot, RunningEntry, SharedPool, WorkloadPool};
pub use report::{CycleOutcome, CycleReport, InMemoryReportSink, LogReportSink, ReportSink};
pub use workload::{
    Demand, ProcessSupervisor, ResourceSensor, ResourceSnapshot, Workload, WorkloadId,
};
