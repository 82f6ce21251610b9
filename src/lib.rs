//! # Admission Control
//!
//! A single-node, load-aware admission controller for simulated workloads.
//!
//! A fixed pool of workloads competes for CPU and memory. Every cycle the
//! controller samples the system load, then either admits the oldest waiting
//! workload (spawning a process sized to its demand) or evicts the oldest
//! running one (killing its process). Exactly one action happens per cycle.
//!
//! ## Key Pieces
//!
//! - **`WorkloadPool`**: FIFO waiting and running queues with incremental
//!   CPU/memory accounting of the running set
//! - **`AdmissionPolicy`**: strict thresholds on load average and used memory,
//!   with no hysteresis
//! - **`AdmissionController`**: the sample/decide/transition/report cycle
//! - **`ResourceSensor`** / **`ProcessSupervisor`**: seams for the system load
//!   source and the process backend, with procfs and `std::process` adapters
//! - **`ControllerDriver`**: tokio pacing with cancellation at cycle boundaries
//!
//! ```rust,no_run
//! use admission_control::core::{AdmissionController, AdmissionPolicy, ResourceSnapshot, WorkloadPool, Workload};
//! use admission_control::infra::{ChildSupervisor, ScriptedSensor};
//!
//! let workloads = vec![Workload::new(0, 0.1, 0.1).unwrap()];
//! let mut controller = AdmissionController::new(
//!     AdmissionPolicy::default(),
//!     WorkloadPool::new(workloads),
//!     ScriptedSensor::constant(ResourceSnapshot::new(0.5, 800)),
//!     ChildSupervisor::new("./process"),
//! );
//! let report = controller.run_cycle().unwrap();
//! println!("{:?}", report.outcome);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core admission abstractions, pool bookkeeping, and the decision loop.
pub mod core;
/// Configuration model, validation, and loading.
pub mod config;
/// Builders to construct controller components from configuration.
pub mod builders;
/// Infrastructure adapters for sensors and process supervisors.
pub mod infra;
/// Tokio runtime driver.
pub mod runtime;
/// Shared utilities.
pub mod util;
