//! Workload model and the collaborator contracts that act on it.

use serde::{Deserialize, Serialize};

use crate::core::ControllerError;

/// Stable identifier of a workload within one pool.
pub type WorkloadId = u32;

/// Resource demand expressed as fractions of nominal system capacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Demand {
    /// CPU share in `[0, 1)`.
    pub cpu: f64,
    /// Memory share in `[0, 1)`.
    pub mem: f64,
}

impl Demand {
    /// Build a demand, rejecting values outside `[0, 1)` or non-finite ones.
    pub fn new(cpu: f64, mem: f64) -> Result<Self, ControllerError> {
        for value in [cpu, mem] {
            if !(0.0..1.0).contains(&value) {
                return Err(ControllerError::InvalidDemand(value));
            }
        }
        Ok(Self { cpu, mem })
    }

    /// CPU demand in whole percentage points, as passed to the workload process.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn cpu_percent(&self) -> u32 {
        (self.cpu * 100.0).round() as u32
    }

    /// Memory demand in whole percentage points.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn mem_percent(&self) -> u32 {
        (self.mem * 100.0).round() as u32
    }
}

/// A simulated unit of CPU and memory demand. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workload {
    id: WorkloadId,
    demand: Demand,
}

impl Workload {
    /// Create a workload with validated demands.
    pub fn new(id: WorkloadId, cpu: f64, mem: f64) -> Result<Self, ControllerError> {
        Ok(Self {
            id,
            demand: Demand::new(cpu, mem)?,
        })
    }

    /// Workload identifier.
    pub const fn id(&self) -> WorkloadId {
        self.id
    }

    /// Declared demand.
    pub const fn demand(&self) -> Demand {
        self.demand
    }

    /// CPU fraction.
    pub const fn cpu_demand(&self) -> f64 {
        self.demand.cpu
    }

    /// Memory fraction.
    pub const fn mem_demand(&self) -> f64 {
        self.demand.mem
    }
}

/// Point-in-time system load reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    /// One-minute load average.
    pub load_average: f64,
    /// Used memory in MiB.
    pub mem_used_mb: u64,
}

impl ResourceSnapshot {
    /// Convenience constructor.
    pub const fn new(load_average: f64, mem_used_mb: u64) -> Self {
        Self {
            load_average,
            mem_used_mb,
        }
    }
}

/// Source of live system load readings.
///
/// Implementations may block; the controller calls `read` once per cycle and
/// treats any error as fatal.
pub trait ResourceSensor: Send {
    /// Sample the current load average and used memory.
    fn read(&mut self) -> Result<ResourceSnapshot, ControllerError>;
}

/// Spawns and kills the external processes backing running workloads.
///
/// The supervisor only sees the demand it was handed at spawn time; it never
/// inspects the pool.
pub trait ProcessSupervisor: Send {
    /// Opaque handle to a live process.
    type Handle: Send;

    /// Launch a process sized to `demand`.
    fn spawn(&mut self, demand: Demand) -> Result<Self::Handle, ControllerError>;

    /// Kill the process behind `handle`.
    fn terminate(&mut self, handle: Self::Handle) -> Result<(), ControllerError>;

    /// OS process id for reporting, if the handle has one.
    fn pid(&self, _handle: &Self::Handle) -> Option<u32> {
        None
    }
}
