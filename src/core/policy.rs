//! Threshold-based admission policy.

use serde::{Deserialize, Serialize};

use crate::core::ResourceSnapshot;

/// What the controller does in a cycle. Exactly one action per cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Start the oldest waiting workload.
    Admit,
    /// Stop the oldest running workload.
    Evict,
    /// Nothing to do.
    Hold,
}

/// Binary admit/evict policy with no dead zone between the two thresholds.
///
/// A system sitting right at the boundary thrashes: an admission pushes the
/// load over, the next cycle evicts, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdmissionPolicy {
    /// Admission requires the load average strictly below this value.
    pub load_threshold: f64,
    /// Admission requires used memory (MiB) strictly below this value.
    pub mem_floor_mb: u64,
}

impl Default for AdmissionPolicy {
    fn default() -> Self {
        Self {
            load_threshold: 3.0,
            mem_floor_mb: 1700,
        }
    }
}

impl AdmissionPolicy {
    /// Create a policy from explicit limits.
    pub const fn new(load_threshold: f64, mem_floor_mb: u64) -> Self {
        Self {
            load_threshold,
            mem_floor_mb,
        }
    }

    /// Whether the snapshot leaves room for another workload.
    pub fn has_headroom(&self, snapshot: &ResourceSnapshot) -> bool {
        snapshot.load_average < self.load_threshold && snapshot.mem_used_mb < self.mem_floor_mb
    }

    /// Pure decision from the snapshot and the queue lengths.
    pub fn decide(&self, snapshot: &ResourceSnapshot, waiting: usize, running: usize) -> Decision {
        if self.has_headroom(snapshot) {
            if waiting > 0 {
                Decision::Admit
            } else {
                Decision::Hold
            }
        } else if running > 0 {
            Decision::Evict
        } else {
            Decision::Hold
        }
    }
}
