//! Workload pool: FIFO waiting/running sequences with incremental accounting.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use serde::{Deserialize, Serialize};

use crate::core::{ControllerError, Workload, WorkloadId};

/// A running workload paired with the handle of its live process.
#[derive(Debug)]
pub struct RunningEntry<H> {
    /// The admitted workload.
    pub workload: Workload,
    /// Handle to the process consuming the workload's demand.
    pub handle: H,
}

/// Read-only view of the pool used for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    /// Ids of running workloads, oldest admission first.
    pub running_ids: Vec<WorkloadId>,
    /// Number of workloads waiting for admission.
    pub waiting_count: usize,
    /// Sum of CPU demand over the running set.
    pub cpu_used: f64,
    /// Sum of memory demand over the running set.
    pub mem_used: f64,
}

/// Fixed-size pool of workloads split between a waiting and a running queue.
///
/// Both queues are FIFO. `cpu_used`/`mem_used` track the running set and are
/// updated on every transition rather than recomputed.
#[derive(Debug)]
pub struct WorkloadPool<H> {
    size: usize,
    waiting: VecDeque<Workload>,
    running: VecDeque<RunningEntry<H>>,
    cpu_used: f64,
    mem_used: f64,
}

impl<H> WorkloadPool<H> {
    /// Create a pool with every workload waiting, in the given order.
    pub fn new(workloads: Vec<Workload>) -> Self {
        let size = workloads.len();
        Self {
            size,
            waiting: workloads.into(),
            running: VecDeque::with_capacity(size),
            cpu_used: 0.0,
            mem_used: 0.0,
        }
    }

    /// Pop the oldest waiting workload.
    ///
    /// The caller owns the workload until it hands it back through
    /// [`record_running`](Self::record_running) after a successful spawn.
    pub fn admit(&mut self) -> Result<Workload, ControllerError> {
        self.waiting
            .pop_front()
            .ok_or(ControllerError::EmptyWaitingQueue)
    }

    /// Append a freshly spawned workload to the running queue.
    pub fn record_running(&mut self, workload: Workload, handle: H) {
        self.cpu_used += workload.cpu_demand();
        self.mem_used += workload.mem_demand();
        self.running.push_back(RunningEntry { workload, handle });
    }

    /// Pop the oldest running entry and release its demand.
    ///
    /// The caller must terminate the handle and then call
    /// [`return_to_waiting`](Self::return_to_waiting).
    pub fn evict(&mut self) -> Result<RunningEntry<H>, ControllerError> {
        let entry = self
            .running
            .pop_front()
            .ok_or(ControllerError::EmptyRunningQueue)?;
        if self.running.is_empty() {
            // Avoid carrying float residue once nothing runs.
            self.cpu_used = 0.0;
            self.mem_used = 0.0;
        } else {
            self.cpu_used -= entry.workload.cpu_demand();
            self.mem_used -= entry.workload.mem_demand();
        }
        Ok(entry)
    }

    /// Append an evicted workload to the tail of the waiting queue.
    pub fn return_to_waiting(&mut self, workload: Workload) {
        self.waiting.push_back(workload);
    }

    /// Put a workload back at the head of the waiting queue after a failed spawn.
    pub(crate) fn restore_head(&mut self, workload: Workload) {
        self.waiting.push_front(workload);
    }

    /// Reporting view; no side effects.
    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            running_ids: self.running_ids(),
            waiting_count: self.waiting.len(),
            cpu_used: self.cpu_used,
            mem_used: self.mem_used,
        }
    }

    /// Fixed number of workloads owned by the pool.
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Number of waiting workloads.
    pub fn waiting_len(&self) -> usize {
        self.waiting.len()
    }

    /// Number of running workloads.
    pub fn running_len(&self) -> usize {
        self.running.len()
    }

    /// Aggregate CPU demand of the running set.
    pub const fn cpu_used(&self) -> f64 {
        self.cpu_used
    }

    /// Aggregate memory demand of the running set.
    pub const fn mem_used(&self) -> f64 {
        self.mem_used
    }

    /// Ids of waiting workloads, head first.
    pub fn waiting_ids(&self) -> Vec<WorkloadId> {
        self.waiting.iter().map(Workload::id).collect()
    }

    /// Ids of running workloads, oldest admission first.
    pub fn running_ids(&self) -> Vec<WorkloadId> {
        self.running.iter().map(|e| e.workload.id()).collect()
    }

    /// Iterate over running entries, oldest admission first.
    pub fn running(&self) -> impl Iterator<Item = &RunningEntry<H>> {
        self.running.iter()
    }

    /// Recompute `(cpu, mem)` by scanning the running set.
    ///
    /// Verification aid only; the transition path never calls it.
    pub fn recomputed_usage(&self) -> (f64, f64) {
        self.running.iter().fold((0.0, 0.0), |(cpu, mem), e| {
            (cpu + e.workload.cpu_demand(), mem + e.workload.mem_demand())
        })
    }
}

/// Pool shared between the controller and concurrent observers.
///
/// Every transition and every snapshot goes through the same mutex, so an
/// observer never sees a workload in flight between the two queues.
#[derive(Debug)]
pub struct SharedPool<H> {
    inner: Arc<Mutex<WorkloadPool<H>>>,
}

impl<H> Clone for SharedPool<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<H> SharedPool<H> {
    /// Wrap a pool for shared access.
    pub fn new(pool: WorkloadPool<H>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(pool)),
        }
    }

    /// Lock the pool for a whole transition.
    pub fn lock(&self) -> MutexGuard<'_, WorkloadPool<H>> {
        self.inner.lock()
    }

    /// Consistent reporting view.
    pub fn snapshot(&self) -> PoolSnapshot {
        self.inner.lock().snapshot()
    }
}
