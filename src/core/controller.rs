//! Admission controller: sample, decide, transition, report.

use crate::core::{
    AdmissionPolicy, ControllerError, CycleOutcome, CycleReport, Decision, ProcessSupervisor,
    ReportSink, ResourceSensor, SharedPool, WorkloadPool,
};
use crate::util::clock::now_ms;

/// Drives one pool through admit/evict cycles.
///
/// Each cycle performs at most one transition. The pool lock is held for the
/// whole transition, including the spawn or kill, so concurrent
/// [`SharedPool::snapshot`] callers always see a conserved pool.
pub struct AdmissionController<S, V>
where
    V: ProcessSupervisor,
{
    policy: AdmissionPolicy,
    pool: SharedPool<V::Handle>,
    sensor: S,
    supervisor: V,
    sinks: Vec<Box<dyn ReportSink>>,
    round: u64,
}

impl<S, V> AdmissionController<S, V>
where
    S: ResourceSensor,
    V: ProcessSupervisor,
{
    /// Create a controller owning `pool`.
    pub fn new(policy: AdmissionPolicy, pool: WorkloadPool<V::Handle>, sensor: S, supervisor: V) -> Self {
        Self {
            policy,
            pool: SharedPool::new(pool),
            sensor,
            supervisor,
            sinks: Vec::new(),
            round: 0,
        }
    }

    /// Attach a report sink. Every cycle report is fanned out to all sinks.
    #[must_use]
    pub fn with_report_sink(mut self, sink: impl ReportSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Handle to the pool for concurrent observers.
    pub fn pool(&self) -> SharedPool<V::Handle> {
        self.pool.clone()
    }

    /// Active policy.
    pub const fn policy(&self) -> &AdmissionPolicy {
        &self.policy
    }

    /// Number of cycles started so far.
    pub const fn rounds(&self) -> u64 {
        self.round
    }

    /// The process supervisor.
    pub const fn supervisor(&self) -> &V {
        &self.supervisor
    }

    /// Run one cycle. Fatal collaborator failures propagate.
    pub fn run_cycle(&mut self) -> Result<CycleReport, ControllerError> {
        self.round += 1;
        let resources = self.sensor.read().inspect_err(|e| {
            tracing::error!("round {}: sensor read failed: {}", self.round, e);
        })?;

        let (decision, outcome, snapshot) = {
            let mut pool = self.pool.lock();
            let decision = self
                .policy
                .decide(&resources, pool.waiting_len(), pool.running_len());
            let outcome = match decision {
                Decision::Admit => Self::admit(&mut pool, &mut self.supervisor)?,
                Decision::Evict => {
                    tracing::warn!(
                        "round {}: under pressure (load={}, mem={}MB)",
                        self.round,
                        resources.load_average,
                        resources.mem_used_mb
                    );
                    Self::evict(&mut pool, &mut self.supervisor)?
                }
                Decision::Hold => {
                    tracing::debug!("round {}: nothing to do", self.round);
                    CycleOutcome::Idle
                }
            };
            (decision, outcome, pool.snapshot())
        };

        let report = CycleReport {
            round: self.round,
            at_ms: now_ms(),
            resources,
            decision,
            outcome,
            pool: snapshot,
        };
        for sink in &mut self.sinks {
            sink.record(&report);
        }
        Ok(report)
    }

    /// Run `cycles` cycles back to back, without pacing.
    pub fn run_cycles(&mut self, cycles: usize) -> Result<Vec<CycleReport>, ControllerError> {
        (0..cycles).map(|_| self.run_cycle()).collect()
    }

    /// Evict every running workload, terminating its process.
    ///
    /// A failed termination does not stop the drain: every remaining entry is
    /// still terminated and returned to `waiting`, then the first error is
    /// returned. Otherwise returns the number of workloads stopped.
    pub fn drain(&mut self) -> Result<usize, ControllerError> {
        let mut pool = self.pool.lock();
        let mut stopped = 0;
        let mut first_err = None;
        while pool.running_len() > 0 {
            match Self::evict(&mut pool, &mut self.supervisor) {
                Ok(_) => stopped += 1,
                Err(e) => {
                    first_err.get_or_insert(e);
                }
            }
        }
        first_err.map_or(Ok(stopped), Err)
    }

    fn admit(
        pool: &mut WorkloadPool<V::Handle>,
        supervisor: &mut V,
    ) -> Result<CycleOutcome, ControllerError> {
        let workload = match pool.admit() {
            Ok(workload) => workload,
            Err(e) if !e.is_fatal() => {
                tracing::debug!("admit skipped: {}", e);
                return Ok(CycleOutcome::Idle);
            }
            Err(e) => return Err(e),
        };

        match supervisor.spawn(workload.demand()) {
            Ok(handle) => {
                let id = workload.id();
                let pid = supervisor.pid(&handle);
                tracing::info!(
                    "admitted workload {} (pid {:?}, cpu={:.2}, mem={:.2})",
                    id,
                    pid,
                    workload.cpu_demand(),
                    workload.mem_demand()
                );
                pool.record_running(workload, handle);
                Ok(CycleOutcome::Admitted { id, pid })
            }
            Err(e) => {
                tracing::error!("failed to spawn workload {}: {}", workload.id(), e);
                pool.restore_head(workload);
                Err(e)
            }
        }
    }

    fn evict(
        pool: &mut WorkloadPool<V::Handle>,
        supervisor: &mut V,
    ) -> Result<CycleOutcome, ControllerError> {
        let entry = match pool.evict() {
            Ok(entry) => entry,
            Err(e) if !e.is_fatal() => {
                tracing::debug!("evict skipped: {}", e);
                return Ok(CycleOutcome::Idle);
            }
            Err(e) => return Err(e),
        };

        let id = entry.workload.id();
        let pid = supervisor.pid(&entry.handle);
        let result = supervisor.terminate(entry.handle);
        pool.return_to_waiting(entry.workload);
        match result {
            Ok(()) => {
                tracing::info!("evicted workload {} (pid {:?})", id, pid);
                Ok(CycleOutcome::Evicted { id })
            }
            Err(e) => {
                tracing::error!("failed to terminate workload {}: {}", id, e);
                Err(e)
            }
        }
    }
}
