//! Tokio driver that paces the controller and stops it on cancellation.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::core::{AdmissionController, ControllerError, ProcessSupervisor, ResourceSensor};

/// How a driver run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Cycles completed during this run.
    pub cycles: u64,
    /// Workloads terminated by the final drain.
    pub drained: usize,
}

/// Runs controller cycles with a fixed pause in between.
///
/// Cancellation is observed at cycle boundaries only; a cycle in progress
/// always completes. On exit every running workload is evicted so no spawned
/// process outlives the driver.
#[derive(Debug, Clone)]
pub struct ControllerDriver {
    interval: Duration,
    max_cycles: Option<u64>,
    cancel: CancellationToken,
}

impl ControllerDriver {
    /// Driver pausing `interval` between cycles.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            max_cycles: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Stop after `cycles` cycles.
    #[must_use]
    pub fn with_max_cycles(mut self, cycles: u64) -> Self {
        self.max_cycles = Some(cycles);
        self
    }

    /// Use an externally owned cancellation token.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Token that stops the driver at the next cycle boundary.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run until cancelled, the cycle limit is hit, or a fatal error occurs.
    ///
    /// Fatal errors propagate immediately without draining.
    pub async fn run<S, V>(
        &self,
        controller: &mut AdmissionController<S, V>,
    ) -> Result<RunSummary, ControllerError>
    where
        S: ResourceSensor,
        V: ProcessSupervisor,
    {
        let mut cycles = 0;
        loop {
            if self.cancel.is_cancelled() {
                tracing::info!("cancellation requested, stopping after {} cycles", cycles);
                break;
            }
            if self.limit_reached(cycles) {
                break;
            }

            controller.run_cycle()?;
            cycles += 1;
            if self.limit_reached(cycles) {
                break;
            }

            tokio::select! {
                () = self.cancel.cancelled() => {}
                () = tokio::time::sleep(self.interval) => {}
            }
        }

        let drained = controller.drain()?;
        tracing::info!("driver stopped: {} cycles, {} workloads drained", cycles, drained);
        Ok(RunSummary { cycles, drained })
    }

    fn limit_reached(&self, cycles: u64) -> bool {
        self.max_cycles.is_some_and(|max| cycles >= max)
    }
}
