//! Per-cycle reports and the sinks that consume them.
//!
//! Provides a tracing-backed human-readable dump and a bounded in-memory
//! buffer for tests and observers.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::core::{Decision, PoolSnapshot, ResourceSnapshot, WorkloadId};

/// What a cycle actually did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum CycleOutcome {
    /// A workload moved from waiting to running.
    Admitted {
        /// Admitted workload.
        id: WorkloadId,
        /// Process id of the spawned workload, when known.
        pid: Option<u32>,
    },
    /// A workload moved from running back to waiting.
    Evicted {
        /// Evicted workload.
        id: WorkloadId,
    },
    /// No transition this cycle.
    Idle,
}

/// Everything observed and done in one controller cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleReport {
    /// Cycle number, starting at 1.
    pub round: u64,
    /// Wall-clock time of the sample, milliseconds since epoch.
    pub at_ms: u128,
    /// Sensor reading that drove the decision.
    pub resources: ResourceSnapshot,
    /// Policy output.
    pub decision: Decision,
    /// Transition applied.
    pub outcome: CycleOutcome,
    /// Pool state after the transition.
    pub pool: PoolSnapshot,
}

/// Consumer of cycle reports.
pub trait ReportSink: Send {
    /// Record a report.
    fn record(&mut self, report: &CycleReport);
}

/// Writes each report as a structured tracing event.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReportSink;

impl ReportSink for LogReportSink {
    fn record(&mut self, report: &CycleReport) {
        let running = report
            .pool
            .running_ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        tracing::info!(
            round = report.round,
            load = report.resources.load_average,
            mem_used_mb = report.resources.mem_used_mb,
            waiting = report.pool.waiting_count,
            cpu_used = report.pool.cpu_used,
            mem_used = report.pool.mem_used,
            "round {}: running [{}]",
            report.round,
            running
        );
    }
}

/// In-memory report buffer for testing and dev.
///
/// Clones share the same buffer, so a test can keep one clone while the
/// controller owns another.
#[derive(Debug, Clone)]
pub struct InMemoryReportSink {
    reports: Arc<Mutex<VecDeque<CycleReport>>>,
    max_reports: usize,
}

impl InMemoryReportSink {
    /// Create a sink that keeps the most recent `max_reports` reports.
    pub fn new(max_reports: usize) -> Self {
        Self {
            reports: Arc::new(Mutex::new(VecDeque::with_capacity(max_reports))),
            max_reports,
        }
    }

    /// Snapshot of stored reports, oldest first.
    pub fn reports(&self) -> Vec<CycleReport> {
        self.reports.lock().iter().cloned().collect()
    }

    /// Most recent report.
    pub fn last(&self) -> Option<CycleReport> {
        self.reports.lock().back().cloned()
    }
}

impl ReportSink for InMemoryReportSink {
    fn record(&mut self, report: &CycleReport) {
        if self.max_reports == 0 {
            return;
        }
        let mut reports = self.reports.lock();
        if reports.len() >= self.max_reports {
            reports.pop_front();
        }
        reports.push_back(report.clone());
    }
}
