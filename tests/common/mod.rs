//! Shared test doubles.

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::Arc;

use admission_control::core::{
    AdmissionController, AdmissionPolicy, ControllerError, Demand, ProcessSupervisor, Workload,
    WorkloadPool,
};
use admission_control::infra::ScriptedSensor;
use parking_lot::Mutex;

/// Handle issued by [`FakeSupervisor`].
#[derive(Debug)]
pub struct FakeProcess {
    pub pid: u32,
}

#[derive(Debug, Default)]
pub struct FakeState {
    next_pid: u32,
    pub alive: BTreeSet<u32>,
    pub spawned: Vec<(u32, u32)>,
    pub killed: Vec<u32>,
    pub fail_spawn: bool,
    pub fail_terminate: bool,
}

/// In-memory supervisor; clones share state so tests can inspect it.
#[derive(Debug, Clone, Default)]
pub struct FakeSupervisor {
    pub state: Arc<Mutex<FakeState>>,
}

impl FakeSupervisor {
    pub fn alive(&self) -> usize {
        self.state.lock().alive.len()
    }

    pub fn killed(&self) -> Vec<u32> {
        self.state.lock().killed.clone()
    }

    pub fn spawned(&self) -> Vec<(u32, u32)> {
        self.state.lock().spawned.clone()
    }
}

impl ProcessSupervisor for FakeSupervisor {
    type Handle = FakeProcess;

    fn spawn(&mut self, demand: Demand) -> Result<FakeProcess, ControllerError> {
        let mut state = self.state.lock();
        if state.fail_spawn {
            return Err(ControllerError::SpawnFailure("fork refused".into()));
        }
        state.next_pid += 1;
        let pid = 1000 + state.next_pid;
        state.alive.insert(pid);
        state.spawned.push((demand.cpu_percent(), demand.mem_percent()));
        Ok(FakeProcess { pid })
    }

    fn terminate(&mut self, handle: FakeProcess) -> Result<(), ControllerError> {
        let mut state = self.state.lock();
        if state.fail_terminate || !state.alive.remove(&handle.pid) {
            return Err(ControllerError::TerminationFailure(format!(
                "no such process {}",
                handle.pid
            )));
        }
        state.killed.push(handle.pid);
        Ok(())
    }

    fn pid(&self, handle: &FakeProcess) -> Option<u32> {
        Some(handle.pid)
    }
}

pub fn workloads(demands: &[(f64, f64)]) -> Vec<Workload> {
    demands
        .iter()
        .zip(0..)
        .map(|(&(cpu, mem), id)| Workload::new(id, cpu, mem).unwrap())
        .collect()
}

pub type TestController = AdmissionController<ScriptedSensor, FakeSupervisor>;

/// Controller over the given demands with default thresholds (3.0 / 1700 MB).
pub fn controller(
    demands: &[(f64, f64)],
    sensor: ScriptedSensor,
) -> (TestController, FakeSupervisor) {
    let supervisor = FakeSupervisor::default();
    let controller = AdmissionController::new(
        AdmissionPolicy::default(),
        WorkloadPool::new(workloads(demands)),
        sensor,
        supervisor.clone(),
    );
    (controller, supervisor)
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
