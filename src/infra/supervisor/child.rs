//! Supervisor backed by real OS processes.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
#[cfg(unix)]
use std::os::unix::process::CommandExt;

use crate::core::{ControllerError, Demand, ProcessSupervisor};

/// Spawns `<program> <cpu%> <mem%>` for each admitted workload.
///
/// Termination kills the child and reaps it. A child that already exited is
/// reported as `TerminationFailure`.
#[derive(Debug, Clone)]
pub struct ChildSupervisor {
    program: PathBuf,
}

impl ChildSupervisor {
    /// Supervisor launching `program` for every workload.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Executable launched per workload.
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl ProcessSupervisor for ChildSupervisor {
    type Handle = Child;

    fn spawn(&mut self, demand: Demand) -> Result<Child, ControllerError> {
        let (cpu, mem) = (demand.cpu_percent(), demand.mem_percent());
        let mut command = Command::new(&self.program);
        command
            .arg(cpu.to_string())
            .arg(mem.to_string())
            .stdin(Stdio::null());
        // Own process group: a terminal interrupt reaches the controller only,
        // which then drains its children itself.
        #[cfg(unix)]
        command.process_group(0);
        let child = command
            .spawn()
            .map_err(|e| {
                ControllerError::SpawnFailure(format!("{} {cpu} {mem}: {e}", self.program.display()))
            })?;
        tracing::debug!("spawned {} {} {} as pid {}", self.program.display(), cpu, mem, child.id());
        Ok(child)
    }

    fn terminate(&mut self, mut handle: Child) -> Result<(), ControllerError> {
        let pid = handle.id();
        match handle.try_wait() {
            Ok(Some(status)) => {
                return Err(ControllerError::TerminationFailure(format!(
                    "pid {pid} already exited ({status})"
                )));
            }
            Ok(None) => {}
            Err(e) => {
                return Err(ControllerError::TerminationFailure(format!("pid {pid}: {e}")));
            }
        }
        handle
            .kill()
            .map_err(|e| ControllerError::TerminationFailure(format!("kill pid {pid}: {e}")))?;
        handle
            .wait()
            .map_err(|e| ControllerError::TerminationFailure(format!("reap pid {pid}: {e}")))?;
        tracing::debug!("killed pid {}", pid);
        Ok(())
    }

    fn pid(&self, handle: &Child) -> Option<u32> {
        Some(handle.id())
    }
}
