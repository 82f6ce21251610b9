//! Linux procfs sensor.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{ControllerError, ResourceSensor, ResourceSnapshot};

const KIB_PER_MIB: u64 = 1024;

/// Reads the one-minute load average from `/proc/loadavg` and used memory
/// from `/proc/meminfo`.
#[derive(Debug, Clone)]
pub struct ProcSensor {
    loadavg_path: PathBuf,
    meminfo_path: PathBuf,
}

impl Default for ProcSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcSensor {
    /// Sensor over the standard procfs locations.
    pub fn new() -> Self {
        Self::with_paths("/proc/loadavg", "/proc/meminfo")
    }

    /// Sensor over alternate files with the same formats.
    pub fn with_paths(loadavg: impl Into<PathBuf>, meminfo: impl Into<PathBuf>) -> Self {
        Self {
            loadavg_path: loadavg.into(),
            meminfo_path: meminfo.into(),
        }
    }

    fn read_file(path: &Path) -> Result<String, ControllerError> {
        fs::read_to_string(path)
            .map_err(|e| ControllerError::SensorFailure(format!("{}: {e}", path.display())))
    }
}

impl ResourceSensor for ProcSensor {
    fn read(&mut self) -> Result<ResourceSnapshot, ControllerError> {
        let load_average = parse_loadavg(&Self::read_file(&self.loadavg_path)?)?;
        let mem_used_mb = parse_meminfo_used_mb(&Self::read_file(&self.meminfo_path)?)?;
        tracing::trace!("sampled load={} mem_used={}MB", load_average, mem_used_mb);
        Ok(ResourceSnapshot {
            load_average,
            mem_used_mb,
        })
    }
}

/// First field of `/proc/loadavg`.
pub(crate) fn parse_loadavg(input: &str) -> Result<f64, ControllerError> {
    let field = input
        .split_whitespace()
        .next()
        .ok_or_else(|| ControllerError::SensorFailure("empty loadavg".into()))?;
    field
        .parse::<f64>()
        .map_err(|e| ControllerError::SensorFailure(format!("bad loadavg `{field}`: {e}")))
}

/// Used memory in MiB: `MemTotal - MemAvailable`, or
/// `MemTotal - MemFree - Buffers - Cached` on kernels without `MemAvailable`.
pub(crate) fn parse_meminfo_used_mb(input: &str) -> Result<u64, ControllerError> {
    let field = |name: &str| -> Result<Option<u64>, ControllerError> {
        let Some(line) = input
            .lines()
            .find(|line| line.split(':').next() == Some(name))
        else {
            return Ok(None);
        };
        let value = line
            .split_whitespace()
            .nth(1)
            .ok_or_else(|| ControllerError::SensorFailure(format!("missing value for {name}")))?;
        value
            .parse::<u64>()
            .map(Some)
            .map_err(|e| ControllerError::SensorFailure(format!("bad {name} `{value}`: {e}")))
    };

    let total = field("MemTotal")?
        .ok_or_else(|| ControllerError::SensorFailure("MemTotal not found".into()))?;
    let available = match field("MemAvailable")? {
        Some(available) => available,
        None => {
            let free = field("MemFree")?
                .ok_or_else(|| ControllerError::SensorFailure("MemFree not found".into()))?;
            free + field("Buffers")?.unwrap_or(0) + field("Cached")?.unwrap_or(0)
        }
    };
    Ok(total.saturating_sub(available) / KIB_PER_MIB)
}
