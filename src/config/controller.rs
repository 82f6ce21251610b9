//! Controller configuration: defaults, validation, JSON and environment loading.

use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::{AdmissionPolicy, AppResult};

/// Environment variable naming a JSON config file loaded before overrides.
pub const CONFIG_PATH_ENV: &str = "ADMISSION_CONFIG";

/// Admission controller configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Admission requires the one-minute load average below this value.
    pub load_threshold: f64,
    /// Admission requires used memory (MiB) below this value.
    pub mem_floor_mb: u64,
    /// Pause between cycles, in seconds.
    pub poll_interval_secs: f64,
    /// Number of workloads created at startup.
    pub pool_size: usize,
    /// Executable spawned for each admitted workload.
    pub workload_program: String,
    /// Seed for workload demands; random when absent.
    pub seed: Option<u64>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            load_threshold: 3.0,
            mem_floor_mb: 1700,
            poll_interval_secs: 2.0,
            pool_size: 20,
            workload_program: "./process".into(),
            seed: None,
        }
    }
}

impl ControllerConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if !self.load_threshold.is_finite() || self.load_threshold <= 0.0 {
            return Err("load_threshold must be a positive number".into());
        }
        if self.mem_floor_mb == 0 {
            return Err("mem_floor_mb must be greater than 0".into());
        }
        if !self.poll_interval_secs.is_finite() || self.poll_interval_secs < 0.0 {
            return Err("poll_interval_secs must be a non-negative number".into());
        }
        if self.pool_size == 0 {
            return Err("pool_size must be greater than 0".into());
        }
        if self.workload_program.trim().is_empty() {
            return Err("workload_program must not be empty".into());
        }
        Ok(())
    }

    /// Parse configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load configuration from `.env`, an optional JSON file named by
    /// `ADMISSION_CONFIG`, and `ADMISSION_*` variable overrides.
    pub fn from_env() -> AppResult<Self> {
        tolerate_missing(dotenvy::dotenv())?;
        Self::from_sources(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through `lookup`: start from defaults, or from
    /// the JSON file named by `ADMISSION_CONFIG`, then apply `ADMISSION_*`
    /// overrides and validate.
    pub fn from_sources(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let mut cfg = match lookup(CONFIG_PATH_ENV) {
            Some(path) => {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config file {path}"))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("failed to parse config file {path}"))?
            }
            None => Self::default(),
        };
        cfg.apply_overrides(lookup)?;
        cfg.validate().map_err(anyhow::Error::msg)?;
        Ok(cfg)
    }

    /// Override fields from `ADMISSION_*` keys resolved through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> AppResult<()> {
        if let Some(v) = parse_var(&lookup, "ADMISSION_LOAD_THRESHOLD")? {
            self.load_threshold = v;
        }
        if let Some(v) = parse_var(&lookup, "ADMISSION_MEM_FLOOR_MB")? {
            self.mem_floor_mb = v;
        }
        if let Some(v) = parse_var(&lookup, "ADMISSION_POLL_INTERVAL_SECS")? {
            self.poll_interval_secs = v;
        }
        if let Some(v) = parse_var(&lookup, "ADMISSION_POOL_SIZE")? {
            self.pool_size = v;
        }
        if let Some(v) = lookup("ADMISSION_WORKLOAD_PROGRAM") {
            self.workload_program = v;
        }
        if let Some(v) = parse_var(&lookup, "ADMISSION_SEED")? {
            self.seed = Some(v);
        }
        Ok(())
    }

    /// Admission policy derived from the thresholds.
    pub const fn policy(&self) -> AdmissionPolicy {
        AdmissionPolicy::new(self.load_threshold, self.mem_floor_mb)
    }

    /// Pause between cycles.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs_f64(self.poll_interval_secs)
    }
}

/// A missing `.env` file is fine; an unreadable or malformed one is not.
fn tolerate_missing<T>(loaded: dotenvy::Result<T>) -> AppResult<()> {
    match loaded {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e).context("failed to load .env"),
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> AppResult<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("invalid value for {key}: `{raw}`"))
        })
        .transpose()
}
