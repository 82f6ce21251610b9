//! Builders to construct the workload pool and controller from configuration.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::ControllerConfig;
use crate::core::{
    AdmissionController, ControllerError, ProcessSupervisor, ResourceSensor, Workload, WorkloadId,
    WorkloadPool,
};

/// Create `size` workloads with ids `0..size` and uniform demands in `[0, 1)`.
pub fn random_workloads<R: Rng + ?Sized>(
    size: usize,
    rng: &mut R,
) -> Result<Vec<Workload>, ControllerError> {
    let size = WorkloadId::try_from(size)
        .map_err(|_| ControllerError::InvalidConfig(format!("pool size {size} too large")))?;
    (0..size)
        .map(|id| Workload::new(id, rng.random::<f64>(), rng.random::<f64>()))
        .collect()
}

/// Build a pool of `cfg.pool_size` random workloads, seeded when `cfg.seed` is set.
pub fn build_pool<H>(cfg: &ControllerConfig) -> Result<WorkloadPool<H>, ControllerError> {
    let workloads = match cfg.seed {
        Some(seed) => random_workloads(cfg.pool_size, &mut StdRng::seed_from_u64(seed))?,
        None => random_workloads(cfg.pool_size, &mut rand::rng())?,
    };
    tracing::info!("created pool of {} workloads", workloads.len());
    Ok(WorkloadPool::new(workloads))
}

/// Build a controller from configuration using the provided collaborator factories.
pub fn build_controller<S, V, FS, FV>(
    cfg: &ControllerConfig,
    sensor_factory: FS,
    supervisor_factory: FV,
) -> Result<AdmissionController<S, V>, ControllerError>
where
    S: ResourceSensor,
    V: ProcessSupervisor,
    FS: FnOnce(&ControllerConfig) -> Result<S, ControllerError>,
    FV: FnOnce(&ControllerConfig) -> Result<V, ControllerError>,
{
    cfg.validate().map_err(ControllerError::InvalidConfig)?;

    let pool = build_pool(cfg)?;
    let sensor = sensor_factory(cfg)?;
    let supervisor = supervisor_factory(cfg)?;
    Ok(AdmissionController::new(cfg.policy(), pool, sensor, supervisor))
}
