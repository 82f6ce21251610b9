//! Admission controller binary: samples procfs and supervises workload processes.

use admission_control::builders::build_controller;
use admission_control::config::ControllerConfig;
use admission_control::core::{AppResult, LogReportSink};
use admission_control::infra::{ChildSupervisor, ProcSensor};
use admission_control::runtime::ControllerDriver;
use admission_control::util::init_tracing;

#[tokio::main]
async fn main() -> AppResult<()> {
    init_tracing();

    let config = ControllerConfig::from_env()?;
    tracing::info!(
        "starting admission controller v{}: {:?}",
        env!("CARGO_PKG_VERSION"),
        config
    );

    let mut controller = build_controller(
        &config,
        |_| Ok(ProcSensor::new()),
        |cfg| Ok(ChildSupervisor::new(&cfg.workload_program)),
    )?
    .with_report_sink(LogReportSink);

    let driver = ControllerDriver::new(config.poll_interval());
    let cancel = driver.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("received interrupt, stopping at next cycle boundary");
            cancel.cancel();
        }
    });

    match driver.run(&mut controller).await {
        Ok(summary) => {
            tracing::info!("stopped after {} cycles", summary.cycles);
            Ok(())
        }
        Err(e) => {
            tracing::error!("admission loop aborted: {}", e);
            Err(e.into())
        }
    }
}
