//! Runtime adapters that drive the controller on tokio.

pub mod driver;

pub use driver::{ControllerDriver, RunSummary};
