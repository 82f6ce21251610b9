//! Builders to construct controller components from configuration.

pub mod controller_builder;

pub use controller_builder::{build_controller, build_pool, random_workloads};
