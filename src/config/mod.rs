//! Configuration models for the admission controller.

pub mod controller;

pub use controller::{ControllerConfig, CONFIG_PATH_ENV};
