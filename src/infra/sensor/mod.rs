//! Resource sensor backends.

pub mod procfs;
pub mod scripted;

pub use procfs::ProcSensor;
pub use scripted::ScriptedSensor;
