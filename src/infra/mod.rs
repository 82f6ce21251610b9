//! Infrastructure adapters for resource sensing and process supervision.

pub mod sensor;
pub mod supervisor;

pub use sensor::{ProcSensor, ScriptedSensor};
pub use supervisor::ChildSupervisor;
