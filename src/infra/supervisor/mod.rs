//! Process supervisor backends.

pub mod child;

pub use child::ChildSupervisor;
