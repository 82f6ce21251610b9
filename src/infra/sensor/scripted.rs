//! Synthetic sensor that replays prepared readings.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::{ControllerError, ResourceSensor, ResourceSnapshot};

/// Replays a queue of snapshots, one per `read`.
///
/// Once the queue runs dry the sensor either keeps returning the last reading
/// (when built with [`repeat_last`](Self::repeat_last)) or fails with
/// `SensorFailure`. Clones share the queue, so a test can push readings while
/// the controller owns the sensor.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSensor {
    readings: Arc<Mutex<VecDeque<ResourceSnapshot>>>,
    last: Arc<Mutex<Option<ResourceSnapshot>>>,
    repeat_last: bool,
}

impl ScriptedSensor {
    /// Sensor that returns `readings` in order.
    pub fn new(readings: impl IntoIterator<Item = ResourceSnapshot>) -> Self {
        Self {
            readings: Arc::new(Mutex::new(readings.into_iter().collect())),
            last: Arc::new(Mutex::new(None)),
            repeat_last: false,
        }
    }

    /// Sensor that always returns `reading`.
    pub fn constant(reading: ResourceSnapshot) -> Self {
        Self::new([reading]).repeat_last()
    }

    /// Keep returning the final reading once the queue is exhausted.
    #[must_use]
    pub fn repeat_last(mut self) -> Self {
        self.repeat_last = true;
        self
    }

    /// Append a reading.
    pub fn push(&self, reading: ResourceSnapshot) {
        self.readings.lock().push_back(reading);
    }

    /// Readings not yet consumed.
    pub fn remaining(&self) -> usize {
        self.readings.lock().len()
    }
}

impl ResourceSensor for ScriptedSensor {
    fn read(&mut self) -> Result<ResourceSnapshot, ControllerError> {
        let mut last = self.last.lock();
        match self.readings.lock().pop_front() {
            Some(reading) => {
                *last = Some(reading);
                Ok(reading)
            }
            None if self.repeat_last => {
                (*last).ok_or_else(|| ControllerError::SensorFailure("no readings scripted".into()))
            }
            None => Err(ControllerError::SensorFailure("scripted readings exhausted".into())),
        }
    }
}
