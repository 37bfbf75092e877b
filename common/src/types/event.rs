use serde::{Deserialize, Serialize};

use crate::errors::PlatformError;
use crate::types::SensorReading;

/// Item delivered to a stream consumer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum StreamEvent {
    Reading(SensorReading),
    Error(PlatformError),
}

impl StreamEvent {
    pub fn as_reading(&self) -> Option<&SensorReading> {
        match self {
            StreamEvent::Reading(reading) => Some(reading),
            StreamEvent::Error(_) => None,
        }
    }

    pub fn as_error(&self) -> Option<&PlatformError> {
        match self {
            StreamEvent::Reading(_) => None,
            StreamEvent::Error(error) => Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, StreamEvent::Error(_))
    }
}
