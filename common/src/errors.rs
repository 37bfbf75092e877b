//! Module errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::SensorKind;

pub const NO_SENSOR_CODE: &str = "NO_SENSOR";
pub const UNAVAILABLE_CODE: &str = "UNAVAILABLE";
pub const INVALID_ARGUMENT_CODE: &str = "INVALID_ARGUMENT";
pub const DETACHED_CODE: &str = "DETACHED";
pub const RUNTIME_CODE: &str = "RUNTIME";

/// Represents the different types of errors that can occur while serving sensor streams.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SensorError {
    /// No physical or virtual sensor backs the requested kind.
    #[error("no {} sensor available on this device", .0.display_name())]
    SensorUnavailable(SensorKind),

    /// A single platform callback failed. The subscription stays alive.
    #[error("platform read error: {0}")]
    PlatformRead(String),

    /// A method call or configuration value was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The plugin was detached from its host.
    #[error("plugin detached")]
    Detached,

    /// The sensor service could not be driven (e.g. no async runtime available).
    #[error("runtime error: {0}")]
    Runtime(String),
}

impl SensorError {
    /// Returns the channel error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            SensorError::SensorUnavailable(_) => NO_SENSOR_CODE,
            SensorError::PlatformRead(_) => UNAVAILABLE_CODE,
            SensorError::InvalidArgument(_) => INVALID_ARGUMENT_CODE,
            SensorError::Detached => DETACHED_CODE,
            SensorError::Runtime(_) => RUNTIME_CODE,
        }
    }

    /// Converts the error into the payload sent to a stream or method-call consumer.
    pub fn to_platform_error(&self) -> PlatformError {
        match self {
            SensorError::SensorUnavailable(kind) => PlatformError::new(
                NO_SENSOR_CODE,
                "Sensor not found",
                Some(format!(
                    "It seems that your device has no {} sensor",
                    kind.display_name()
                )),
            ),
            SensorError::PlatformRead(message) => {
                PlatformError::new(UNAVAILABLE_CODE, message, None)
            }
            other => PlatformError::new(other.code(), &other.to_string(), None),
        }
    }
}

/// Error payload as seen by channel consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

impl PlatformError {
    pub fn new(code: &str, message: &str, details: Option<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details,
        }
    }
}

impl From<SensorError> for PlatformError {
    fn from(value: SensorError) -> Self {
        value.to_platform_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_error_payload() {
        let err = SensorError::SensorUnavailable(SensorKind::UserAccelerometer);
        let payload = err.to_platform_error();
        assert_eq!(payload.code, NO_SENSOR_CODE);
        assert_eq!(payload.message, "Sensor not found");
        assert_eq!(
            payload.details.as_deref(),
            Some("It seems that your device has no User Accelerometer sensor")
        );
    }

    #[test]
    fn test_read_error_payload() {
        let payload = PlatformError::from(SensorError::PlatformRead("timeout".to_string()));
        assert_eq!(payload.code, UNAVAILABLE_CODE);
        assert_eq!(payload.message, "timeout");
        assert!(payload.details.is_none());
    }

    #[test]
    fn test_error_display() {
        let msg = format!("{}", SensorError::SensorUnavailable(SensorKind::Gyroscope));
        assert!(msg.contains("Gyroscope"));
        let msg = format!("{}", SensorError::InvalidArgument("period".to_string()));
        assert!(msg.contains("period"));
    }

    #[test]
    fn test_codes() {
        assert_eq!(SensorError::Detached.code(), DETACHED_CODE);
        assert_eq!(SensorError::Runtime(String::new()).code(), RUNTIME_CODE);
        assert_eq!(
            SensorError::InvalidArgument(String::new()).to_platform_error().code,
            INVALID_ARGUMENT_CODE
        );
    }
}
