use serde::{Deserialize, Serialize};
use serde_json::Value;

use common::{PlatformError, SensorError, SensorKind};

const AVAILABILITY_PREFIX: &str = "is";
const AVAILABILITY_SUFFIX: &str = "Available";
const SAMPLING_PERIOD_PREFIX: &str = "set";
const SAMPLING_PERIOD_SUFFIX: &str = "SamplingPeriod";

/// Request received on the method channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: &str, arguments: Value) -> Self {
        Self {
            method: method.to_string(),
            arguments,
        }
    }
}

/// Reply sent back on the method channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MethodResponse {
    Success(Value),
    NotImplemented,
    Error(PlatformError),
}

impl From<Result<Value, SensorError>> for MethodResponse {
    fn from(value: Result<Value, SensorError>) -> Self {
        match value {
            Ok(value) => MethodResponse::Success(value),
            Err(e) => MethodResponse::Error(e.into()),
        }
    }
}

/// Method understood by the plugin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SensorMethod {
    IsAvailable(SensorKind),
    SetSamplingPeriod(SensorKind),
}

impl SensorMethod {
    /// Resolves a method name, `None` when not implemented.
    ///
    /// # Examples
    ///
    /// ```
    /// use common::SensorKind;
    /// use sensors_rs::method_call::SensorMethod;
    ///
    /// assert_eq!(
    ///     SensorMethod::parse("setRotationQuaternionSamplingPeriod"),
    ///     Some(SensorMethod::SetSamplingPeriod(SensorKind::OrientationQuaternion))
    /// );
    /// assert_eq!(SensorMethod::parse("isBarometerAvailable"), None);
    /// ```
    pub fn parse(method: &str) -> Option<Self> {
        match method.get(..2)? {
            "is" => fragment(method, AVAILABILITY_PREFIX, AVAILABILITY_SUFFIX)
                .map(SensorMethod::IsAvailable),
            "se" => fragment(method, SAMPLING_PERIOD_PREFIX, SAMPLING_PERIOD_SUFFIX)
                .map(SensorMethod::SetSamplingPeriod),
            _ => None,
        }
    }

    pub fn kind(&self) -> SensorKind {
        match self {
            SensorMethod::IsAvailable(kind) | SensorMethod::SetSamplingPeriod(kind) => *kind,
        }
    }
}

fn fragment(method: &str, prefix: &str, suffix: &str) -> Option<SensorKind> {
    method
        .strip_prefix(prefix)?
        .strip_suffix(suffix)
        .and_then(SensorKind::from_method_fragment)
}

/// Reads the sampling period argument, in microseconds.
/// Returns InvalidArgument when it is not an integer.
pub fn sampling_period_argument(arguments: &Value) -> Result<i64, SensorError> {
    arguments.as_i64().ok_or_else(|| {
        SensorError::InvalidArgument(format!(
            "Sampling period must be an integer number of microseconds, got {}",
            arguments
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_availability() {
        for kind in SensorKind::ALL {
            let method = format!("is{}Available", kind.method_fragment());
            assert_eq!(
                SensorMethod::parse(&method),
                Some(SensorMethod::IsAvailable(kind))
            );
        }
    }

    #[test]
    fn test_parse_sampling_period() {
        for kind in SensorKind::ALL {
            let method = format!("set{}SamplingPeriod", kind.method_fragment());
            let parsed = SensorMethod::parse(&method).unwrap();
            assert_eq!(parsed, SensorMethod::SetSamplingPeriod(kind));
            assert_eq!(parsed.kind(), kind);
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(SensorMethod::parse(""), None);
        assert_eq!(SensorMethod::parse("i"), None);
        assert_eq!(SensorMethod::parse("getAccelerometer"), None);
        assert_eq!(SensorMethod::parse("isAccelerometer"), None);
        assert_eq!(SensorMethod::parse("isAccelerometerAvailableNow"), None);
        assert_eq!(SensorMethod::parse("setAccelerometer"), None);
        assert_eq!(SensorMethod::parse("sendGyroscopeSamplingPeriod"), None);
        assert_eq!(SensorMethod::parse("isÄccelerometerAvailable"), None);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(
            SensorMethod::parse("isAbsoluteRotationQuaternionAvailable"),
            Some(SensorMethod::IsAvailable(
                SensorKind::AbsoluteOrientationQuaternion
            ))
        );
    }

    #[test]
    fn test_sampling_period_argument() {
        assert_eq!(sampling_period_argument(&json!(20000)), Ok(20000));
        assert_eq!(sampling_period_argument(&json!(-5)), Ok(-5));
        assert!(sampling_period_argument(&json!(0.5)).is_err());
        assert!(sampling_period_argument(&json!("fast")).is_err());
        assert!(sampling_period_argument(&Value::Null).is_err());
    }

    #[test]
    fn test_response_from_result() {
        assert_eq!(
            MethodResponse::from(Ok(Value::Bool(true))),
            MethodResponse::Success(Value::Bool(true))
        );
        match MethodResponse::from(Err(SensorError::InvalidArgument("x".to_string()))) {
            MethodResponse::Error(error) => assert_eq!(error.code, "INVALID_ARGUMENT"),
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[test]
    fn test_method_call_from_json() {
        let call: MethodCall =
            serde_json::from_str(r#"{"method": "isGyroscopeAvailable"}"#).unwrap();
        assert_eq!(call, MethodCall::new("isGyroscopeAvailable", Value::Null));
    }
}
