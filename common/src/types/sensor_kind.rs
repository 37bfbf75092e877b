use serde::{Deserialize, Serialize};

use crate::constants::{
    N_EULER_ANGLES, N_QUATERNION_COORDINATES, N_ROTATION_MATRIX_CELLS, N_TRAILER_FIELDS,
    N_XYZ_COORDINATES,
};
use crate::types::platform::PlatformSensor;

/// Represents the closed set of streams exposed by the plugin.
///
/// # Examples
///
/// ```
/// use common::SensorKind;
///
/// let kind = SensorKind::try_from("absolute_orientation").unwrap();
/// assert_eq!(kind, SensorKind::AbsoluteOrientation);
/// assert_eq!(kind.reading_len(), 5);
///
/// let kind = SensorKind::from_method_fragment("RotationMatrix").unwrap();
/// assert_eq!(kind.reading_len(), 11);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SensorKind {
    Accelerometer,
    UserAccelerometer,
    Gravity,
    Gyroscope,
    Magnetometer,
    Orientation,
    AbsoluteOrientation,
    OrientationQuaternion,
    AbsoluteOrientationQuaternion,
    RotationMatrix,
    AbsoluteRotationMatrix,
}

impl SensorKind {
    pub const ALL: [SensorKind; 11] = [
        SensorKind::Accelerometer,
        SensorKind::UserAccelerometer,
        SensorKind::Gravity,
        SensorKind::Gyroscope,
        SensorKind::Magnetometer,
        SensorKind::Orientation,
        SensorKind::AbsoluteOrientation,
        SensorKind::OrientationQuaternion,
        SensorKind::AbsoluteOrientationQuaternion,
        SensorKind::RotationMatrix,
        SensorKind::AbsoluteRotationMatrix,
    ];

    /// Human readable name, used in error details.
    pub fn display_name(&self) -> &'static str {
        match self {
            SensorKind::Accelerometer => "Accelerometer",
            SensorKind::UserAccelerometer => "User Accelerometer",
            SensorKind::Gravity => "Gravity",
            SensorKind::Gyroscope => "Gyroscope",
            SensorKind::Magnetometer => "Magnetometer",
            SensorKind::Orientation => "Orientation",
            SensorKind::AbsoluteOrientation => "Absolute Orientation",
            SensorKind::OrientationQuaternion => "Orientation Quaternion",
            SensorKind::AbsoluteOrientationQuaternion => "Absolute Orientation Quaternion",
            SensorKind::RotationMatrix => "Rotation Matrix",
            SensorKind::AbsoluteRotationMatrix => "Absolute Rotation Matrix",
        }
    }

    /// Name fragment used by `is<Fragment>Available` and `set<Fragment>SamplingPeriod`.
    pub fn method_fragment(&self) -> &'static str {
        match self {
            SensorKind::Accelerometer => "Accelerometer",
            SensorKind::UserAccelerometer => "UserAccelerometer",
            SensorKind::Gravity => "Gravity",
            SensorKind::Gyroscope => "Gyroscope",
            SensorKind::Magnetometer => "Magnetometer",
            SensorKind::Orientation => "Orientation",
            SensorKind::AbsoluteOrientation => "AbsoluteOrientation",
            SensorKind::OrientationQuaternion => "OrientationQuaternion",
            SensorKind::AbsoluteOrientationQuaternion => "AbsoluteOrientationQuaternion",
            SensorKind::RotationMatrix => "RotationMatrix",
            SensorKind::AbsoluteRotationMatrix => "AbsoluteRotationMatrix",
        }
    }

    /// Last path segment of the event channel serving this kind.
    pub fn channel_suffix(&self) -> &'static str {
        match self {
            SensorKind::Accelerometer => "accelerometer",
            SensorKind::UserAccelerometer => "user_accel",
            SensorKind::Gravity => "gravity",
            SensorKind::Gyroscope => "gyroscope",
            SensorKind::Magnetometer => "magnetometer",
            SensorKind::Orientation => "orientation",
            SensorKind::AbsoluteOrientation => "absolute_orientation",
            SensorKind::OrientationQuaternion => "orientation_quaternion",
            SensorKind::AbsoluteOrientationQuaternion => "absolute_orientation_quaternion",
            SensorKind::RotationMatrix => "rotation_matrix",
            SensorKind::AbsoluteRotationMatrix => "absolute_rotation_matrix",
        }
    }

    /// Parses a method name fragment. `RotationQuaternion` is accepted as an alias of
    /// `OrientationQuaternion`.
    pub fn from_method_fragment(fragment: &str) -> Option<Self> {
        match fragment {
            "RotationQuaternion" => Some(SensorKind::OrientationQuaternion),
            "AbsoluteRotationQuaternion" => Some(SensorKind::AbsoluteOrientationQuaternion),
            _ => SensorKind::ALL
                .iter()
                .copied()
                .find(|kind| kind.method_fragment() == fragment),
        }
    }

    /// Number of payload values, before accuracy and timestamp.
    pub fn value_count(&self) -> usize {
        match self {
            SensorKind::Accelerometer
            | SensorKind::UserAccelerometer
            | SensorKind::Gravity
            | SensorKind::Gyroscope
            | SensorKind::Magnetometer => N_XYZ_COORDINATES,
            SensorKind::Orientation | SensorKind::AbsoluteOrientation => N_EULER_ANGLES,
            SensorKind::OrientationQuaternion | SensorKind::AbsoluteOrientationQuaternion => {
                N_QUATERNION_COORDINATES
            }
            SensorKind::RotationMatrix | SensorKind::AbsoluteRotationMatrix => {
                N_ROTATION_MATRIX_CELLS
            }
        }
    }

    /// Total length of the canonical reading array.
    pub fn reading_len(&self) -> usize {
        self.value_count() + N_TRAILER_FIELDS
    }

    /// True for kinds derived from a rotation vector or attitude.
    pub fn is_attitude(&self) -> bool {
        matches!(
            self,
            SensorKind::Orientation
                | SensorKind::AbsoluteOrientation
                | SensorKind::OrientationQuaternion
                | SensorKind::AbsoluteOrientationQuaternion
                | SensorKind::RotationMatrix
                | SensorKind::AbsoluteRotationMatrix
        )
    }

    /// Native sensor the kind reads from.
    pub fn platform_sensor(&self) -> PlatformSensor {
        match self {
            SensorKind::Accelerometer => PlatformSensor::Accelerometer,
            SensorKind::UserAccelerometer => PlatformSensor::LinearAcceleration,
            SensorKind::Gravity => PlatformSensor::Gravity,
            SensorKind::Gyroscope => PlatformSensor::Gyroscope,
            SensorKind::Magnetometer => PlatformSensor::MagneticField,
            SensorKind::Orientation
            | SensorKind::OrientationQuaternion
            | SensorKind::RotationMatrix => PlatformSensor::GameRotationVector,
            SensorKind::AbsoluteOrientation
            | SensorKind::AbsoluteOrientationQuaternion
            | SensorKind::AbsoluteRotationMatrix => PlatformSensor::RotationVector,
        }
    }
}

impl From<&SensorKind> for usize {
    fn from(value: &SensorKind) -> Self {
        *value as usize
    }
}

impl From<SensorKind> for usize {
    fn from(value: SensorKind) -> Self {
        usize::from(&value)
    }
}

impl std::fmt::Display for SensorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl TryFrom<&str> for SensorKind {
    type Error = String;

    /// Accepts a channel suffix (`user_accel`), a full channel name
    /// (`<namespace>/gyroscope`) or a method fragment (`UserAccelerometer`).
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let suffix = value.rsplit('/').next().unwrap_or(value);
        let by_suffix = match suffix {
            "rotation_quaternion" => Some(SensorKind::OrientationQuaternion),
            "absolute_rotation_quaternion" => Some(SensorKind::AbsoluteOrientationQuaternion),
            _ => SensorKind::ALL
                .iter()
                .copied()
                .find(|kind| kind.channel_suffix() == suffix),
        };
        by_suffix
            .or_else(|| SensorKind::from_method_fragment(suffix))
            .ok_or_else(|| format!("Unknown sensor kind: {}", value))
    }
}

impl TryFrom<String> for SensorKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        SensorKind::try_from(value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_len() {
        assert_eq!(SensorKind::Accelerometer.reading_len(), 5);
        assert_eq!(SensorKind::Magnetometer.reading_len(), 5);
        assert_eq!(SensorKind::AbsoluteOrientation.reading_len(), 5);
        assert_eq!(SensorKind::OrientationQuaternion.reading_len(), 6);
        assert_eq!(SensorKind::AbsoluteRotationMatrix.reading_len(), 11);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            SensorKind::try_from("user_accel").unwrap(),
            SensorKind::UserAccelerometer
        );
        assert_eq!(
            SensorKind::try_from("dev.fluttercommunity.plus/sensors/gyroscope").unwrap(),
            SensorKind::Gyroscope
        );
        assert_eq!(
            SensorKind::try_from("AbsoluteRotationMatrix").unwrap(),
            SensorKind::AbsoluteRotationMatrix
        );
        assert!(SensorKind::try_from("barometer").is_err());
    }

    #[test]
    fn test_quaternion_aliases() {
        assert_eq!(
            SensorKind::from_method_fragment("RotationQuaternion"),
            Some(SensorKind::OrientationQuaternion)
        );
        assert_eq!(
            SensorKind::try_from("absolute_rotation_quaternion").unwrap(),
            SensorKind::AbsoluteOrientationQuaternion
        );
    }

    #[test]
    fn test_round_trip_names() {
        for kind in SensorKind::ALL {
            assert_eq!(SensorKind::try_from(kind.channel_suffix()).unwrap(), kind);
            assert_eq!(SensorKind::from_method_fragment(kind.method_fragment()), Some(kind));
        }
    }

    #[test]
    fn test_platform_sensor_mapping() {
        assert_eq!(
            SensorKind::Orientation.platform_sensor(),
            PlatformSensor::GameRotationVector
        );
        assert_eq!(
            SensorKind::AbsoluteRotationMatrix.platform_sensor(),
            PlatformSensor::RotationVector
        );
        assert_eq!(
            SensorKind::UserAccelerometer.platform_sensor(),
            PlatformSensor::LinearAcceleration
        );
    }

    #[test]
    fn test_index_is_unique() {
        let mut indexes: Vec<usize> = SensorKind::ALL.iter().map(usize::from).collect();
        indexes.dedup();
        assert_eq!(indexes.len(), SensorKind::ALL.len());
    }
}
