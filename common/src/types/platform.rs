use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

/// Native conventions a sensor service follows.
///
/// - `Android`: accelerations already in m/s^2 with the reference sign convention,
///   attitude delivered as a rotation vector.
/// - `Apple`: accelerations in g with opposite sign, attitude delivered as a fully
///   resolved roll/pitch/yaw, quaternion and matrix set. No accuracy channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlatformFamily {
    #[default]
    Android,
    Apple,
}

impl PlatformFamily {
    /// True when the platform reports an accuracy value next to its samples.
    pub fn reports_accuracy(&self) -> bool {
        matches!(self, PlatformFamily::Android)
    }
}

/// Native sensor sources, numbered with the Android sensor type codes.
#[repr(i32)]
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    TryFromPrimitive,
    IntoPrimitive,
)]
pub enum PlatformSensor {
    Accelerometer = 1,
    MagneticField = 2,
    Gyroscope = 4,
    Gravity = 9,
    LinearAcceleration = 10,
    RotationVector = 11,
    GameRotationVector = 15,
}

impl PlatformSensor {
    pub const ALL: [PlatformSensor; 7] = [
        PlatformSensor::Accelerometer,
        PlatformSensor::MagneticField,
        PlatformSensor::Gyroscope,
        PlatformSensor::Gravity,
        PlatformSensor::LinearAcceleration,
        PlatformSensor::RotationVector,
        PlatformSensor::GameRotationVector,
    ];

    /// Platform facing name of the source.
    pub fn name(&self) -> &'static str {
        match self {
            PlatformSensor::Accelerometer => "accelerometer",
            PlatformSensor::MagneticField => "magnetic_field",
            PlatformSensor::Gyroscope => "gyroscope",
            PlatformSensor::Gravity => "gravity",
            PlatformSensor::LinearAcceleration => "linear_acceleration",
            PlatformSensor::RotationVector => "rotation_vector",
            PlatformSensor::GameRotationVector => "game_rotation_vector",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_codes() {
        assert_eq!(i32::from(PlatformSensor::Accelerometer), 1);
        assert_eq!(i32::from(PlatformSensor::GameRotationVector), 15);
        assert_eq!(
            PlatformSensor::try_from(10).unwrap(),
            PlatformSensor::LinearAcceleration
        );
        assert!(PlatformSensor::try_from(3).is_err());
    }

    #[test]
    fn test_accuracy_channel() {
        assert!(PlatformFamily::Android.reports_accuracy());
        assert!(!PlatformFamily::Apple.reports_accuracy());
    }

    #[test]
    fn test_family_from_json() {
        let family: PlatformFamily = serde_json::from_str("\"apple\"").unwrap();
        assert_eq!(family, PlatformFamily::Apple);
    }
}
