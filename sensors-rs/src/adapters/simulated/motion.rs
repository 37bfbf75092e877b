//! Native payloads of a face-up device lying on a table and slowly yawing about its z axis.

use common::constants::GRAVITY;
use common::{Attitude, PlatformFamily, PlatformSensor, RawSample};

/// Yaw rate of the simulated device, in rad/s.
pub(super) const YAW_RATE: f64 = 0.2;
/// Horizontal and vertical components of the earth magnetic field, in uT.
const FIELD_NORTH: f64 = 22.0;
const FIELD_DOWN: f64 = -42.0;
/// Estimated heading accuracy appended to absolute rotation vectors, in radians.
pub(super) const HEADING_ACCURACY: f64 = 0.1;

/// Yaw of the device `elapsed_secs` after the motion started.
pub(super) fn yaw_at(elapsed_secs: f64) -> f64 {
    (YAW_RATE * elapsed_secs + std::f64::consts::PI).rem_euclid(2.0 * std::f64::consts::PI)
        - std::f64::consts::PI
}

/// Returns the payload `sensor` delivers on `platform` at time `elapsed_secs`.
pub(super) fn sample(platform: PlatformFamily, sensor: PlatformSensor, elapsed_secs: f64) -> RawSample {
    let yaw = yaw_at(elapsed_secs);
    match (platform, sensor) {
        (PlatformFamily::Android, PlatformSensor::Accelerometer | PlatformSensor::Gravity) => {
            RawSample::Axes([0.0, 0.0, GRAVITY])
        }
        // Apple reports accelerations in g, opposite sign
        (PlatformFamily::Apple, PlatformSensor::Accelerometer | PlatformSensor::Gravity) => {
            RawSample::Axes([0.0, 0.0, -1.0])
        }
        (_, PlatformSensor::LinearAcceleration) => RawSample::Axes([0.0, 0.0, 0.0]),
        (_, PlatformSensor::Gyroscope) => RawSample::Axes([0.0, 0.0, YAW_RATE]),
        (_, PlatformSensor::MagneticField) => RawSample::Axes([
            FIELD_NORTH * yaw.sin(),
            FIELD_NORTH * yaw.cos(),
            FIELD_DOWN,
        ]),
        (PlatformFamily::Android, PlatformSensor::GameRotationVector) => {
            RawSample::RotationVector(vec![0.0, 0.0, (yaw / 2.0).sin(), (yaw / 2.0).cos()])
        }
        (PlatformFamily::Android, PlatformSensor::RotationVector) => RawSample::RotationVector(vec![
            0.0,
            0.0,
            (yaw / 2.0).sin(),
            (yaw / 2.0).cos(),
            HEADING_ACCURACY,
        ]),
        (PlatformFamily::Apple, PlatformSensor::GameRotationVector | PlatformSensor::RotationVector) => {
            RawSample::Attitude(attitude_about_z(yaw))
        }
    }
}

fn attitude_about_z(yaw: f64) -> Attitude {
    let (sin, cos) = yaw.sin_cos();
    Attitude {
        roll: 0.0,
        pitch: 0.0,
        yaw,
        quaternion: [(yaw / 2.0).cos(), 0.0, 0.0, (yaw / 2.0).sin()],
        rotation_matrix: [cos, -sin, 0.0, sin, cos, 0.0, 0.0, 0.0, 1.0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_yaw_wraps() {
        assert!((yaw_at(0.0)).abs() < EPS);
        assert!((yaw_at(1.0) - YAW_RATE).abs() < EPS);
        let wrapped = yaw_at(2.0 * PI / YAW_RATE + 1.0);
        assert!((wrapped - YAW_RATE).abs() < 1e-9);
    }

    #[test]
    fn test_face_up_accelerations() {
        assert_eq!(
            sample(PlatformFamily::Android, PlatformSensor::Accelerometer, 3.0),
            RawSample::Axes([0.0, 0.0, 9.81])
        );
        assert_eq!(
            sample(PlatformFamily::Apple, PlatformSensor::Gravity, 3.0),
            RawSample::Axes([0.0, 0.0, -1.0])
        );
        assert_eq!(
            sample(PlatformFamily::Apple, PlatformSensor::LinearAcceleration, 3.0),
            RawSample::Axes([0.0, 0.0, 0.0])
        );
    }

    #[test]
    fn test_rotation_vector_shapes() {
        match sample(PlatformFamily::Android, PlatformSensor::GameRotationVector, 1.0) {
            RawSample::RotationVector(rv) => assert_eq!(rv.len(), 4),
            other => panic!("unexpected payload {:?}", other),
        }
        match sample(PlatformFamily::Android, PlatformSensor::RotationVector, 1.0) {
            RawSample::RotationVector(rv) => {
                assert_eq!(rv.len(), 5);
                assert_eq!(rv[4], HEADING_ACCURACY);
                let norm: f64 = rv[..4].iter().map(|v| v * v).sum();
                assert!((norm - 1.0).abs() < EPS);
            }
            other => panic!("unexpected payload {:?}", other),
        }
    }

    #[test]
    fn test_apple_attitude() {
        match sample(PlatformFamily::Apple, PlatformSensor::RotationVector, 2.0) {
            RawSample::Attitude(attitude) => {
                assert!((attitude.yaw - 2.0 * YAW_RATE).abs() < EPS);
                assert!((attitude.quaternion[0] - YAW_RATE.cos()).abs() < EPS);
                assert_eq!(attitude.rotation_matrix[8], 1.0);
            }
            other => panic!("unexpected payload {:?}", other),
        }
    }

    #[test]
    fn test_magnetic_field_points_north_at_rest() {
        assert_eq!(
            sample(PlatformFamily::Android, PlatformSensor::MagneticField, 0.0),
            RawSample::Axes([0.0, FIELD_NORTH, FIELD_DOWN])
        );
    }
}
