use common::constants::{GRAVITY, UNKNOWN_ACCURACY};
use common::{Attitude, Clock, PlatformFamily, RawSample, SensorError, SensorKind, SensorReading};

use crate::rotation;

/// Converts raw payloads of one platform family into canonical readings.
///
/// # Examples
///
/// ```
/// use common::{Clock, PlatformFamily, RawSample, SensorKind};
/// use normalizer_rs::SensorSampleNormalizer;
///
/// let normalizer = SensorSampleNormalizer::new(PlatformFamily::Apple);
/// let reading = normalizer
///     .normalize(SensorKind::Accelerometer, &RawSample::Axes([0.0, 0.0, -1.0]), None, Clock::from_micros(10))
///     .unwrap();
/// assert_eq!(reading.to_vec(), vec![-0.0, -0.0, 9.81, -1.0, 10.0]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SensorSampleNormalizer {
    platform: PlatformFamily,
}

impl SensorSampleNormalizer {
    pub fn new(platform: PlatformFamily) -> Self {
        Self { platform }
    }

    pub fn platform(&self) -> PlatformFamily {
        self.platform
    }

    /// Returns the canonical reading of `raw`. `accuracy` is `None` when the platform
    /// supplied no accuracy signal.
    ///
    /// Returns a PlatformRead error if the payload shape does not belong to `kind` on this
    /// platform family.
    pub fn normalize(
        &self,
        kind: SensorKind,
        raw: &RawSample,
        accuracy: Option<i32>,
        timestamp: Clock,
    ) -> Result<SensorReading, SensorError> {
        normalize(self.platform, kind, raw, accuracy, timestamp)
    }
}

/// Stateless form of [`SensorSampleNormalizer::normalize`].
pub fn normalize(
    platform: PlatformFamily,
    kind: SensorKind,
    raw: &RawSample,
    accuracy: Option<i32>,
    timestamp: Clock,
) -> Result<SensorReading, SensorError> {
    let values = match (platform, raw) {
        (_, RawSample::Axes(axes)) if !kind.is_attitude() => normalize_axes(platform, kind, axes),
        (PlatformFamily::Android, RawSample::RotationVector(rotation_vector))
            if kind.is_attitude() =>
        {
            normalize_rotation_vector(kind, rotation_vector)?
        }
        (PlatformFamily::Apple, RawSample::Attitude(attitude)) if kind.is_attitude() => {
            normalize_attitude(kind, attitude)
        }
        _ => {
            return Err(SensorError::PlatformRead(format!(
                "Unexpected {} payload for {} on {:?}",
                raw.variant_name(),
                kind,
                platform
            )))
        }
    };

    SensorReading::new(
        kind,
        values,
        accuracy.unwrap_or(UNKNOWN_ACCURACY),
        timestamp.as_micros(),
    )
}

fn is_acceleration(kind: SensorKind) -> bool {
    matches!(
        kind,
        SensorKind::Accelerometer | SensorKind::UserAccelerometer | SensorKind::Gravity
    )
}

fn normalize_axes(platform: PlatformFamily, kind: SensorKind, axes: &[f64; 3]) -> Vec<f64> {
    match platform {
        // g units with the opposite sign convention
        PlatformFamily::Apple if is_acceleration(kind) => {
            axes.iter().map(|value| -value * GRAVITY).collect()
        }
        _ => axes.to_vec(),
    }
}

fn normalize_rotation_vector(
    kind: SensorKind,
    rotation_vector: &[f64],
) -> Result<Vec<f64>, SensorError> {
    let values = match kind {
        SensorKind::Orientation | SensorKind::AbsoluteOrientation => {
            let matrix = rotation::rotation_matrix_from_vector(rotation_vector)?;
            let [azimuth, pitch, roll] = rotation::orientation_from_matrix(&matrix);
            vec![-pitch, roll, -azimuth]
        }
        SensorKind::OrientationQuaternion | SensorKind::AbsoluteOrientationQuaternion => {
            let q = rotation::quaternion_from_vector(rotation_vector)?;
            reorder_quaternion([q.w, q.i, q.j, q.k]).to_vec()
        }
        SensorKind::RotationMatrix | SensorKind::AbsoluteRotationMatrix => {
            let matrix = rotation::rotation_matrix_from_vector(rotation_vector)?;
            rotation::row_major(&matrix).to_vec()
        }
        _ => {
            return Err(SensorError::PlatformRead(format!(
                "{} is not derived from a rotation vector",
                kind
            )))
        }
    };
    Ok(values)
}

fn normalize_attitude(kind: SensorKind, attitude: &Attitude) -> Vec<f64> {
    match kind {
        SensorKind::AbsoluteOrientation => vec![
            attitude.roll,
            attitude.pitch,
            rotation::remap_yaw_to_magnetic_north(attitude.yaw),
        ],
        SensorKind::OrientationQuaternion | SensorKind::AbsoluteOrientationQuaternion => {
            reorder_quaternion(attitude.quaternion).to_vec()
        }
        SensorKind::RotationMatrix | SensorKind::AbsoluteRotationMatrix => {
            attitude.rotation_matrix.to_vec()
        }
        _ => vec![attitude.roll, attitude.pitch, attitude.yaw],
    }
}

/// `(w, x, y, z)` -> `(x, y, z, w)`
pub(crate) fn reorder_quaternion(wxyz: [f64; 4]) -> [f64; 4] {
    let [w, x, y, z] = wxyz;
    [x, y, z, w]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-9;
    const TIMESTAMP: u64 = 1_700_000_000_000_000;

    fn attitude(roll: f64, pitch: f64, yaw: f64) -> Attitude {
        Attitude {
            roll,
            pitch,
            yaw,
            quaternion: [0.9, 0.1, 0.2, 0.3],
            rotation_matrix: [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0],
        }
    }

    fn run(
        platform: PlatformFamily,
        kind: SensorKind,
        raw: RawSample,
        accuracy: Option<i32>,
    ) -> SensorReading {
        normalize(platform, kind, &raw, accuracy, Clock::from_micros(TIMESTAMP)).unwrap()
    }

    #[test]
    fn test_apple_accelerations_are_scaled_and_negated() {
        for kind in [
            SensorKind::Accelerometer,
            SensorKind::UserAccelerometer,
            SensorKind::Gravity,
        ] {
            let reading = run(
                PlatformFamily::Apple,
                kind,
                RawSample::Axes([0.5, -1.0, 2.0]),
                None,
            );
            assert_eq!(reading.values(), &[-0.5 * 9.81, 1.0 * 9.81, -2.0 * 9.81]);
        }
    }

    #[test]
    fn test_android_accelerations_pass_through() {
        for kind in [
            SensorKind::Accelerometer,
            SensorKind::UserAccelerometer,
            SensorKind::Gravity,
        ] {
            let reading = run(
                PlatformFamily::Android,
                kind,
                RawSample::Axes([0.5, -1.0, 2.0]),
                Some(3),
            );
            assert_eq!(reading.values(), &[0.5, -1.0, 2.0]);
        }
    }

    #[test]
    fn test_gyroscope_and_magnetometer_pass_through() {
        for platform in [PlatformFamily::Android, PlatformFamily::Apple] {
            for kind in [SensorKind::Gyroscope, SensorKind::Magnetometer] {
                let reading = run(platform, kind, RawSample::Axes([0.1, 0.2, 0.3]), None);
                assert_eq!(reading.values(), &[0.1, 0.2, 0.3]);
            }
        }
    }

    #[test]
    fn test_android_orientation_relabeling() {
        let rotation_vector = vec![0.1, -0.2, 0.3, 0.927];
        let matrix = rotation::rotation_matrix_from_vector(&rotation_vector).unwrap();
        let angles = rotation::orientation_from_matrix(&matrix);

        for kind in [SensorKind::Orientation, SensorKind::AbsoluteOrientation] {
            let reading = run(
                PlatformFamily::Android,
                kind,
                RawSample::RotationVector(rotation_vector.clone()),
                Some(2),
            );
            assert_eq!(reading.values(), &[-angles[1], angles[2], -angles[0]]);
        }
    }

    #[test]
    fn test_android_yaw_about_z() {
        let theta: f64 = 0.7;
        let reading = run(
            PlatformFamily::Android,
            SensorKind::Orientation,
            RawSample::RotationVector(vec![0.0, 0.0, (theta / 2.0).sin(), (theta / 2.0).cos()]),
            None,
        );
        let values = reading.values();
        assert!(values[0].abs() < EPS);
        assert!(values[1].abs() < EPS);
        assert!((values[2] - theta).abs() < EPS);
    }

    #[test]
    fn test_apple_orientation() {
        let reading = run(
            PlatformFamily::Apple,
            SensorKind::Orientation,
            RawSample::Attitude(attitude(0.1, 0.2, 0.3)),
            None,
        );
        assert_eq!(reading.values(), &[0.1, 0.2, 0.3]);

        let reading = run(
            PlatformFamily::Apple,
            SensorKind::AbsoluteOrientation,
            RawSample::Attitude(attitude(0.1, 0.2, 0.0)),
            None,
        );
        assert_eq!(&reading.values()[..2], &[0.1, 0.2]);
        assert!((reading.values()[2] - PI / 2.0).abs() < EPS);
    }

    #[test]
    fn test_quaternion_reordering() {
        let reading = run(
            PlatformFamily::Android,
            SensorKind::OrientationQuaternion,
            RawSample::RotationVector(vec![0.1, 0.2, 0.3, 0.9]),
            None,
        );
        assert_eq!(reading.values(), &[0.1, 0.2, 0.3, 0.9]);

        let reading = run(
            PlatformFamily::Apple,
            SensorKind::AbsoluteOrientationQuaternion,
            RawSample::Attitude(attitude(0.0, 0.0, 0.0)),
            None,
        );
        assert_eq!(reading.values(), &[0.1, 0.2, 0.3, 0.9]);
    }

    #[test]
    fn test_quaternion_reordering_is_not_an_involution() {
        let wxyz = [1.0, 2.0, 3.0, 4.0];
        let once = reorder_quaternion(wxyz);
        assert_eq!(once, [2.0, 3.0, 4.0, 1.0]);
        assert_ne!(reorder_quaternion(once), wxyz);
    }

    #[test]
    fn test_rotation_matrix_row_major() {
        let reading = run(
            PlatformFamily::Apple,
            SensorKind::RotationMatrix,
            RawSample::Attitude(attitude(0.0, 0.0, 0.0)),
            None,
        );
        assert_eq!(
            reading.values(),
            &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]
        );

        let theta: f64 = 0.25;
        let reading = run(
            PlatformFamily::Android,
            SensorKind::AbsoluteRotationMatrix,
            RawSample::RotationVector(vec![0.0, 0.0, (theta / 2.0).sin(), (theta / 2.0).cos(), 0.1]),
            None,
        );
        let values = reading.values();
        assert!((values[1] + theta.sin()).abs() < EPS);
        assert!((values[3] - theta.sin()).abs() < EPS);
        assert!((values[8] - 1.0).abs() < EPS);
    }

    #[test]
    fn test_accuracy_and_timestamp_trailer() {
        let reading = run(
            PlatformFamily::Android,
            SensorKind::Gyroscope,
            RawSample::Axes([0.0, 0.0, 0.0]),
            Some(3),
        );
        assert_eq!(reading.accuracy(), 3);
        assert_eq!(reading.timestamp_micros(), TIMESTAMP);

        let reading = run(
            PlatformFamily::Apple,
            SensorKind::Gyroscope,
            RawSample::Axes([0.0, 0.0, 0.0]),
            None,
        );
        let data = reading.to_vec();
        assert_eq!(data.len(), 5);
        assert_eq!(data[3], -1.0);
        assert_eq!(data[4], TIMESTAMP as f64);
    }

    #[test]
    fn test_reading_lengths() {
        for kind in SensorKind::ALL {
            let raw = if kind.is_attitude() {
                RawSample::RotationVector(vec![0.0, 0.0, 0.0, 1.0])
            } else {
                RawSample::Axes([0.0, 0.0, 0.0])
            };
            let reading = run(PlatformFamily::Android, kind, raw, None);
            assert_eq!(reading.to_vec().len(), kind.reading_len());
        }
    }

    #[test]
    fn test_mismatched_payloads_are_rejected() {
        let clock = Clock::from_micros(0);
        assert!(matches!(
            normalize(
                PlatformFamily::Android,
                SensorKind::Orientation,
                &RawSample::Axes([0.0, 0.0, 0.0]),
                None,
                clock
            ),
            Err(SensorError::PlatformRead(_))
        ));
        assert!(normalize(
            PlatformFamily::Android,
            SensorKind::RotationMatrix,
            &RawSample::Attitude(attitude(0.0, 0.0, 0.0)),
            None,
            clock
        )
        .is_err());
        assert!(normalize(
            PlatformFamily::Apple,
            SensorKind::Gravity,
            &RawSample::RotationVector(vec![0.0, 0.0, 0.0]),
            None,
            clock
        )
        .is_err());
        assert!(normalize(
            PlatformFamily::Android,
            SensorKind::OrientationQuaternion,
            &RawSample::RotationVector(vec![0.0]),
            None,
            clock
        )
        .is_err());
    }
}
