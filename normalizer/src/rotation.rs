//! Rotation vector conversions, matching the Android sensor manager routines.

use nalgebra::{Matrix3, Quaternion};
use std::f64::consts::PI;

use common::constants::{N_EULER_ANGLES, N_ROTATION_MATRIX_CELLS};
use common::SensorError;

const MIN_ROTATION_VECTOR_LEN: usize = 3;
const MAX_ROTATION_VECTOR_LEN: usize = 5;
const W_ROTATION_VECTOR_IDX: usize = 3;

fn check_rotation_vector(rotation_vector: &[f64]) -> Result<(), SensorError> {
    if !(MIN_ROTATION_VECTOR_LEN..=MAX_ROTATION_VECTOR_LEN).contains(&rotation_vector.len()) {
        return Err(SensorError::PlatformRead(format!(
            "Rotation vector expects 3 to 5 values, got {}",
            rotation_vector.len()
        )));
    }
    Ok(())
}

/// Scalar part of the rotation vector. Three-component vectors imply it from the unit norm.
fn scalar_component(rotation_vector: &[f64]) -> f64 {
    match rotation_vector.get(W_ROTATION_VECTOR_IDX) {
        Some(w) => *w,
        None => {
            let [x, y, z] = [rotation_vector[0], rotation_vector[1], rotation_vector[2]];
            let w_squared = 1.0 - x * x - y * y - z * z;
            if w_squared > 0.0 {
                w_squared.sqrt()
            } else {
                0.0
            }
        }
    }
}

/// Returns the quaternion `(w, x, y, z)` encoded by a rotation vector.
///
/// # Examples
///
/// ```
/// use normalizer_rs::rotation::quaternion_from_vector;
///
/// let q = quaternion_from_vector(&[0.0, 0.0, 0.0]).unwrap();
/// assert_eq!([q.w, q.i, q.j, q.k], [1.0, 0.0, 0.0, 0.0]);
/// ```
pub fn quaternion_from_vector(rotation_vector: &[f64]) -> Result<Quaternion<f64>, SensorError> {
    check_rotation_vector(rotation_vector)?;
    Ok(Quaternion::new(
        scalar_component(rotation_vector),
        rotation_vector[0],
        rotation_vector[1],
        rotation_vector[2],
    ))
}

/// Returns the rotation matrix encoded by a rotation vector.
///
/// The quaternion is used as delivered (no renormalization), as the platform does.
pub fn rotation_matrix_from_vector(rotation_vector: &[f64]) -> Result<Matrix3<f64>, SensorError> {
    let q = quaternion_from_vector(rotation_vector)?;
    let (q0, q1, q2, q3) = (q.w, q.i, q.j, q.k);

    let sq_q1 = 2.0 * q1 * q1;
    let sq_q2 = 2.0 * q2 * q2;
    let sq_q3 = 2.0 * q3 * q3;
    let q1_q2 = 2.0 * q1 * q2;
    let q3_q0 = 2.0 * q3 * q0;
    let q1_q3 = 2.0 * q1 * q3;
    let q2_q0 = 2.0 * q2 * q0;
    let q2_q3 = 2.0 * q2 * q3;
    let q1_q0 = 2.0 * q1 * q0;

    Ok(Matrix3::new(
        1.0 - sq_q2 - sq_q3,
        q1_q2 - q3_q0,
        q1_q3 + q2_q0,
        q1_q2 + q3_q0,
        1.0 - sq_q1 - sq_q3,
        q2_q3 - q1_q0,
        q1_q3 - q2_q0,
        q2_q3 + q1_q0,
        1.0 - sq_q1 - sq_q2,
    ))
}

/// Returns `[azimuth, pitch, roll]` of a rotation matrix.
///
/// - azimuth: rotation about -z
/// - pitch: rotation about -x
/// - roll: rotation about y
pub fn orientation_from_matrix(matrix: &Matrix3<f64>) -> [f64; N_EULER_ANGLES] {
    let azimuth = matrix[(0, 1)].atan2(matrix[(1, 1)]);
    // Rounding on non-unit rotation vectors can push the sine slightly past 1.
    let pitch = (-matrix[(2, 1)]).clamp(-1.0, 1.0).asin();
    let roll = (-matrix[(2, 0)]).atan2(matrix[(2, 2)]);
    [azimuth, pitch, roll]
}

/// Flattens a matrix into `m11, m12, m13, m21, .., m33`.
pub fn row_major(matrix: &Matrix3<f64>) -> [f64; N_ROTATION_MATRIX_CELLS] {
    let mut cells = [0.0; N_ROTATION_MATRIX_CELLS];
    for row in 0..3 {
        for col in 0..3 {
            cells[row * 3 + col] = matrix[(row, col)];
        }
    }
    cells
}

/// Moves the yaw origin from the device x-axis to magnetic north.
/// The result lies in (-π, π].
pub fn remap_yaw_to_magnetic_north(yaw: f64) -> f64 {
    let wrapped = (yaw + PI + PI / 2.0).rem_euclid(2.0 * PI) - PI;
    if wrapped <= -PI {
        wrapped + 2.0 * PI
    } else {
        wrapped
    }
}
