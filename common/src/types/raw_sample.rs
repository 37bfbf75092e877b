use serde::{Deserialize, Serialize};

use crate::constants::{N_QUATERNION_COORDINATES, N_ROTATION_MATRIX_CELLS, N_XYZ_COORDINATES};

/// Payload of a single platform sensor callback, in platform-native units and ordering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RawSample {
    /// Three axis values (acceleration, rotation rate or magnetic field).
    Axes([f64; N_XYZ_COORDINATES]),
    /// Rotation vector `[x, y, z]`, `[x, y, z, w]` or `[x, y, z, w, heading_accuracy]`.
    RotationVector(Vec<f64>),
    /// Attitude resolved by the platform.
    Attitude(Attitude),
}

impl RawSample {
    pub fn variant_name(&self) -> &'static str {
        match self {
            RawSample::Axes(_) => "axes",
            RawSample::RotationVector(_) => "rotation vector",
            RawSample::Attitude(_) => "attitude",
        }
    }
}

/// Device attitude as delivered by a platform that resolves it itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attitude {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
    /// `[w, x, y, z]`
    pub quaternion: [f64; N_QUATERNION_COORDINATES],
    /// `m11, m12, m13, m21, .., m33`
    pub rotation_matrix: [f64; N_ROTATION_MATRIX_CELLS],
}
