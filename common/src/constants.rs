/// Standard gravity used to convert g-unit accelerations into m/s^2.
pub const GRAVITY: f64 = 9.81;

/// Accuracy reported when the platform has no accuracy channel.
pub const UNKNOWN_ACCURACY: i32 = -1;

/// Sampling period applied to every stream until changed, in microseconds.
pub const DEFAULT_SAMPLING_PERIOD_MICROS: u64 = 200_000;

pub const N_XYZ_COORDINATES: usize = 3;
pub const N_EULER_ANGLES: usize = 3;
pub const N_QUATERNION_COORDINATES: usize = 4;
pub const N_ROTATION_MATRIX_CELLS: usize = 9;

/// Accuracy and timestamp appended after the payload of every reading.
pub const N_TRAILER_FIELDS: usize = 2;

pub const DEFAULT_CHANNEL_NAMESPACE: &str = "dev.fluttercommunity.plus/sensors";
pub const METHOD_CHANNEL_SUFFIX: &str = "method";
