//! # Crate normalizer-rs
//!
//! ## normalizer-rs
//!
//! Converts raw platform sensor payloads into the canonical cross-platform reading layout.
//!
//! - Accelerations delivered in g with the opposite sign convention are negated and scaled
//!   by standard gravity.
//! - Rotation vectors are expanded into a rotation matrix, a `(w, x, y, z)` quaternion or
//!   orientation angles, using the same formulas as the Android sensor manager.
//! - Quaternions are emitted as `(x, y, z, w)`, matrices row-major.
//! - Absolute yaw of platforms referencing the device x-axis is remapped to magnetic north.
//!
//! Every reading gets the accuracy (`-1` when unknown) and the capture timestamp appended.
//! Normalization is a pure function: it keeps no state and may be called from any thread.

pub mod normalizer;
pub mod rotation;

pub use normalizer::{normalize, SensorSampleNormalizer};
