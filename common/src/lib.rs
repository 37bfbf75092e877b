//! General functionality for the `sensors-rs` workspace.
//!
//! Holds the vocabulary every other crate speaks: the closed set of sensor kinds,
//! the canonical reading layout, the raw payloads emitted by platform sensor
//! services, the events forwarded to stream consumers and the error model.

pub mod constants;
pub mod errors;

#[doc(hidden)]
pub mod traits;
#[doc(hidden)]
pub mod types;

// Re-export traits
#[doc(inline)]
pub use traits::Notifiable;

// Re-export types
#[doc(inline)]
pub use errors::{PlatformError, SensorError};
#[doc(inline)]
pub use types::{
    Attitude, Callback, Clock, PlatformFamily, PlatformSensor, RawSample, SensorKind,
    SensorReading, StreamEvent,
};
