pub mod callback;
pub mod clock;
pub mod event;
pub mod platform;
pub mod raw_sample;
pub mod sensor_kind;
pub mod sensor_reading;

pub use callback::Callback;
pub use clock::Clock;
pub use event::StreamEvent;
pub use platform::{PlatformFamily, PlatformSensor};
pub use raw_sample::{Attitude, RawSample};
pub use sensor_kind::SensorKind;
pub use sensor_reading::SensorReading;
