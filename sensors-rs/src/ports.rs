use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use common::{PlatformFamily, PlatformSensor, RawSample, SensorError};

/// Identifies one platform listener registration.
pub type RegistrationId = Uuid;

/// Static description of a sensor present on the device.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensorInfo {
    pub sensor: PlatformSensor,
    pub name: String,
    pub vendor: String,
    /// Shortest sampling period the sensor supports.
    pub min_period_micros: u64,
}

/// Callbacks invoked by the platform sensor service, from a thread it owns.
pub trait SensorEventListener: Send + Sync {
    fn on_sensor_changed(&self, sample: RawSample);
    fn on_accuracy_changed(&self, accuracy: i32);
    /// A single read failed. Later callbacks are not affected.
    fn on_read_error(&self, message: String);
}

/// Platform sensor service, shared by every stream handler.
pub trait SensorBackend: Send + Sync {
    fn platform(&self) -> PlatformFamily;

    /// Returns the default sensor of a type, or `None` when the device has none.
    fn default_sensor(&self, sensor: PlatformSensor) -> Option<SensorInfo>;

    /// Starts delivering samples of `sensor` to `listener` every `sampling_period_micros`.
    /// Returns InvalidArgument if the device has no such sensor, or Runtime if the
    /// service cannot be driven.
    fn register_listener(
        &self,
        sensor: PlatformSensor,
        listener: Arc<dyn SensorEventListener>,
        sampling_period_micros: u64,
    ) -> Result<RegistrationId, SensorError>;

    /// Stops a registration. Unknown ids are ignored.
    fn unregister_listener(&self, id: RegistrationId);
}
