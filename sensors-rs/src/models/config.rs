use serde::{Deserialize, Serialize};

use common::constants::{DEFAULT_CHANNEL_NAMESPACE, DEFAULT_SAMPLING_PERIOD_MICROS};
use common::{PlatformFamily, PlatformSensor, SensorError};

/// Shortest period a simulated sensor ticks at, in microseconds.
pub const DEFAULT_MIN_PERIOD_MICROS: u64 = 1_000;

fn from_json<T: for<'de> Deserialize<'de>>(json: &str) -> Result<T, SensorError> {
    serde_json::from_str(json).map_err(|e| SensorError::InvalidArgument(e.to_string()))
}

/// Plugin level settings. Missing fields take their default value.
///
/// # Examples
///
/// ```
/// use sensors_rs::PluginConfig;
///
/// let config = PluginConfig::from_json(r#"{"default_sampling_period_micros": 20000}"#).unwrap();
/// assert_eq!(config.default_sampling_period_micros, 20_000);
/// assert_eq!(config.channel_namespace, "dev.fluttercommunity.plus/sensors");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Prefix of every channel name.
    pub channel_namespace: String,
    /// Sampling period of every stream until changed by a method call.
    pub default_sampling_period_micros: u64,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            channel_namespace: DEFAULT_CHANNEL_NAMESPACE.to_string(),
            default_sampling_period_micros: DEFAULT_SAMPLING_PERIOD_MICROS,
        }
    }
}

impl PluginConfig {
    pub fn from_json(json: &str) -> Result<Self, SensorError> {
        from_json(json)
    }
}

/// Describes a simulated device.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceProfile {
    pub platform: PlatformFamily,
    /// Sensors present on the device.
    pub sensors: Vec<PlatformSensor>,
    /// Standard deviation of the Gaussian noise added to axis samples.
    pub noise_stdev: Option<f64>,
    /// Seed of the noise generator. Random when `None`.
    pub seed: Option<u64>,
    pub min_period_micros: u64,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self::android()
    }
}

impl DeviceProfile {
    /// Android-like device with every sensor.
    pub fn android() -> Self {
        Self::with_platform(PlatformFamily::Android)
    }

    /// Apple-like device with every sensor.
    pub fn apple() -> Self {
        Self::with_platform(PlatformFamily::Apple)
    }

    fn with_platform(platform: PlatformFamily) -> Self {
        Self {
            platform,
            sensors: PlatformSensor::ALL.to_vec(),
            noise_stdev: None,
            seed: None,
            min_period_micros: DEFAULT_MIN_PERIOD_MICROS,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SensorError> {
        from_json(json)
    }

    /// Removes a sensor from the device.
    pub fn without(mut self, sensor: PlatformSensor) -> Self {
        self.sensors.retain(|present| *present != sensor);
        self
    }

    pub fn with_noise(mut self, stdev: f64) -> Self {
        self.noise_stdev = Some(stdev);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn has_sensor(&self, sensor: PlatformSensor) -> bool {
        self.sensors.contains(&sensor)
    }

    pub fn validate(&self) -> Result<(), SensorError> {
        if let Some(stdev) = self.noise_stdev {
            if !stdev.is_finite() || stdev < 0.0 {
                return Err(SensorError::InvalidArgument(format!(
                    "Noise standard deviation must be finite and non negative, got {}",
                    stdev
                )));
            }
        }
        if self.min_period_micros == 0 {
            return Err(SensorError::InvalidArgument(
                "Minimum sampling period must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
