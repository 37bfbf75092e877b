// Emulates the sensor service of a real device

mod gaussian;
mod motion;

use dashmap::DashMap;
use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

use common::{PlatformFamily, PlatformSensor, RawSample, SensorError};

use crate::models::config::DeviceProfile;
use crate::ports::{RegistrationId, SensorBackend, SensorEventListener, SensorInfo};
use gaussian::GaussianNoise;

/// Accuracy status reported once after registration on Android-like devices.
pub const SENSOR_STATUS_ACCURACY_HIGH: i32 = 3;
const GAUSSIAN_SENSOR_MEAN: f64 = 0f64;
const VENDOR: &str = "sensors-rs";

struct Registration {
    sensor: PlatformSensor,
    sampling_period_micros: u64,
    task: JoinHandle<()>,
}

/// Sensor service of a simulated device. Every registration runs on its own tokio task,
/// ticking at the requested period.
///
/// Tasks are spawned on the runtime the device was created in, so listeners may be
/// registered from threads outside of it.
pub struct SimulatedDevice {
    profile: DeviceProfile,
    runtime: Option<Handle>,
    sensor_noise: Option<GaussianNoise>,
    registrations: Arc<DashMap<RegistrationId, Registration>>,
    pending_faults: Arc<DashMap<PlatformSensor, String>>,
    registration_count: AtomicU64,
}

impl SimulatedDevice {
    /// Creates a device from its profile.
    /// Returns an InvalidArgument error if the profile is inconsistent.
    pub fn new(profile: DeviceProfile) -> Result<Self, SensorError> {
        profile.validate()?;
        let sensor_noise = profile
            .noise_stdev
            .map(|stdev| GaussianNoise::new(GAUSSIAN_SENSOR_MEAN, stdev))
            .transpose()?;

        info!(
            "Simulated {:?} device with sensors {:?}",
            profile.platform, profile.sensors
        );
        Ok(Self {
            profile,
            runtime: Handle::try_current().ok(),
            sensor_noise,
            registrations: Arc::new(DashMap::new()),
            pending_faults: Arc::new(DashMap::new()),
            registration_count: AtomicU64::new(0),
        })
    }

    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    /// Makes the next tick of `sensor` report a read error instead of a sample.
    pub fn inject_read_error(&self, sensor: PlatformSensor, message: &str) {
        self.pending_faults.insert(sensor, message.to_string());
    }

    /// Number of live listener registrations.
    pub fn active_registrations(&self) -> usize {
        self.registrations.len()
    }

    /// Number of live listener registrations of one sensor.
    pub fn registrations_of(&self, sensor: PlatformSensor) -> usize {
        self.registrations
            .iter()
            .filter(|entry| entry.value().sensor == sensor)
            .count()
    }

    /// Sampling periods of the live registrations of one sensor.
    pub fn sampling_periods_of(&self, sensor: PlatformSensor) -> Vec<u64> {
        self.registrations
            .iter()
            .filter(|entry| entry.value().sensor == sensor)
            .map(|entry| entry.value().sampling_period_micros)
            .collect()
    }

    fn new_rng(&self) -> StdRng {
        let count = self.registration_count.fetch_add(1, Ordering::Relaxed);
        match self.profile.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(count)),
            None => StdRng::from_entropy(),
        }
    }
}

impl SensorBackend for SimulatedDevice {
    fn platform(&self) -> PlatformFamily {
        self.profile.platform
    }

    fn default_sensor(&self, sensor: PlatformSensor) -> Option<SensorInfo> {
        self.profile.has_sensor(sensor).then(|| SensorInfo {
            sensor,
            name: format!("Simulated {}", sensor.name()),
            vendor: VENDOR.to_string(),
            min_period_micros: self.profile.min_period_micros,
        })
    }

    fn register_listener(
        &self,
        sensor: PlatformSensor,
        listener: Arc<dyn SensorEventListener>,
        sampling_period_micros: u64,
    ) -> Result<RegistrationId, SensorError> {
        if !self.profile.has_sensor(sensor) {
            return Err(SensorError::InvalidArgument(format!(
                "No {} sensor on this device",
                sensor.name()
            )));
        }
        let runtime = self
            .runtime
            .clone()
            .or_else(|| Handle::try_current().ok())
            .ok_or_else(|| SensorError::Runtime("No tokio runtime to drive the sensor".to_string()))?;

        let sampling_period_micros = sampling_period_micros.max(self.profile.min_period_micros);
        let period = Duration::from_micros(sampling_period_micros);
        let platform = self.profile.platform;
        let sensor_noise = self.sensor_noise.clone();
        let pending_faults = self.pending_faults.clone();
        let mut rng = self.new_rng();

        let task = runtime.spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            if platform.reports_accuracy() {
                listener.on_accuracy_changed(SENSOR_STATUS_ACCURACY_HIGH);
            }
            let start = tokio::time::Instant::now();
            loop {
                interval.tick().await;
                if let Some((_, message)) = pending_faults.remove(&sensor) {
                    listener.on_read_error(message);
                    continue;
                }
                let sample = match motion::sample(platform, sensor, start.elapsed().as_secs_f64()) {
                    RawSample::Axes(axes) => match &sensor_noise {
                        Some(noise) => RawSample::Axes(noise.add_noise_axes(&mut rng, axes)),
                        None => RawSample::Axes(axes),
                    },
                    other => other,
                };
                listener.on_sensor_changed(sample);
            }
        });

        let id = Uuid::new_v4();
        self.registrations.insert(
            id,
            Registration {
                sensor,
                sampling_period_micros,
                task,
            },
        );
        debug!(
            "Registered {} listener {} every {} us",
            sensor.name(),
            id,
            sampling_period_micros
        );
        Ok(id)
    }

    fn unregister_listener(&self, id: RegistrationId) {
        if let Some((_, registration)) = self.registrations.remove(&id) {
            registration.task.abort();
            debug!("Unregistered {} listener {}", registration.sensor.name(), id);
        }
    }
}

impl Drop for SimulatedDevice {
    fn drop(&mut self) {
        for entry in self.registrations.iter() {
            entry.value().task.abort();
        }
    }
}
