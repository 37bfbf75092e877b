use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use common::constants::UNKNOWN_ACCURACY;
use common::{Clock, RawSample, SensorError, SensorKind, StreamEvent};
use normalizer_rs::SensorSampleNormalizer;
use publisher::{Publishable, Publisher};

use crate::ports::{RegistrationId, SensorBackend, SensorEventListener};

/// Receives the platform callbacks of one stream and publishes them as stream events.
struct StreamListener {
    kind: SensorKind,
    normalizer: SensorSampleNormalizer,
    sinks: Publisher<StreamEvent>,
    accuracy: Arc<AtomicI32>,
    detached: Arc<AtomicBool>,
}

impl StreamListener {
    fn publish(&self, event: StreamEvent) {
        if self.detached.load(Ordering::Acquire) {
            debug!("Dropping late {} event, plugin detached", self.kind);
            return;
        }
        self.sinks.notify_listeners(Arc::new(event));
    }

    fn accuracy(&self) -> Option<i32> {
        self.normalizer
            .platform()
            .reports_accuracy()
            .then(|| self.accuracy.load(Ordering::Acquire))
    }
}

impl SensorEventListener for StreamListener {
    fn on_sensor_changed(&self, sample: RawSample) {
        let event = match self
            .normalizer
            .normalize(self.kind, &sample, self.accuracy(), Clock::now())
        {
            Ok(reading) => StreamEvent::Reading(reading),
            Err(e) => {
                warn!("Failed to normalize {} sample: {}", self.kind, e);
                StreamEvent::Error(e.into())
            }
        };
        self.publish(event);
    }

    fn on_accuracy_changed(&self, accuracy: i32) {
        self.accuracy.store(accuracy, Ordering::Release);
    }

    fn on_read_error(&self, message: String) {
        warn!("{} read error: {}", self.kind, message);
        self.publish(StreamEvent::Error(SensorError::PlatformRead(message).into()));
    }
}

struct HandlerState {
    sampling_period_micros: u64,
    registration: Option<RegistrationId>,
}

/// Adapter between one sensor kind and the platform sensor service.
///
/// The platform listener is registered by `start` and released by `stop`. Changing the
/// sampling period of an active stream re-registers the listener with the new period.
pub struct StreamHandler {
    kind: SensorKind,
    backend: Arc<dyn SensorBackend>,
    listener: Arc<StreamListener>,
    state: Mutex<HandlerState>,
}

impl StreamHandler {
    pub fn new(
        kind: SensorKind,
        backend: Arc<dyn SensorBackend>,
        sinks: Publisher<StreamEvent>,
        sampling_period_micros: u64,
        detached: Arc<AtomicBool>,
    ) -> Self {
        let listener = Arc::new(StreamListener {
            kind,
            normalizer: SensorSampleNormalizer::new(backend.platform()),
            sinks,
            accuracy: Arc::new(AtomicI32::new(UNKNOWN_ACCURACY)),
            detached,
        });
        Self {
            kind,
            backend,
            listener,
            state: Mutex::new(HandlerState {
                sampling_period_micros,
                registration: None,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, HandlerState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn kind(&self) -> SensorKind {
        self.kind
    }

    /// True when the device has the sensor backing this kind.
    pub fn is_available(&self) -> bool {
        self.backend
            .default_sensor(self.kind.platform_sensor())
            .is_some()
    }

    pub fn is_active(&self) -> bool {
        self.state().registration.is_some()
    }

    pub fn sampling_period_micros(&self) -> u64 {
        self.state().sampling_period_micros
    }

    /// Last accuracy reported by the platform, `-1` if none.
    pub fn accuracy(&self) -> i32 {
        self.listener.accuracy.load(Ordering::Acquire)
    }

    /// Registers the platform listener. Does nothing if already active.
    /// Returns SensorUnavailable if the device has no sensor for this kind.
    pub fn start(&self) -> Result<(), SensorError> {
        let mut state = self.state();
        if state.registration.is_some() {
            return Ok(());
        }
        if !self.is_available() {
            return Err(SensorError::SensorUnavailable(self.kind));
        }
        let id = self.register(state.sampling_period_micros)?;
        state.registration = Some(id);
        info!(
            "{} stream started, sampling every {} us",
            self.kind, state.sampling_period_micros
        );
        Ok(())
    }

    /// Releases the platform listener. Does nothing if not active.
    pub fn stop(&self) {
        if let Some(id) = self.state().registration.take() {
            self.backend.unregister_listener(id);
            info!("{} stream stopped", self.kind);
        }
    }

    /// Stores the sampling period and applies it right away to an active stream.
    /// Returns InvalidArgument on negative periods. If the stream cannot be re-registered,
    /// it keeps running at its previous period and the error is returned.
    pub fn set_sampling_period(&self, sampling_period_micros: i64) -> Result<(), SensorError> {
        let sampling_period_micros = u64::try_from(sampling_period_micros).map_err(|_| {
            SensorError::InvalidArgument(format!(
                "Sampling period must be non negative, got {}",
                sampling_period_micros
            ))
        })?;

        let mut state = self.state();
        // The running registration is only released once its replacement is live
        if let Some(previous) = state.registration {
            let id = self.register(sampling_period_micros)?;
            self.backend.unregister_listener(previous);
            state.registration = Some(id);
            debug!("{} listener {} replaced by {}", self.kind, previous, id);
        }
        state.sampling_period_micros = sampling_period_micros;
        info!(
            "{} sampling period set to {} us",
            self.kind, sampling_period_micros
        );
        Ok(())
    }

    fn register(&self, sampling_period_micros: u64) -> Result<RegistrationId, SensorError> {
        let listener: Arc<dyn SensorEventListener> = self.listener.clone();
        self.backend
            .register_listener(self.kind.platform_sensor(), listener, sampling_period_micros)
    }
}
