use log::{debug, info, warn};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::UnboundedReceiver;
use uuid::Uuid;

use common::constants::METHOD_CHANNEL_SUFFIX;
use common::{Notifiable, PlatformFamily, SensorError, SensorKind, StreamEvent};
use publisher::{channel_listener, PublisherManager};

use crate::method_call::{sampling_period_argument, MethodCall, MethodResponse, SensorMethod};
use crate::models::config::PluginConfig;
use crate::ports::SensorBackend;
use crate::stream_handler::StreamHandler;

/// Stream consumer returned by [`SensorsPlugin::subscribe`].
pub struct Subscription {
    id: Uuid,
    kind: SensorKind,
    receiver: UnboundedReceiver<Arc<StreamEvent>>,
}

impl Subscription {
    /// Sink id, to be passed to [`SensorsPlugin::cancel`].
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> SensorKind {
        self.kind
    }

    /// Waits for the next event. Returns `None` once the sink was removed and every
    /// pending event was consumed.
    pub async fn recv(&mut self) -> Option<Arc<StreamEvent>> {
        self.receiver.recv().await
    }

    pub fn try_recv(&mut self) -> Result<Arc<StreamEvent>, TryRecvError> {
        self.receiver.try_recv()
    }

    pub fn into_receiver(self) -> UnboundedReceiver<Arc<StreamEvent>> {
        self.receiver
    }
}

/// Motion sensor plugin attached to a host.
///
/// Serves one event stream per [`SensorKind`] and a method channel. A stream starts
/// reading its platform sensor when its first sink registers and releases it when the
/// last sink is cancelled.
pub struct SensorsPlugin {
    config: PluginConfig,
    backend: Arc<dyn SensorBackend>,
    handlers: BTreeMap<SensorKind, StreamHandler>,
    sinks: PublisherManager<StreamEvent, SensorKind>,
    detached: Arc<AtomicBool>,
    lifecycle: Mutex<()>,
}

impl SensorsPlugin {
    /// Builds a stream handler per sensor kind on top of `backend`.
    pub fn attach(backend: Arc<dyn SensorBackend>, config: PluginConfig) -> Self {
        let sinks = PublisherManager::new(&SensorKind::ALL);
        let detached = Arc::new(AtomicBool::new(false));

        let handlers = SensorKind::ALL
            .iter()
            .filter_map(|kind| {
                let publisher = sinks.get_publisher(kind)?;
                let handler = StreamHandler::new(
                    *kind,
                    backend.clone(),
                    publisher,
                    config.default_sampling_period_micros,
                    detached.clone(),
                );
                Some((*kind, handler))
            })
            .collect();

        info!(
            "Sensors plugin attached to a {:?} device on {}",
            backend.platform(),
            config.channel_namespace
        );
        Self {
            config,
            backend,
            handlers,
            sinks,
            detached,
            lifecycle: Mutex::new(()),
        }
    }

    fn lifecycle(&self) -> MutexGuard<'_, ()> {
        self.lifecycle
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn ensure_attached(&self) -> Result<(), SensorError> {
        if self.is_detached() {
            return Err(SensorError::Detached);
        }
        Ok(())
    }

    fn handler(&self, kind: SensorKind) -> Result<&StreamHandler, SensorError> {
        self.handlers
            .get(&kind)
            .ok_or_else(|| SensorError::Runtime(format!("No stream handler for {}", kind)))
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn platform(&self) -> PlatformFamily {
        self.backend.platform()
    }

    pub fn is_detached(&self) -> bool {
        self.detached.load(Ordering::Acquire)
    }

    pub fn method_channel_name(&self) -> String {
        format!("{}/{}", self.config.channel_namespace, METHOD_CHANNEL_SUFFIX)
    }

    pub fn event_channel_name(&self, kind: SensorKind) -> String {
        format!("{}/{}", self.config.channel_namespace, kind.channel_suffix())
    }

    /// Names of every channel served by the plugin, method channel first.
    pub fn channel_names(&self) -> Vec<String> {
        std::iter::once(self.method_channel_name())
            .chain(SensorKind::ALL.iter().map(|kind| self.event_channel_name(*kind)))
            .collect()
    }

    /// Resolves the sensor kind served on an event channel.
    pub fn kind_for_channel(&self, channel_name: &str) -> Result<SensorKind, SensorError> {
        channel_name
            .strip_prefix(self.config.channel_namespace.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|suffix| *suffix != METHOD_CHANNEL_SUFFIX)
            .ok_or_else(|| SensorError::InvalidArgument(format!("Unknown channel {}", channel_name)))
            .and_then(|suffix| SensorKind::try_from(suffix).map_err(SensorError::InvalidArgument))
    }

    pub fn is_available(&self, kind: SensorKind) -> bool {
        self.handlers
            .get(&kind)
            .map_or(false, |handler| handler.is_available())
    }

    pub fn is_streaming(&self, kind: SensorKind) -> bool {
        self.handlers
            .get(&kind)
            .map_or(false, |handler| handler.is_active())
    }

    pub fn sampling_period_micros(&self, kind: SensorKind) -> Option<u64> {
        self.handlers
            .get(&kind)
            .map(|handler| handler.sampling_period_micros())
    }

    pub fn listener_count(&self, kind: SensorKind) -> usize {
        self.sinks.listener_count(&kind)
    }

    /// Registers a sink on the stream of `kind` and starts the stream.
    ///
    /// When the device has no sensor for `kind`, the sink receives a single `NO_SENSOR`
    /// error event and is removed right away. Returns Detached after [`Self::detach`].
    pub fn listen(
        &self,
        kind: SensorKind,
        listener: &mut dyn Notifiable<StreamEvent>,
    ) -> Result<Uuid, SensorError> {
        let callback = listener.get_callback();
        let (id, start_error) = {
            let _guard = self.lifecycle();
            self.ensure_attached()?;
            let handler = self.handler(kind)?;
            let id = self
                .sinks
                .add_listener(listener, &kind)
                .map_err(|e| SensorError::Runtime(e.to_string()))?;
            debug!("Sink {} registered on {}", id, self.event_channel_name(kind));

            let start_error = handler.start().err();
            if start_error.is_some() {
                if let Err(e) = self.sinks.remove_listener(id) {
                    warn!("Failed to remove sink {}: {}", id, e);
                }
            }
            (id, start_error)
        };

        // Delivered once the sink is gone and the lock released, so the sink may call
        // back into the plugin.
        if let Some(e) = start_error {
            warn!("Cannot start {} stream: {}", kind, e);
            callback(id, Arc::new(StreamEvent::Error(e.to_platform_error())));
        }
        Ok(id)
    }

    /// Same as [`Self::listen`], resolving the kind from an event channel name.
    pub fn listen_channel(
        &self,
        channel_name: &str,
        listener: &mut dyn Notifiable<StreamEvent>,
    ) -> Result<Uuid, SensorError> {
        let kind = self.kind_for_channel(channel_name)?;
        self.listen(kind, listener)
    }

    /// Registers a channel sink on the stream of `kind`.
    pub fn subscribe(&self, kind: SensorKind) -> Result<Subscription, SensorError> {
        let (mut listener, receiver) = channel_listener::<StreamEvent>();
        let id = self.listen(kind, &mut listener)?;
        Ok(Subscription { id, kind, receiver })
    }

    /// Removes a sink. The stream is stopped when it was its last sink.
    /// Returns InvalidArgument for unknown sink ids.
    pub fn cancel(&self, id: Uuid) -> Result<(), SensorError> {
        let _guard = self.lifecycle();
        let kind = self
            .sinks
            .remove_listener(id)
            .map_err(|e| SensorError::InvalidArgument(e.to_string()))?;
        debug!("Sink {} removed from {}", id, self.event_channel_name(kind));

        if self.sinks.listener_count(&kind) == 0 {
            self.handler(kind)?.stop();
        }
        Ok(())
    }

    /// Answers a method channel request.
    pub fn handle_method_call(&self, call: &MethodCall) -> MethodResponse {
        let method = match SensorMethod::parse(&call.method) {
            Some(method) => method,
            None => {
                debug!("Method {} not implemented", call.method);
                return MethodResponse::NotImplemented;
            }
        };

        let result = self.ensure_attached().and_then(|_| {
            let handler = self.handler(method.kind())?;
            match method {
                SensorMethod::IsAvailable(_) => Ok(Value::Bool(handler.is_available())),
                SensorMethod::SetSamplingPeriod(_) => {
                    let sampling_period_micros = sampling_period_argument(&call.arguments)?;
                    handler.set_sampling_period(sampling_period_micros)?;
                    Ok(Value::Null)
                }
            }
        });
        if let Err(e) = &result {
            warn!("Method {} failed: {}", call.method, e);
        }
        MethodResponse::from(result)
    }

    /// Stops every stream and removes every sink. Events still in flight are dropped.
    pub fn detach(&self) {
        let _guard = self.lifecycle();
        if self.detached.swap(true, Ordering::AcqRel) {
            return;
        }
        for handler in self.handlers.values() {
            handler.stop();
        }
        self.sinks.unregister_all();
        info!("Sensors plugin detached from {}", self.config.channel_namespace);
    }
}

impl Drop for SensorsPlugin {
    fn drop(&mut self) {
        self.detach();
    }
}
