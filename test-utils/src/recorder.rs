use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use uuid::Uuid;

use common::{PlatformError, SensorReading, StreamEvent};
use publisher::{listener, Listener};

const POLL_PERIOD_MILLIS: u64 = 10;

/// Sink recording every stream event it receives, in arrival order.
#[derive(Debug, Default)]
pub struct EventRecorder {
    events: Mutex<Vec<StreamEvent>>,
}

impl EventRecorder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<StreamEvent>> {
        // A panicking test thread must not hide the events recorded so far.
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn record(&self, _id: Uuid, event: Arc<StreamEvent>) {
        self.lock().push((*event).clone());
    }

    /// Returns a listener feeding this recorder.
    pub fn listener(self: &Arc<Self>) -> Listener<StreamEvent> {
        let recorder = self.clone();
        listener!(recorder.record)
    }

    pub fn events(&self) -> Vec<StreamEvent> {
        self.lock().clone()
    }

    pub fn readings(&self) -> Vec<SensorReading> {
        self.lock()
            .iter()
            .filter_map(|event| event.as_reading().cloned())
            .collect()
    }

    pub fn errors(&self) -> Vec<PlatformError> {
        self.lock()
            .iter()
            .filter_map(|event| event.as_error().cloned())
            .collect()
    }

    pub fn reading_count(&self) -> usize {
        self.lock().iter().filter(|event| !event.is_error()).count()
    }

    pub fn error_count(&self) -> usize {
        self.lock().iter().filter(|event| event.is_error()).count()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Waits until at least `count` readings were recorded. Returns false on timeout.
    pub async fn wait_for_readings(&self, count: usize, timeout: Duration) -> bool {
        let poll = async {
            while self.reading_count() < count {
                tokio::time::sleep(Duration::from_millis(POLL_PERIOD_MILLIS)).await;
            }
        };
        tokio::time::timeout(timeout, poll).await.is_ok()
    }
}
