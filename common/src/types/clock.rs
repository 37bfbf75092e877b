use std::time::{SystemTime, UNIX_EPOCH};

/// Capture time of a reading, in whole microseconds since the unix epoch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Clock(u64);

impl Clock {
    pub fn now() -> Self {
        // A clock set before the epoch reports 0 rather than failing the sample.
        let micros = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|now| now.as_micros() as u64)
            .unwrap_or_default();
        Self(micros)
    }

    pub fn from_micros(micros: u64) -> Self {
        Self(micros)
    }

    pub fn as_micros(&self) -> u64 {
        self.0
    }

    pub fn as_secs(&self) -> f64 {
        self.0 as f64 * 1e-6
    }
}
