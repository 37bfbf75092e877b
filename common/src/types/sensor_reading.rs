use serde::{Deserialize, Serialize};

use crate::errors::SensorError;
use crate::types::SensorKind;

/// Canonical, cross-platform reading of a sensor stream.
///
/// The flattened layout is the payload values of the kind, followed by the accuracy
/// and the timestamp in microseconds.
///
/// # Examples
///
/// ```
/// use common::{SensorKind, SensorReading};
///
/// let reading = SensorReading::new(SensorKind::Gyroscope, vec![0.1, 0.2, 0.3], -1, 1_000).unwrap();
/// assert_eq!(reading.to_vec(), vec![0.1, 0.2, 0.3, -1.0, 1000.0]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    kind: SensorKind,
    values: Vec<f64>,
    accuracy: i32,
    timestamp_micros: u64,
}

impl SensorReading {
    /// Creates a reading. Returns an InvalidArgument error if the number of values does
    /// not match the kind.
    pub fn new(
        kind: SensorKind,
        values: Vec<f64>,
        accuracy: i32,
        timestamp_micros: u64,
    ) -> Result<Self, SensorError> {
        if values.len() != kind.value_count() {
            return Err(SensorError::InvalidArgument(format!(
                "{} reading expects {} values, got {}",
                kind,
                kind.value_count(),
                values.len()
            )));
        }
        Ok(Self {
            kind,
            values,
            accuracy,
            timestamp_micros,
        })
    }

    /// Parses a flattened reading array.
    pub fn from_slice(kind: SensorKind, data: &[f64]) -> Result<Self, SensorError> {
        if data.len() != kind.reading_len() {
            return Err(SensorError::InvalidArgument(format!(
                "{} reading expects length {}, got {}",
                kind,
                kind.reading_len(),
                data.len()
            )));
        }
        let n = kind.value_count();
        let timestamp = data[n + 1];
        if timestamp < 0.0 || timestamp.fract() != 0.0 {
            return Err(SensorError::InvalidArgument(format!(
                "Invalid timestamp {}",
                timestamp
            )));
        }
        Self::new(
            kind,
            data[..n].to_vec(),
            data[n] as i32,
            timestamp as u64,
        )
    }

    pub fn kind(&self) -> SensorKind {
        self.kind
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn accuracy(&self) -> i32 {
        self.accuracy
    }

    pub fn timestamp_micros(&self) -> u64 {
        self.timestamp_micros
    }

    /// Flattened reading, as sent over an event channel.
    pub fn to_vec(&self) -> Vec<f64> {
        let mut data = Vec::with_capacity(self.kind.reading_len());
        data.extend_from_slice(&self.values);
        data.push(self.accuracy as f64);
        data.push(self.timestamp_micros as f64);
        data
    }

    /// Flattened reading packed as little-endian float64 values.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.to_vec()
            .into_iter()
            .flat_map(|value| value.to_le_bytes())
            .collect()
    }
}

impl From<SensorReading> for Vec<f64> {
    fn from(value: SensorReading) -> Self {
        value.to_vec()
    }
}
