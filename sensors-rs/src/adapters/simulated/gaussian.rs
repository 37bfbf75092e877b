use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use common::SensorError;

/// Functionality to add some Gaussian noise.
#[derive(Clone, Debug)]
pub(super) struct GaussianNoise {
    normal: Normal<f64>,
}

impl GaussianNoise {
    /// Creates new distribution from mean and stdev
    pub(super) fn new(mean: f64, stdev: f64) -> Result<Self, SensorError> {
        let normal = Normal::new(mean, stdev)
            .map_err(|e| SensorError::InvalidArgument(format!("Invalid noise: {}", e)))?;
        Ok(Self { normal })
    }

    /// Sample from distribution
    pub(super) fn draw_sample(&self, rng: &mut StdRng) -> f64 {
        self.normal.sample(rng)
    }

    /// Adds noise to every axis
    pub(super) fn add_noise_axes(&self, rng: &mut StdRng, data: [f64; 3]) -> [f64; 3] {
        data.map(|d| d + self.draw_sample(rng))
    }
}
