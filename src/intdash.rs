use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("upstream request failed: {0}")]
    Upstream(String),
}

/// Narrow capability interface over the intdash API: fetch the float64 data
/// points recorded for one measurement.
#[async_trait]
pub trait MeasurementSource: Send + Sync {
    async fn fetch_data_points(&self, measurement_uuid: &str) -> Result<Vec<f64>, FetchError>;
}

/// Placeholder measurement source used until the real intdash integration
/// lands. Draws a fixed number of points from a normal distribution with a
/// fixed seed, so its output is reproducible across invocations and across
/// runs. Not a real data source.
pub struct SyntheticMeasurementSource {
    pub seed: u64,
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
}

impl Default for SyntheticMeasurementSource {
    fn default() -> Self {
        SyntheticMeasurementSource {
            seed: 0,
            count: 1000,
            mean: 100.0,
            std_dev: 15.0,
        }
    }
}

#[async_trait]
impl MeasurementSource for SyntheticMeasurementSource {
    async fn fetch_data_points(&self, _measurement_uuid: &str) -> Result<Vec<f64>, FetchError> {
        let normal = Normal::new(self.mean, self.std_dev)
            .map_err(|e| FetchError::Upstream(format!("invalid distribution parameters: {}", e)))?;
        let mut rng = StdRng::seed_from_u64(self.seed);
        Ok(normal.sample_iter(&mut rng).take(self.count).collect())
    }
}
