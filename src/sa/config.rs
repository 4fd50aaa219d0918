//! SA configuration.

use std::time::Duration;

use super::types::Neighborhood;
use crate::cost::DEFAULT_CONFLICT_PENALTY;
use crate::error::{Result, TimetableError};

/// Configuration for the annealer.
///
/// Temperature follows geometric cooling, `T_{k+1} = cooling_rate * T_k`,
/// with `iterations_per_temperature` neighbour evaluations per level, until
/// `T <= min_temperature`.
///
/// # Examples
///
/// ```
/// use u_timetable::sa::{AnnealConfig, Neighborhood};
///
/// let config = AnnealConfig::default()
///     .with_initial_temperature(50.0)
///     .with_cooling_rate(0.9)
///     .with_neighborhood(Neighborhood::Recolor)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct AnnealConfig {
    /// Initial temperature. Higher values allow more exploration.
    pub initial_temperature: f64,

    /// Multiplicative cooling factor in (0, 1), applied once per level.
    pub cooling_rate: f64,

    /// Number of neighbour evaluations at each temperature level.
    pub iterations_per_temperature: usize,

    /// The run stops once the temperature drops to this value.
    pub min_temperature: f64,

    /// Weight of one conflict in the combined cost.
    ///
    /// Should be at least the number of courses so that conflicts always
    /// outweigh slot savings.
    pub conflict_penalty: f64,

    /// Move type used to generate neighbours.
    pub neighborhood: Neighborhood,

    /// Maximum total iterations (hard budget). 0 = no limit.
    pub max_iterations: usize,

    /// Optional wall-clock budget, checked once per temperature level.
    pub time_limit: Option<Duration>,

    /// Random seed for reproducibility. `None` draws one at random.
    pub seed: Option<u64>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            cooling_rate: 0.95,
            iterations_per_temperature: 100,
            min_temperature: 0.01,
            conflict_penalty: DEFAULT_CONFLICT_PENALTY,
            neighborhood: Neighborhood::default(),
            max_iterations: 0,
            time_limit: None,
            seed: None,
        }
    }
}

impl AnnealConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_conflict_penalty(mut self, penalty: f64) -> Self {
        self.conflict_penalty = penalty;
        self
    }

    pub fn with_neighborhood(mut self, neighborhood: Neighborhood) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.initial_temperature <= 0.0 {
            return Err(TimetableError::config("initial_temperature must be positive"));
        }
        if self.min_temperature <= 0.0 {
            return Err(TimetableError::config("min_temperature must be positive"));
        }
        if self.min_temperature >= self.initial_temperature {
            return Err(TimetableError::config(
                "min_temperature must be less than initial_temperature",
            ));
        }
        if self.cooling_rate <= 0.0 || self.cooling_rate >= 1.0 {
            return Err(TimetableError::config(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            )));
        }
        if self.iterations_per_temperature == 0 {
            return Err(TimetableError::config(
                "iterations_per_temperature must be positive",
            ));
        }
        if self.conflict_penalty.is_nan() || self.conflict_penalty <= 0.0 {
            return Err(TimetableError::config(format!(
                "conflict_penalty must be positive, got {}",
                self.conflict_penalty
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnnealConfig::default();
        assert!((config.initial_temperature - 100.0).abs() < 1e-10);
        assert!((config.cooling_rate - 0.95).abs() < 1e-10);
        assert!((config.min_temperature - 0.01).abs() < 1e-12);
        assert!((config.conflict_penalty - 1000.0).abs() < 1e-10);
        assert_eq!(config.iterations_per_temperature, 100);
        assert_eq!(config.neighborhood, Neighborhood::Swap);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_validate_ok() {
        assert!(AnnealConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_bad_temperature() {
        let config = AnnealConfig::default().with_initial_temperature(-1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_min_ge_initial() {
        let config = AnnealConfig::default()
            .with_initial_temperature(10.0)
            .with_min_temperature(20.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_cooling_rate() {
        assert!(AnnealConfig::default().with_cooling_rate(1.0).validate().is_err());
        assert!(AnnealConfig::default().with_cooling_rate(0.0).validate().is_err());
    }

    #[test]
    fn test_validate_bad_penalty() {
        let config = AnnealConfig::default().with_conflict_penalty(f64::NAN);
        assert!(matches!(config.validate(), Err(TimetableError::InvalidConfig(_))));
    }
}
