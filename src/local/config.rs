//! Local search configuration.

use std::time::Duration;

use crate::error::{Result, TimetableError};

/// Configuration parameters for the hill climber.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_timetable::local::LocalSearchConfig;
///
/// let config = LocalSearchConfig::default()
///     .with_time_limit(Duration::from_secs(5))
///     .with_max_iterations(10_000);
/// assert_eq!(config.max_iterations, 10_000);
/// ```
#[derive(Debug, Clone)]
pub struct LocalSearchConfig {
    /// Wall-clock budget, polled once per outer iteration.
    pub time_limit: Duration,

    /// Maximum number of outer iterations. 0 = no limit.
    pub max_iterations: usize,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(300),
            max_iterations: 0,
        }
    }
}

impl LocalSearchConfig {
    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    /// Sets the wall-clock budget in milliseconds.
    pub fn with_time_limit_ms(self, ms: u64) -> Self {
        self.with_time_limit(Duration::from_millis(ms))
    }

    /// Sets the iteration limit (0 to disable).
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.time_limit.is_zero() {
            return Err(TimetableError::config("time_limit must be positive"));
        }
        Ok(())
    }
}
