//! Solver configuration.

use crate::error::Result;
use crate::greedy::GreedyStrategy;
use crate::local::LocalSearchConfig;
use crate::sa::AnnealConfig;

/// Construction and refinement phases to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pipeline {
    /// Greedy construction only.
    Greedy,
    /// Greedy construction refined by annealing.
    #[default]
    GreedyAnnealing,
    /// Hill climbing from an assignment with every course in slot 1.
    LocalSearch,
    /// Hill climbing from the greedy construction.
    GreedyLocalSearch,
}

/// Configuration for a full solver run.
///
/// # Examples
///
/// ```
/// use u_timetable::solver::{Pipeline, SolverConfig};
/// use u_timetable::sa::AnnealConfig;
///
/// let config = SolverConfig::default()
///     .with_pipeline(Pipeline::GreedyAnnealing)
///     .with_anneal(AnnealConfig::default().with_seed(42));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    pub pipeline: Pipeline,

    /// Visiting order of the greedy construction.
    pub greedy: GreedyStrategy,

    /// Used by the hill climbing pipelines.
    pub local: LocalSearchConfig,

    /// Used by [`Pipeline::GreedyAnnealing`].
    pub anneal: AnnealConfig,
}

impl SolverConfig {
    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn with_greedy(mut self, strategy: GreedyStrategy) -> Self {
        self.greedy = strategy;
        self
    }

    pub fn with_local(mut self, local: LocalSearchConfig) -> Self {
        self.local = local;
        self
    }

    pub fn with_anneal(mut self, anneal: AnnealConfig) -> Self {
        self.anneal = anneal;
        self
    }

    /// Validates the configuration of the phases the pipeline runs.
    pub fn validate(&self) -> Result<()> {
        match self.pipeline {
            Pipeline::Greedy => Ok(()),
            Pipeline::GreedyAnnealing => self.anneal.validate(),
            Pipeline::LocalSearch | Pipeline::GreedyLocalSearch => self.local.validate(),
        }
    }
}
