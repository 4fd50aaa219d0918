//! Runs a pipeline end to end.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use super::config::{Pipeline, SolverConfig};
use crate::cost::{conflict_count, slot_count};
use crate::error::Result;
use crate::graph::{Assignment, ConflictGraph, Slot};
use crate::greedy::GreedyColorer;
use crate::local::LocalSearchRunner;
use crate::sa::AnnealRunner;

/// Outcome of a solver run.
#[derive(Debug, Clone)]
pub struct SolveReport {
    /// Total assignment, indexed like the graph's courses.
    pub assignment: Assignment,

    /// Conflicting pairs sharing a slot in `assignment`.
    pub conflicts: usize,

    /// Distinct slots used by `assignment`.
    pub slots: usize,

    pub pipeline: Pipeline,

    /// Wall-clock time of the whole pipeline.
    pub elapsed: Duration,

    /// Whether the refinement phase stopped on its time limit.
    pub timed_out: bool,
}

impl SolveReport {
    /// Whether no two conflicting courses share a slot.
    pub fn is_feasible(&self) -> bool {
        self.conflicts == 0
    }

    /// The assignment keyed by course identifier.
    pub fn to_map<C: Eq + Hash + Clone>(&self, graph: &ConflictGraph<C>) -> HashMap<C, Slot> {
        self.assignment.to_map(graph)
    }
}

/// Composes construction and refinement.
pub struct Solver;

impl Solver {
    /// Runs the configured pipeline on `graph`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_timetable::graph::ConflictGraph;
    /// use u_timetable::solver::{Pipeline, Solver, SolverConfig};
    ///
    /// let graph = ConflictGraph::from_conflicts(
    ///     ["a", "b", "c", "d"],
    ///     [("a", "b"), ("b", "c"), ("c", "d")],
    /// ).unwrap();
    ///
    /// let config = SolverConfig::default().with_pipeline(Pipeline::LocalSearch);
    /// let report = Solver::run(&graph, &config).unwrap();
    /// assert!(report.is_feasible());
    /// ```
    pub fn run<C>(graph: &ConflictGraph<C>, config: &SolverConfig) -> Result<SolveReport> {
        config.validate()?;
        let start = Instant::now();

        let (assignment, timed_out) = match config.pipeline {
            Pipeline::Greedy => (GreedyColorer::color_with(graph, config.greedy), false),
            Pipeline::GreedyAnnealing => {
                let initial = GreedyColorer::color_with(graph, config.greedy);
                let result = AnnealRunner::run(graph, initial, &config.anneal)?;
                (result.best, result.timed_out)
            }
            Pipeline::LocalSearch => {
                let initial = Assignment::uniform(graph.len(), 1);
                let result = LocalSearchRunner::run(graph, initial, &config.local)?;
                let timed_out = result.timed_out();
                (result.assignment, timed_out)
            }
            Pipeline::GreedyLocalSearch => {
                let initial = GreedyColorer::color_with(graph, config.greedy);
                let result = LocalSearchRunner::run(graph, initial, &config.local)?;
                let timed_out = result.timed_out();
                (result.assignment, timed_out)
            }
        };

        let report = SolveReport {
            conflicts: conflict_count(graph, &assignment),
            slots: slot_count(&assignment),
            assignment,
            pipeline: config.pipeline,
            elapsed: start.elapsed(),
            timed_out,
        };
        tracing::info!(
            pipeline = ?report.pipeline,
            courses = graph.len(),
            conflicts = report.conflicts,
            slots = report.slots,
            timed_out = report.timed_out,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "timetable solved"
        );
        Ok(report)
    }
}

/// Assigns every course a slot using the default pipeline.
///
/// The mapping is total: every course of `graph` is present.
///
/// ```
/// use u_timetable::graph::ConflictGraph;
/// use u_timetable::solve;
///
/// let graph = ConflictGraph::from_conflicts(["a", "b"], [("a", "b")]).unwrap();
/// let slots = solve(&graph);
/// assert_ne!(slots["a"], slots["b"]);
/// ```
pub fn solve<C: Eq + Hash + Clone>(graph: &ConflictGraph<C>) -> HashMap<C, Slot> {
    match Solver::run(graph, &SolverConfig::default()) {
        Ok(report) => report.to_map(graph),
        Err(err) => {
            tracing::error!(%err, "default pipeline failed, keeping the greedy coloring");
            GreedyColorer::color(graph).to_map(graph)
        }
    }
}
