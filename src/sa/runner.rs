//! SA execution loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::AnnealConfig;
use super::types::Move;
use crate::cost::{conflict_count, CostEvaluator};
use crate::error::Result;
use crate::graph::{Assignment, ConflictGraph};

/// Result of an annealing run.
#[derive(Debug, Clone)]
pub struct AnnealResult {
    /// The best assignment seen. May contain conflicts if the start did.
    pub best: Assignment,

    /// Combined cost of `best`.
    pub best_cost: f64,

    /// Conflict count of `best`.
    pub best_conflicts: usize,

    /// Combined cost of the starting assignment.
    pub initial_cost: f64,

    /// Total number of iterations (neighbor evaluations).
    pub iterations: usize,

    /// Final temperature when the algorithm stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of improving moves.
    pub improving_moves: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Whether the optional wall-clock budget ran out.
    pub timed_out: bool,

    /// Whether the run stopped because no neighbour could be drawn: fewer
    /// than two courses, or a recolor run with every course in slot 1.
    pub moves_exhausted: bool,

    /// Best cost at the start and after every temperature level.
    pub cost_history: Vec<f64>,
}

/// Metropolis acceptance probability of moving from `current_cost` to
/// `neighbor_cost` at `temperature`.
///
/// Exactly 1 for improvements and sideways moves, `exp(-delta / T)` for
/// worsening ones, 0 at a non-positive temperature.
pub fn acceptance_probability(current_cost: f64, neighbor_cost: f64, temperature: f64) -> f64 {
    let delta = neighbor_cost - current_cost;
    if delta <= 0.0 {
        1.0
    } else if temperature > 0.0 {
        (-delta / temperature).exp()
    } else {
        0.0
    }
}

/// Executes Simulated Annealing on a slot assignment.
pub struct AnnealRunner;

impl AnnealRunner {
    /// Anneals from `initial` and returns the best assignment seen.
    pub fn run<C>(
        graph: &ConflictGraph<C>,
        initial: Assignment,
        config: &AnnealConfig,
    ) -> Result<AnnealResult> {
        Self::run_with_cancel(graph, initial, config, None)
    }

    /// Runs SA with an optional cancellation token, polled once per
    /// temperature level. A cancelled run still returns its best assignment.
    pub fn run_with_cancel<C>(
        graph: &ConflictGraph<C>,
        initial: Assignment,
        config: &AnnealConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AnnealResult> {
        config.validate()?;
        initial.check_covers(graph)?;

        let evaluator = CostEvaluator::new(config.conflict_penalty);
        if !evaluator.dominates_slot_count(graph.len()) {
            tracing::warn!(
                penalty = config.conflict_penalty,
                courses = graph.len(),
                "conflict penalty is below the course count; conflicts may be traded for slots"
            );
        }

        let seed = config.seed.unwrap_or_else(rand::random::<u64>);
        let mut rng = StdRng::seed_from_u64(seed);
        let start = Instant::now();

        let mut current = initial;
        let mut current_cost = evaluator.combined(graph, &current);
        let initial_cost = current_cost;
        let mut best = current.clone();
        let mut best_cost = current_cost;

        let mut temperature = config.initial_temperature;
        let mut total_iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut cancelled = false;
        let mut timed_out = false;
        let mut moves_exhausted = false;
        let mut cost_history = vec![best_cost];

        'schedule: while temperature > config.min_temperature {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            if let Some(limit) = config.time_limit {
                if start.elapsed() >= limit {
                    timed_out = true;
                    tracing::warn!(
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        best_cost,
                        "annealing hit its time limit"
                    );
                    break;
                }
            }

            for _ in 0..config.iterations_per_temperature {
                if config.max_iterations > 0 && total_iterations >= config.max_iterations {
                    break;
                }

                let Some(mv) = Move::random(config.neighborhood, &current, &mut rng) else {
                    moves_exhausted = true;
                    tracing::debug!(
                        neighborhood = ?config.neighborhood,
                        courses = graph.len(),
                        iterations = total_iterations,
                        "no neighbour available, annealing stopped early"
                    );
                    break 'schedule;
                };
                mv.apply(&mut current, &mut rng);
                let neighbor_cost = evaluator.combined(graph, &current);

                // Metropolis acceptance criterion
                let accept = if neighbor_cost < current_cost {
                    improving_moves += 1;
                    true
                } else {
                    let probability = acceptance_probability(current_cost, neighbor_cost, temperature);
                    rng.random_range(0.0..1.0) < probability
                };

                if accept {
                    current_cost = neighbor_cost;
                    accepted_moves += 1;

                    if current_cost < best_cost {
                        best = current.clone();
                        best_cost = current_cost;
                    }
                } else {
                    mv.undo(&mut current);
                }

                total_iterations += 1;
            }

            cost_history.push(best_cost);

            if config.max_iterations > 0 && total_iterations >= config.max_iterations {
                break;
            }

            temperature *= config.cooling_rate;
        }

        let best_conflicts = conflict_count(graph, &best);
        tracing::debug!(
            seed,
            iterations = total_iterations,
            accepted_moves,
            initial_cost,
            best_cost,
            best_conflicts,
            "annealing finished"
        );

        Ok(AnnealResult {
            best,
            best_cost,
            best_conflicts,
            initial_cost,
            iterations: total_iterations,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            cancelled,
            timed_out,
            moves_exhausted,
            cost_history,
        })
    }
}
