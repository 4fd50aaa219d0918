//! Hill climbing execution loop.
//!
//! # Algorithm
//!
//! 1. Stop if the assignment has no conflicts.
//! 2. Stop if no course has a strictly improving slot.
//! 3. Pick the course with the most same-slot conflicts (first in index
//!    order on ties).
//! 4. Try every slot in use plus one fresh slot (`max + 1`), ascending,
//!    and keep the first one with the lowest total conflict count.
//! 5. Commit the move and repeat.
//!
//! Candidate totals are computed incrementally: only the conflicts incident
//! to the moved course change, so `total - before + after` equals a full
//! recount.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::config::LocalSearchConfig;
use crate::cost::{conflict_count, course_conflicts};
use crate::error::Result;
use crate::graph::{Assignment, ConflictGraph, Slot};

/// Why a local search run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// No conflicts remain.
    Feasible,
    /// No course has a strictly improving slot.
    ///
    /// The fresh slot `max + 1` always clears a conflicted course, so this is
    /// only reached when no fresh slot exists (the highest slot in use is
    /// `Slot::MAX`).
    LocalOptimum,
    /// Some course could improve, but the most conflicted one cannot, so the
    /// assignment would never change again.
    ///
    /// Like `LocalOptimum`, only reachable when no fresh slot exists: with
    /// `max + 1` available the most conflicted course always improves.
    Stalled,
    /// The wall-clock budget elapsed.
    TimeLimit,
    /// The iteration budget was used up.
    IterationLimit,
    /// The cancel flag was raised.
    Cancelled,
}

/// Result of a local search run.
#[derive(Debug, Clone)]
pub struct LocalSearchResult {
    /// Final assignment; may contain conflicts unless `termination` is `Feasible`.
    pub assignment: Assignment,

    /// Conflict count of `assignment`.
    pub conflicts: usize,

    /// Outer iterations executed.
    pub iterations: usize,

    /// Moves committed.
    pub moves: usize,

    pub termination: Termination,

    /// Wall-clock time spent.
    pub elapsed: Duration,

    /// Conflict count at the start and after every committed move.
    pub conflict_history: Vec<usize>,
}

impl LocalSearchResult {
    /// Whether the run ended on its wall-clock budget.
    pub fn timed_out(&self) -> bool {
        self.termination == Termination::TimeLimit
    }
}

/// Executes the hill climber.
pub struct LocalSearchRunner;

impl LocalSearchRunner {
    /// Refines `initial` until a stopping condition holds.
    ///
    /// Fails only on an invalid configuration or an `initial` assignment
    /// that does not cover the graph.
    pub fn run<C>(
        graph: &ConflictGraph<C>,
        initial: Assignment,
        config: &LocalSearchConfig,
    ) -> Result<LocalSearchResult> {
        Self::run_with_cancel(graph, initial, config, None)
    }

    /// Runs with an optional cancellation flag, polled once per iteration.
    pub fn run_with_cancel<C>(
        graph: &ConflictGraph<C>,
        initial: Assignment,
        config: &LocalSearchConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<LocalSearchResult> {
        config.validate()?;
        initial.check_covers(graph)?;

        let start = Instant::now();
        let mut assignment = initial;
        let mut conflicts = conflict_count(graph, &assignment);
        let mut conflict_history = vec![conflicts];
        let mut iterations = 0usize;
        let mut moves = 0usize;

        let termination = loop {
            if conflicts == 0 {
                break Termination::Feasible;
            }
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    break Termination::Cancelled;
                }
            }
            if start.elapsed() >= config.time_limit {
                tracing::warn!(
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    conflicts,
                    "local search hit its time limit"
                );
                break Termination::TimeLimit;
            }
            if config.max_iterations > 0 && iterations >= config.max_iterations {
                break Termination::IterationLimit;
            }
            if !can_improve(graph, &mut assignment, conflicts) {
                break Termination::LocalOptimum;
            }

            iterations += 1;

            let course = most_conflicted(graph, &assignment);
            let slot = best_slot(graph, &mut assignment, course, conflicts);
            if slot == assignment.slot(course) {
                break Termination::Stalled;
            }

            let before = course_conflicts(graph, &assignment, course);
            assignment.set(course, slot);
            conflicts = conflicts - before + course_conflicts(graph, &assignment, course);
            moves += 1;
            conflict_history.push(conflicts);
            tracing::trace!(course, slot, conflicts, "local search move");
        };

        let elapsed = start.elapsed();
        tracing::debug!(
            ?termination,
            iterations,
            moves,
            conflicts,
            elapsed_ms = elapsed.as_millis() as u64,
            "local search finished"
        );

        Ok(LocalSearchResult {
            assignment,
            conflicts,
            iterations,
            moves,
            termination,
            elapsed,
            conflict_history,
        })
    }
}

/// Whether any course has a strictly improving slot.
fn can_improve<C>(graph: &ConflictGraph<C>, assignment: &mut Assignment, total: usize) -> bool {
    (0..graph.len()).any(|course| {
        let current = assignment.slot(course);
        best_slot(graph, assignment, course, total) != current
    })
}

/// Course with the most same-slot neighbours; the lowest index wins ties.
fn most_conflicted<C>(graph: &ConflictGraph<C>, assignment: &Assignment) -> usize {
    let mut best_course = 0;
    let mut best_count = 0;
    for course in 0..graph.len() {
        let count = course_conflicts(graph, assignment, course);
        if count > best_count {
            best_count = count;
            best_course = course;
        }
    }
    best_course
}

/// Slot minimizing the total conflict count for `course`.
///
/// Returns the current slot unless another slot is strictly better; among
/// equally good slots the lowest wins.
fn best_slot<C>(
    graph: &ConflictGraph<C>,
    assignment: &mut Assignment,
    course: usize,
    total: usize,
) -> Slot {
    let current = assignment.slot(course);
    let before = course_conflicts(graph, assignment, course);

    let mut candidates: Vec<Slot> = assignment.used_slots().into_iter().collect();
    // no fresh slot once the highest slot is `Slot::MAX`
    if let Some(fresh) = assignment.max_slot().checked_add(1) {
        candidates.push(fresh);
    }

    let mut chosen = current;
    let mut chosen_total = total;
    for slot in candidates {
        let trial = assignment.trial(course, slot);
        let candidate_total = total - before + course_conflicts(graph, &trial, course);
        if candidate_total < chosen_total {
            chosen = slot;
            chosen_total = candidate_total;
        }
    }
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::slot_count;
    use crate::error::TimetableError;
    use proptest::prelude::*;

    fn long_run() -> LocalSearchConfig {
        LocalSearchConfig::default().with_time_limit(Duration::from_secs(60))
    }

    #[test]
    fn test_two_conflicting_courses_separated() {
        let graph = ConflictGraph::from_conflicts(["a", "b"], [("a", "b")]).unwrap();
        let result = LocalSearchRunner::run(&graph, Assignment::uniform(2, 1), &long_run()).unwrap();

        assert_eq!(result.conflicts, 0);
        assert_eq!(result.termination, Termination::Feasible);
        assert_ne!(result.assignment.slot(0), result.assignment.slot(1));
        assert_eq!(result.moves, 1);
        assert_eq!(result.assignment.as_slice(), &[2, 1]);
    }

    #[test]
    fn test_triangle_from_single_slot() {
        let graph =
            ConflictGraph::from_conflicts(["a", "b", "c"], [("a", "b"), ("b", "c"), ("a", "c")])
                .unwrap();
        let result = LocalSearchRunner::run(&graph, Assignment::uniform(3, 1), &long_run()).unwrap();

        assert_eq!(result.conflicts, 0);
        assert_eq!(slot_count(&result.assignment), 3);
        assert_eq!(result.conflict_history, vec![3, 1, 0]);
    }

    #[test]
    fn test_already_feasible_start_is_untouched() {
        let graph = ConflictGraph::from_conflicts(0..3u32, [(0, 1), (1, 2)]).unwrap();
        let start = Assignment::from_slots(vec![1, 2, 1]);
        let result = LocalSearchRunner::run(&graph, start.clone(), &long_run()).unwrap();

        assert_eq!(result.assignment, start);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.termination, Termination::Feasible);
    }

    #[test]
    fn test_empty_graph() {
        let graph: ConflictGraph<u32> = ConflictGraph::new();
        let result = LocalSearchRunner::run(&graph, Assignment::uniform(0, 1), &long_run()).unwrap();
        assert!(result.assignment.is_empty());
        assert_eq!(result.termination, Termination::Feasible);
    }

    #[test]
    fn test_iteration_limit() {
        let graph = ConflictGraph::from_conflicts(0..6u32, (0..6).flat_map(|i| (i + 1..6).map(move |j| (i, j))))
            .unwrap();
        let config = long_run().with_max_iterations(1);
        let result = LocalSearchRunner::run(&graph, Assignment::uniform(6, 1), &config).unwrap();

        assert_eq!(result.termination, Termination::IterationLimit);
        assert_eq!(result.iterations, 1);
        assert!(result.conflicts > 0);
    }

    #[test]
    fn test_time_limit_returns_best_so_far() {
        let n = 300u32;
        let graph =
            ConflictGraph::from_conflicts(0..n, (0..n).flat_map(|i| (i + 1..n).map(move |j| (i, j))))
                .unwrap();
        let config = LocalSearchConfig::default().with_time_limit(Duration::from_nanos(1));
        let result = LocalSearchRunner::run(&graph, Assignment::uniform(n as usize, 1), &config).unwrap();

        assert!(result.timed_out());
        assert_eq!(result.assignment.len(), n as usize);
        assert_eq!(result.conflicts, conflict_count(&graph, &result.assignment));
    }

    #[test]
    fn test_cancelled_before_start() {
        let graph = ConflictGraph::from_conflicts(["a", "b"], [("a", "b")]).unwrap();
        let cancel = Arc::new(AtomicBool::new(true));
        let result =
            LocalSearchRunner::run_with_cancel(&graph, Assignment::uniform(2, 1), &long_run(), Some(cancel))
                .unwrap();

        assert_eq!(result.termination, Termination::Cancelled);
        assert_eq!(result.assignment, Assignment::uniform(2, 1));
    }

    #[test]
    fn test_rejects_short_initial() {
        let graph = ConflictGraph::from_conflicts(["a", "b"], [("a", "b")]).unwrap();
        let err = LocalSearchRunner::run(&graph, Assignment::uniform(1, 1), &long_run()).unwrap_err();
        assert_eq!(
            err,
            TimetableError::IncompleteAssignment {
                missing: 1,
                total: 2
            }
        );
    }

    #[test]
    fn test_best_slot_prefers_current_on_ties() {
        // course 1 conflicts with 0 (slot 1) and 2 (slot 2): every slot in use costs one
        // conflict, and the fresh slot 3 is the only strict improvement
        let graph = ConflictGraph::from_conflicts(0..3u32, [(0, 1), (1, 2)]).unwrap();
        let mut assignment = Assignment::from_slots(vec![1, 1, 2]);
        assert_eq!(best_slot(&graph, &mut assignment, 1, 1), 3);
        assert_eq!(assignment.as_slice(), &[1, 1, 2]);

        let mut settled = Assignment::from_slots(vec![1, 2, 1]);
        assert_eq!(best_slot(&graph, &mut settled, 1, 0), 2);
    }

    #[test]
    fn test_top_slot_start_does_not_overflow() {
        let graph = ConflictGraph::from_conflicts(["a", "b"], [("a", "b")]).unwrap();
        let start = Assignment::from_slots(vec![Slot::MAX, Slot::MAX]);
        let result = LocalSearchRunner::run(&graph, start.clone(), &long_run()).unwrap();

        assert_eq!(result.termination, Termination::LocalOptimum);
        assert_eq!(result.assignment, start);
        assert_eq!(result.conflicts, 1);
    }

    #[test]
    fn test_top_slot_start_uses_slots_in_use() {
        let graph = ConflictGraph::from_conflicts(["a", "b", "c"], [("a", "b")]).unwrap();
        let start = Assignment::from_slots(vec![Slot::MAX, Slot::MAX, 1]);
        let result = LocalSearchRunner::run(&graph, start, &long_run()).unwrap();

        assert_eq!(result.termination, Termination::Feasible);
        assert_eq!(result.assignment.as_slice(), &[1, Slot::MAX, 1]);
    }

    fn arb_graph() -> impl Strategy<Value = ConflictGraph<usize>> {
        (1usize..20).prop_flat_map(|n| {
            prop::collection::vec((0..n, 0..n), 0..(n * 3)).prop_map(move |edges| {
                let mut graph = ConflictGraph::with_courses(0..n);
                for (a, b) in edges {
                    if a != b {
                        graph.add_conflict(a, b).unwrap();
                    }
                }
                graph
            })
        })
    }

    proptest! {
        #[test]
        fn prop_moves_never_worsen(graph in arb_graph()) {
            let result = LocalSearchRunner::run(&graph, Assignment::uniform(graph.len(), 1), &long_run()).unwrap();

            for window in result.conflict_history.windows(2) {
                prop_assert!(window[1] <= window[0]);
            }
            prop_assert_eq!(result.conflicts, conflict_count(&graph, &result.assignment));
            // the fresh slot always clears the most conflicted course
            prop_assert_eq!(result.termination, Termination::Feasible);
            prop_assert_eq!(result.conflicts, 0);
        }
    }
}
