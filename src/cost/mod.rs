//! Cost evaluation for candidate assignments.
//!
//! Two measures drive the refiners:
//!
//! - **Conflict count**: number of conflict pairs whose endpoints share a
//!   slot. Used alone by the hill climber.
//! - **Combined cost**: `distinct slots + penalty * conflicts`. Used by the
//!   annealer, which walks through infeasible states. The penalty must
//!   dominate any slot-count change so that every conflict-free assignment
//!   ranks ahead of every assignment with conflicts.

use std::collections::HashSet;

use crate::error::{Result, TimetableError};
use crate::graph::{Assignment, ConflictGraph};

/// Default weight of one unresolved conflict in the combined cost.
pub const DEFAULT_CONFLICT_PENALTY: f64 = 1000.0;

/// Number of conflict pairs whose two courses share a slot. O(E).
pub fn conflict_count<C>(graph: &ConflictGraph<C>, assignment: &Assignment) -> usize {
    graph
        .conflict_pairs()
        .iter()
        .filter(|&&(a, b)| assignment.slot(a) == assignment.slot(b))
        .count()
}

/// Number of neighbours of course `idx` sitting in its slot. O(degree).
pub fn course_conflicts<C>(graph: &ConflictGraph<C>, assignment: &Assignment, idx: usize) -> usize {
    let slot = assignment.slot(idx);
    graph
        .neighbors(idx)
        .iter()
        .filter(|&&n| assignment.slot(n) == slot)
        .count()
}

/// Number of distinct slots in use. O(V).
pub fn slot_count(assignment: &Assignment) -> usize {
    assignment.as_slice().iter().collect::<HashSet<_>>().len()
}

/// Fails with the first conflict pair sharing a slot.
///
/// Refiners may return assignments with conflicts; callers needing a strict
/// guarantee check the result here.
pub fn validate_coloring<C>(graph: &ConflictGraph<C>, assignment: &Assignment) -> Result<()> {
    match graph
        .conflict_pairs()
        .iter()
        .find(|&&(a, b)| assignment.slot(a) == assignment.slot(b))
    {
        Some(&(first, second)) => Err(TimetableError::Conflict {
            first,
            second,
            slot: assignment.slot(first),
        }),
        None => Ok(()),
    }
}

/// Prices assignments by slot count plus a per-conflict penalty.
#[derive(Debug, Clone, Copy)]
pub struct CostEvaluator {
    /// Weight of a single conflict.
    pub conflict_penalty: f64,
}

impl Default for CostEvaluator {
    fn default() -> Self {
        Self {
            conflict_penalty: DEFAULT_CONFLICT_PENALTY,
        }
    }
}

impl CostEvaluator {
    pub fn new(conflict_penalty: f64) -> Self {
        Self { conflict_penalty }
    }

    /// `slot_count + penalty * conflict_count`.
    pub fn combined<C>(&self, graph: &ConflictGraph<C>, assignment: &Assignment) -> f64 {
        slot_count(assignment) as f64
            + self.conflict_penalty * conflict_count(graph, assignment) as f64
    }

    /// Raw conflict count, without the slot term.
    pub fn conflicts<C>(&self, graph: &ConflictGraph<C>, assignment: &Assignment) -> usize {
        conflict_count(graph, assignment)
    }

    /// Whether one conflict outweighs using every course as its own slot.
    pub fn dominates_slot_count(&self, course_count: usize) -> bool {
        self.conflict_penalty >= course_count as f64
    }
}
