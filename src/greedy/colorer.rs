//! Degree-ordered and saturation-ordered first-fit coloring.

use std::cmp::Reverse;
use std::collections::HashSet;

use crate::graph::{Assignment, ConflictGraph, Slot};

/// Order in which courses receive their slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GreedyStrategy {
    /// Descending degree, stable on insertion order (Welsh-Powell).
    #[default]
    LargestDegreeFirst,

    /// Most distinct neighbour slots first, ties by degree then index.
    Dsatur,
}

/// Builds conflict-free assignments by first-fit.
///
/// # Examples
///
/// ```
/// use u_timetable::graph::ConflictGraph;
/// use u_timetable::greedy::GreedyColorer;
///
/// let graph = ConflictGraph::from_conflicts(
///     ["a", "b", "c"],
///     [("a", "b"), ("b", "c"), ("a", "c")],
/// ).unwrap();
///
/// let assignment = GreedyColorer::color(&graph);
/// assert_eq!(assignment.used_slots().len(), 3);
/// ```
pub struct GreedyColorer;

impl GreedyColorer {
    /// Colors with [`GreedyStrategy::LargestDegreeFirst`].
    pub fn color<C>(graph: &ConflictGraph<C>) -> Assignment {
        Self::color_with(graph, GreedyStrategy::LargestDegreeFirst)
    }

    /// Colors with the given visiting order.
    pub fn color_with<C>(graph: &ConflictGraph<C>, strategy: GreedyStrategy) -> Assignment {
        let assignment = match strategy {
            GreedyStrategy::LargestDegreeFirst => largest_degree_first(graph),
            GreedyStrategy::Dsatur => dsatur(graph),
        };
        tracing::debug!(
            ?strategy,
            courses = graph.len(),
            slots = assignment.used_slots().len(),
            "greedy coloring built"
        );
        assignment
    }
}

/// Slot 0 marks "not yet colored" while building.
const UNCOLORED: Slot = 0;

fn largest_degree_first<C>(graph: &ConflictGraph<C>) -> Assignment {
    let mut order: Vec<usize> = (0..graph.len()).collect();
    order.sort_by_key(|&idx| Reverse(graph.degree(idx)));

    let mut slots = vec![UNCOLORED; graph.len()];
    let mut taken = Vec::new();
    for idx in order {
        slots[idx] = first_fit(graph, &slots, idx, &mut taken);
    }
    Assignment::from_slots(slots)
}

fn dsatur<C>(graph: &ConflictGraph<C>) -> Assignment {
    dsatur_visit(graph).0
}

/// DSatur coloring together with the order in which courses were colored.
fn dsatur_visit<C>(graph: &ConflictGraph<C>) -> (Assignment, Vec<usize>) {
    let n = graph.len();
    let mut slots = vec![UNCOLORED; n];
    // distinct slots among the colored neighbours of each course; its size is the saturation
    let mut neighbour_slots: Vec<HashSet<Slot>> = vec![HashSet::new(); n];
    let mut order = Vec::with_capacity(n);
    let mut taken = Vec::new();

    for _ in 0..n {
        let next = (0..n)
            .filter(|&idx| slots[idx] == UNCOLORED)
            .max_by_key(|&idx| (neighbour_slots[idx].len(), graph.degree(idx), Reverse(idx)));
        let Some(idx) = next else { break };

        let slot = first_fit(graph, &slots, idx, &mut taken);
        slots[idx] = slot;
        order.push(idx);

        for &nb in graph.neighbors(idx) {
            if slots[nb] == UNCOLORED {
                neighbour_slots[nb].insert(slot);
            }
        }
    }
    (Assignment::from_slots(slots), order)
}

/// Smallest positive slot unused by the colored neighbours of `idx`.
///
/// `taken` is scratch space reused across calls.
fn first_fit<C>(graph: &ConflictGraph<C>, slots: &[Slot], idx: usize, taken: &mut Vec<bool>) -> Slot {
    let limit = graph.degree(idx) + 2;
    taken.clear();
    taken.resize(limit, false);
    for &nb in graph.neighbors(idx) {
        let s = slots[nb] as usize;
        if s != UNCOLORED as usize && s < limit {
            taken[s] = true;
        }
    }
    // at most `degree` entries are marked among 1..=degree+1
    (1..limit).find(|&s| !taken[s]).unwrap_or(limit - 1) as Slot
}
