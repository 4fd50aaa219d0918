//! Neighbourhood moves for the annealer.

use rand::Rng;

use crate::graph::{Assignment, Slot};

/// How a neighbour is derived from the current assignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Neighborhood {
    /// Exchange the slots of two distinct courses.
    ///
    /// Keeps the multiset of slots, so the slot count never changes; the
    /// search only redistributes conflicts.
    #[default]
    Swap,

    /// Move one course to a different slot in `1..=max_slot`.
    ///
    /// Can empty a slot and so lower the slot count.
    Recolor,
}

/// A reversible change to an assignment.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Move {
    Swap(usize, usize),
    Recolor { course: usize, from: Slot },
}

impl Move {
    /// Draws a move. Requires at least two courses.
    pub(crate) fn random<R: Rng>(
        neighborhood: Neighborhood,
        assignment: &Assignment,
        rng: &mut R,
    ) -> Option<Move> {
        let n = assignment.len();
        if n < 2 {
            return None;
        }
        match neighborhood {
            Neighborhood::Swap => {
                let i = rng.random_range(0..n);
                let mut j = rng.random_range(0..n - 1);
                if j >= i {
                    j += 1;
                }
                Some(Move::Swap(i, j))
            }
            Neighborhood::Recolor => {
                let max_slot = assignment.max_slot();
                if max_slot < 2 {
                    return None;
                }
                let course = rng.random_range(0..n);
                Some(Move::Recolor {
                    course,
                    from: assignment.slot(course),
                })
            }
        }
    }

    /// Applies the move. For `Recolor`, the target slot is drawn here.
    pub(crate) fn apply<R: Rng>(&self, assignment: &mut Assignment, rng: &mut R) {
        match *self {
            Move::Swap(i, j) => assignment.swap(i, j),
            Move::Recolor { course, from } => {
                let max_slot = assignment.max_slot();
                let mut to = rng.random_range(1..max_slot);
                if to >= from {
                    to += 1;
                }
                assignment.set(course, to);
            }
        }
    }

    /// Reverts a previously applied move.
    pub(crate) fn undo(&self, assignment: &mut Assignment) {
        match *self {
            Move::Swap(i, j) => assignment.swap(i, j),
            Move::Recolor { course, from } => assignment.set(course, from),
        }
    }
}
