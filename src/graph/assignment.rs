//! Total course-to-slot mappings.

use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;
use std::ops::Deref;

use super::ConflictGraph;
use crate::error::{Result, TimetableError};

/// A time slot. Slots are positive; `1` is the first slot.
pub type Slot = u32;

/// A total mapping from every course index to a slot.
///
/// Totality is structural: position `i` holds the slot of course `i` in
/// the graph the assignment was built for.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    slots: Vec<Slot>,
}

impl Assignment {
    /// Every course in the same slot.
    pub fn uniform(len: usize, slot: Slot) -> Self {
        Self {
            slots: vec![slot; len],
        }
    }

    /// Wraps an explicit slot vector, indexed by course.
    pub fn from_slots(slots: Vec<Slot>) -> Self {
        Self { slots }
    }

    /// Builds an assignment from an identifier keyed map.
    ///
    /// Fails if the map misses a course, names an unknown course or uses slot 0.
    pub fn from_map<C: Eq + Hash + Clone>(
        graph: &ConflictGraph<C>,
        map: &HashMap<C, Slot>,
    ) -> Result<Self> {
        let mut slots = vec![0; graph.len()];
        for (course, &slot) in map {
            let idx = graph
                .index_of(course)
                .ok_or(TimetableError::UnknownCourse)?;
            if slot == 0 {
                return Err(TimetableError::InvalidSlot(idx));
            }
            slots[idx] = slot;
        }
        let missing = slots.iter().filter(|&&s| s == 0).count();
        if missing > 0 {
            return Err(TimetableError::IncompleteAssignment {
                missing,
                total: graph.len(),
            });
        }
        Ok(Self { slots })
    }

    /// Converts back to an identifier keyed map.
    pub fn to_map<C: Eq + Hash + Clone>(&self, graph: &ConflictGraph<C>) -> HashMap<C, Slot> {
        graph
            .courses()
            .iter()
            .cloned()
            .zip(self.slots.iter().copied())
            .collect()
    }

    /// Checks that this assignment covers exactly the courses of `graph`
    /// with positive slots.
    pub fn check_covers<C>(&self, graph: &ConflictGraph<C>) -> Result<()> {
        if self.slots.len() < graph.len() {
            return Err(TimetableError::IncompleteAssignment {
                missing: graph.len() - self.slots.len(),
                total: graph.len(),
            });
        }
        if self.slots.len() > graph.len() {
            return Err(TimetableError::UnknownCourse);
        }
        match self.slots.iter().position(|&s| s == 0) {
            Some(idx) => Err(TimetableError::InvalidSlot(idx)),
            None => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot of course `idx`.
    pub fn slot(&self, idx: usize) -> Slot {
        self.slots[idx]
    }

    /// Moves course `idx` to `slot`.
    pub fn set(&mut self, idx: usize, slot: Slot) {
        self.slots[idx] = slot;
    }

    /// Exchanges the slots of two courses.
    pub fn swap(&mut self, i: usize, j: usize) {
        self.slots.swap(i, j);
    }

    /// Highest slot in use, 0 when empty.
    pub fn max_slot(&self) -> Slot {
        self.slots.iter().copied().max().unwrap_or(0)
    }

    /// Distinct slots in use, ascending.
    pub fn used_slots(&self) -> BTreeSet<Slot> {
        self.slots.iter().copied().collect()
    }

    pub fn as_slice(&self) -> &[Slot] {
        &self.slots
    }

    /// Temporarily places course `idx` in `slot`.
    ///
    /// The previous slot is restored when the returned guard is dropped.
    ///
    /// ```
    /// use u_timetable::graph::Assignment;
    ///
    /// let mut assignment = Assignment::uniform(2, 1);
    /// {
    ///     let trial = assignment.trial(0, 4);
    ///     assert_eq!(trial.slot(0), 4);
    /// }
    /// assert_eq!(assignment.slot(0), 1);
    /// ```
    pub fn trial(&mut self, idx: usize, slot: Slot) -> SlotTrial<'_> {
        let previous = self.slots[idx];
        self.slots[idx] = slot;
        SlotTrial {
            assignment: self,
            idx,
            previous,
        }
    }
}

/// Scope guard returned by [`Assignment::trial`].
pub struct SlotTrial<'a> {
    assignment: &'a mut Assignment,
    idx: usize,
    previous: Slot,
}

impl Deref for SlotTrial<'_> {
    type Target = Assignment;

    fn deref(&self) -> &Assignment {
        &*self.assignment
    }
}

impl Drop for SlotTrial<'_> {
    fn drop(&mut self) {
        self.assignment.slots[self.idx] = self.previous;
    }
}
