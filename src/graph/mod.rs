//! Conflict graph and slot assignments.
//!
//! Courses are vertices, conflicts are undirected edges and slots are
//! colors. Every course is interned to a dense index in insertion order,
//! and all algorithms in this crate work over those indices. Conversion
//! back to the caller's course identifiers happens only at the boundary
//! ([`Assignment::to_map`]).

mod assignment;
mod conflict;

pub use assignment::{Assignment, Slot, SlotTrial};
pub use conflict::ConflictGraph;
