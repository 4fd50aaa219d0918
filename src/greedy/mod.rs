//! Greedy first-fit construction.
//!
//! Courses are visited in a fixed order and each one takes the smallest
//! slot not used by an already colored neighbour. The result never
//! contains a conflict and uses at most `max_degree + 1` slots.
//!
//! # References
//!
//! - Welsh & Powell (1967), "An upper bound for the chromatic number of a graph"
//! - Brélaz (1979), "New methods to color the vertices of a graph" (DSatur)

mod colorer;

pub use colorer::{GreedyColorer, GreedyStrategy};
