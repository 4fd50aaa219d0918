//! Pipeline orchestration.
//!
//! A run is a construction phase followed by zero or one refinement phase:
//!
//! | Pipeline            | Construction        | Refinement      |
//! |---------------------|---------------------|-----------------|
//! | `Greedy`            | greedy first-fit    | none            |
//! | `GreedyAnnealing`   | greedy first-fit    | annealing       |
//! | `LocalSearch`       | every course slot 1 | hill climbing   |
//! | `GreedyLocalSearch` | greedy first-fit    | hill climbing   |
//!
//! The graph is only read; the final assignment, its conflict count and
//! its slot count are reported in a [`SolveReport`].

mod config;
mod runner;

pub use config::{Pipeline, SolverConfig};
pub use runner::{solve, SolveReport, Solver};
