//! Course timetabling as graph coloring.
//!
//! Courses are vertices of a conflict graph, conflicts (shared students or
//! resources) are edges and time slots are colors. The crate assigns every
//! course a slot so that no two conflicting courses share one, while
//! keeping the number of distinct slots low.
//!
//! - **Graph** ([`graph`]): the conflict graph and total slot assignments.
//! - **Cost** ([`cost`]): conflict counting and the combined
//!   `slots + penalty * conflicts` objective.
//! - **Greedy** ([`greedy`]): degree-ordered (or DSatur) first-fit
//!   construction, conflict-free by construction.
//! - **Local search** ([`local`]): deterministic hill climbing on the
//!   conflict count with a wall-clock budget.
//! - **Simulated Annealing** ([`sa`]): randomized slot swaps with the
//!   Metropolis rule and geometric cooling, returning the best state seen.
//! - **Solver** ([`solver`]): composes a construction phase with zero or
//!   one refinement phase and reports the outcome.
//!
//! All algorithms are single-threaded and deterministic for a fixed seed.
//!
//! # Example
//!
//! ```
//! use u_timetable::graph::ConflictGraph;
//! use u_timetable::solver::{Pipeline, Solver, SolverConfig};
//!
//! let graph = ConflictGraph::from_conflicts(
//!     ["algebra", "biology", "chemistry", "drama", "economics"],
//!     [
//!         ("algebra", "biology"),
//!         ("biology", "chemistry"),
//!         ("chemistry", "drama"),
//!         ("drama", "economics"),
//!         ("economics", "algebra"),
//!     ],
//! ).unwrap();
//!
//! let report = Solver::run(&graph, &SolverConfig::default().with_pipeline(Pipeline::Greedy)).unwrap();
//! assert_eq!(report.conflicts, 0);
//! assert_eq!(report.slots, 3);
//! ```

pub mod cost;
pub mod error;
pub mod graph;
pub mod greedy;
pub mod local;
pub mod sa;
pub mod solver;

pub use error::{Result, TimetableError};
pub use solver::solve;
