//! Hill climbing on the conflict count.
//!
//! Starting from any assignment, repeatedly moves the course with the most
//! same-slot conflicts to the slot that minimizes the total conflict count.
//! Deterministic: no randomness is involved, so the same graph, start and
//! limits always give the same result.
//!
//! Stops at the first of: zero conflicts, no improving move anywhere, the
//! wall-clock limit (default 300 s), an optional iteration limit, or an
//! external cancel flag. Hitting a limit is a normal outcome and the best
//! assignment reached so far is returned.

mod config;
mod runner;

pub use config::LocalSearchConfig;
pub use runner::{LocalSearchResult, LocalSearchRunner, Termination};
