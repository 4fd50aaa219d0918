//! Simulated Annealing (SA) over slot assignments.
//!
//! Explores random neighbours of the current assignment and accepts
//! worsening moves with the Metropolis probability `exp(-delta / T)`,
//! cooling `T` geometrically. Intermediate assignments may contain
//! conflicts; they are priced by the combined cost
//! (`slots + penalty * conflicts`). The best assignment seen is returned.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Johnson, Aragon, McGeoch & Schevon (1991), "Optimization by Simulated
//!   Annealing: An Experimental Evaluation; Part II, Graph Coloring and
//!   Number Partitioning"

mod config;
mod runner;
mod types;

pub use config::AnnealConfig;
pub use runner::{acceptance_probability, AnnealResult, AnnealRunner};
pub use types::Neighborhood;
