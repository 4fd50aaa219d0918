//! Error type shared by every module.

use thiserror::Error;

/// Errors raised while building inputs or validating configurations.
///
/// None of these occur during normal optimization: time limits and
/// infeasible intermediate states are reported through result fields.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimetableError {
    /// A configuration parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A conflict pair named the same course twice.
    #[error("course #{0} cannot conflict with itself")]
    SelfConflict(usize),

    /// A mapping referenced a course the graph does not contain.
    #[error("unknown course in assignment")]
    UnknownCourse,

    /// A mapping left some courses without a slot.
    #[error("assignment is missing {missing} of {total} courses")]
    IncompleteAssignment { missing: usize, total: usize },

    /// Slots are positive; zero is reserved.
    #[error("course #{0} was given slot 0")]
    InvalidSlot(usize),

    /// Two conflicting courses share a slot.
    #[error("courses #{first} and #{second} both use slot {slot}")]
    Conflict { first: usize, second: usize, slot: u32 },
}

impl TimetableError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        TimetableError::InvalidConfig(message.into())
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, TimetableError>;
