//! Why a target selection did not happen.
//!
//! None of these are fatal: public entry points collapse them to `false`
//! and the rules engine treats the ability as declined or fizzled.

use thiserror::Error;

/// Reason target selection ended without a committed selection.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum TargetingFailure {
    /// No object survived filtering.
    #[error("no legal candidates")]
    EmptyCandidatePool,

    /// Selection stopped below the minimum and nothing is left to try.
    #[error("chose {chosen} of at least {min} targets")]
    UnderMinimum { chosen: usize, min: usize },

    /// The preference rules refused every candidate before the first pick.
    #[error("declined")]
    Declined,
}

/// Result of one selection attempt: the number of targets on success.
pub type TargetingResult = Result<usize, TargetingFailure>;
