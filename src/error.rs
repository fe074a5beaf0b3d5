//! Error taxonomy for the aligner.
//!
//! Every failure is fatal to the current alignment call and propagates to the
//! caller; the internal-inconsistency variants signal that the sweep and the
//! traceback disagreed and the result would not be trustworthy.

use crate::cell::AlignState;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AlignError {
    /// A cost parameter was negative; rejected before any sweep runs.
    #[error("cost parameter `{name}` must be non-negative, got {value}")]
    NegativeCost { name: &'static str, value: i32 },

    /// Traceback reached the subproblem origin in the wrong state.
    #[error("traceback reached ({row}, {col}) in state {found:?}, expected {expected:?}")]
    EntryStateMismatch {
        row: usize,
        col: usize,
        expected: AlignState,
        found: AlignState,
    },

    /// No predecessor state reproduces a cell's cost during traceback.
    #[error("no predecessor reproduces cost {cost} at ({row}, {col}, {state:?})")]
    NoPredecessor {
        row: usize,
        col: usize,
        state: AlignState,
        cost: i32,
    },

    /// The resolved exit cell of a splittable rectangle carries no checkpoint.
    #[error("missing checkpoint hint at ({row}, {col}, {state:?})")]
    MissingCheckpoint {
        row: usize,
        col: usize,
        state: AlignState,
    },
}
