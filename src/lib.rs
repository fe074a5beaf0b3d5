//! Checkpointed divide-and-conquer pairwise alignment.
//!
//! This crate computes an optimal *global* alignment of two sequences under an
//! affine gap-cost model (a gap of length `k` costs `gap_open + k *
//! gap_extend`) in O(n·m) time while keeping only O(min(n, m)) cells of the
//! dynamic-programming table alive at any moment.
//!
//! ## Core idea
//! 1. Sweep the DP matrix one row at a time with a three-state (affine)
//!    recurrence, retaining only two row buffers.
//! 2. On the rectangle's *checkpoint row* (its vertical midpoint), every cell
//!    stamps itself with its own column and state.
//! 3. Later rows inherit the stamp of whichever predecessor won the minimum,
//!    so the exit cell ends up naming the exact cell the optimal path crossed
//!    on the checkpoint row.
//! 4. That cell splits the rectangle in two; recurse, and once a subproblem is
//!    at most one row tall, trace the fragment back directly from the two
//!    retained rows.
//!
//! ## Quick start
//! ```
//! use ckp_align::{align, CostModel};
//!
//! // Default model: free matches, unit mismatches, gaps cost 3 + k.
//! let result = align(b"ACGTAC", b"AGTAC", &CostModel::default()).unwrap();
//! assert_eq!(result.cost, 4); // one gap: open (3) + one continue (1)
//! assert_eq!(result.sequence_a(), b"ACGTAC");
//! assert_eq!(result.sequence_b(), b"AGTAC");
//!
//! let gaps = align(b"", b"AAA", &CostModel::default()).unwrap();
//! assert_eq!(gaps.cost, 6); // gap_open + 3 * gap_extend
//! ```
//!
//! The alphabet is generic: any `Copy + Eq` symbol type works, with `None`
//! marking gap columns in the aligned output.
//!
//! The technique follows D. R. Powell, L. Allison and T. I. Dix, "A Versatile
//! Divide and Conquer Technique for Optimal String Alignment", Information
//! Processing Letters, 1999, 70:3, pp 127–139.

pub mod cell;
pub mod costs;
pub mod engine;
pub mod error;
pub mod sweep;
pub mod utils;

pub use crate::cell::{AlignState, UNREACHABLE};
pub use crate::costs::CostModel;
pub use crate::engine::{align, Aligner, Alignment};
pub use crate::error::AlignError;
