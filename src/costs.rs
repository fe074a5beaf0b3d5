//! Affine gap cost model.
//!
//! Costs are minimised. A gap of length `k` costs `gap_open + k * gap_extend`;
//! under the default model an alignment of identical sequences costs zero.

use crate::cell::AlignState;
use crate::error::AlignError;

/// The four scalars of the affine gap model.
///
/// All parameters must be non-negative: the unreachable-sentinel arithmetic in
/// the sweep assumes costs only ever grow along a path. [`CostModel::validate`]
/// enforces this before any sweep starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CostModel {
    /// Cost of aligning two equal symbols.
    pub match_cost: i32,
    /// Cost of aligning two different symbols.
    pub mismatch_cost: i32,
    /// One-off cost of starting a gap (in either sequence).
    pub gap_open: i32,
    /// Per-symbol cost of continuing a gap.
    pub gap_extend: i32,
}

impl Default for CostModel {
    /// The classic edit-cost parameters: free matches, unit mismatches, gaps
    /// costing `3 + k`.
    fn default() -> Self {
        Self {
            match_cost: 0,
            mismatch_cost: 1,
            gap_open: 3,
            gap_extend: 1,
        }
    }
}

impl CostModel {
    /// Build a validated model.
    pub fn new(
        match_cost: i32,
        mismatch_cost: i32,
        gap_open: i32,
        gap_extend: i32,
    ) -> Result<Self, AlignError> {
        let model = Self {
            match_cost,
            mismatch_cost,
            gap_open,
            gap_extend,
        };
        model.validate()?;
        Ok(model)
    }

    /// Reject negative parameters.
    pub fn validate(&self) -> Result<(), AlignError> {
        let scalars = [
            ("match_cost", self.match_cost),
            ("mismatch_cost", self.mismatch_cost),
            ("gap_open", self.gap_open),
            ("gap_extend", self.gap_extend),
        ];
        for (name, value) in scalars {
            if value < 0 {
                return Err(AlignError::NegativeCost { name, value });
            }
        }
        Ok(())
    }

    /// Cost of one alignment step that ends in state `to`, having arrived
    /// from state `from`. `None` is the gap placeholder.
    ///
    /// - Into `Diagonal`: match or mismatch of the two symbols (a diagonal
    ///   step always consumes two real symbols, so both sides are `Some`).
    /// - Continuing the same gap direction: `gap_extend`.
    /// - Anything else (opening a gap, or switching gap direction):
    ///   `gap_open + gap_extend`.
    ///
    /// Pure and total; the symbols are ignored for gap states.
    #[inline]
    pub fn transition<S: Eq>(
        &self,
        from: AlignState,
        to: AlignState,
        a: Option<&S>,
        b: Option<&S>,
    ) -> i32 {
        match to {
            AlignState::Diagonal => {
                if a == b {
                    self.match_cost
                } else {
                    self.mismatch_cost
                }
            }
            _ if to == from => self.gap_extend,
            _ => self.gap_open.saturating_add(self.gap_extend),
        }
    }
}
