//! Small shared helpers.

/// Index of the first minimum among three costs.
///
/// The array is expected in [`AlignState::ALL`](crate::cell::AlignState::ALL)
/// order, so ties resolve Diagonal < Vertical < Horizontal. The sweep and the
/// traceback both go through this helper, keeping their tie-breaks identical.
#[inline]
pub fn arg_min3(costs: [i32; 3]) -> usize {
    if costs[0] <= costs[1] && costs[0] <= costs[2] {
        0
    } else if costs[1] <= costs[2] {
        1
    } else {
        2
    }
}
