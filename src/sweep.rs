//! Row-based forward recurrence over one subproblem rectangle.
//!
//! The sweep fills the rectangle one row at a time, swapping two row buffers
//! so the current row always reads from the just-completed previous row. On
//! the rectangle's checkpoint row every cell is stamped with its own column
//! and state; all later rows copy the stamp forward from whichever
//! predecessor won the minimum. After the sweep, the final row knows for each
//! state both the best cost to reach the exit corner and where the optimal
//! path crossed the middle.

use crate::cell::{AlignState, Cell, Checkpoint, Row};
use crate::costs::CostModel;
use crate::utils::arg_min3;

/// A rectangular subproblem with inclusive row and column bounds.
///
/// Row index `i` means "the first `i` symbols of A are consumed"; index 0 is
/// the empty-prefix boundary, and likewise for columns over B.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub row_start: usize,
    pub row_end: usize,
    pub col_start: usize,
    pub col_end: usize,
}

impl Rect {
    /// The rectangle covering two whole sequences of the given lengths.
    pub fn whole(rows: usize, cols: usize) -> Self {
        Self {
            row_start: 0,
            row_end: rows,
            col_start: 0,
            col_end: cols,
        }
    }

    /// The row whose cells get stamped with checkpoint hints.
    #[inline]
    pub fn checkpoint_row(&self) -> usize {
        (self.row_start + self.row_end) / 2
    }

    /// Number of rows below the entry row.
    #[inline]
    pub fn height(&self) -> usize {
        self.row_end - self.row_start
    }
}

/// The final two rows retained after sweeping a rectangle: `cur` is the
/// `row_end` row, `prev` the one before it.
pub struct SweepRows {
    pub prev: Row,
    pub cur: Row,
}

/// Fill the rectangle row by row and return the last two rows.
///
/// The path is pinned to enter at `(row_start, col_start)` in state `entry`;
/// every other state of that cell starts unreachable. Row buffers are sized
/// to this rectangle's column range and owned by this call alone.
pub fn forward_sweep<S: Eq>(
    a: &[S],
    b: &[S],
    costs: &CostModel,
    rect: &Rect,
    entry: AlignState,
) -> SweepRows {
    #[cfg(feature = "tracing")]
    let span = tracing::trace_span!(
        "forward_sweep",
        rows = rect.height(),
        cols = rect.col_end - rect.col_start
    );
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    let cp_row = rect.checkpoint_row();
    let mut prev = Row::new(rect.col_start, rect.col_end);
    let mut cur = Row::new(rect.col_start, rect.col_end);

    for i in rect.row_start..=rect.row_end {
        std::mem::swap(&mut prev, &mut cur);

        for j in rect.col_start..=rect.col_end {
            if i == rect.row_start && j == rect.col_start {
                // Entry boundary condition, not a recurrence step.
                let mut origin = [Cell::UNREACHABLE; 3];
                origin[entry as usize] = Cell {
                    cost: 0,
                    checkpoint: None,
                };
                cur.set_triple(j, origin);
                continue;
            }

            // No diagonal move can land on the entry row or column without
            // first having entered the rectangle elsewhere.
            let diagonal = if i == rect.row_start || j == rect.col_start {
                Cell::UNREACHABLE
            } else {
                step(
                    prev.triple(j - 1),
                    AlignState::Diagonal,
                    Some(&a[i - 1]),
                    Some(&b[j - 1]),
                    costs,
                )
            };
            let vertical = if i == rect.row_start {
                Cell::UNREACHABLE
            } else {
                step(
                    prev.triple(j),
                    AlignState::Vertical,
                    Some(&a[i - 1]),
                    None,
                    costs,
                )
            };
            // Horizontal moves stay within the same row, so they read from
            // the current buffer.
            let horizontal = if j == rect.col_start {
                Cell::UNREACHABLE
            } else {
                step(
                    cur.triple(j - 1),
                    AlignState::Horizontal,
                    None,
                    Some(&b[j - 1]),
                    costs,
                )
            };

            let mut triple = [diagonal, vertical, horizontal];
            if i == cp_row {
                // Each cell on the checkpoint row is its own checkpoint.
                for (idx, state) in AlignState::ALL.into_iter().enumerate() {
                    triple[idx].checkpoint = Some(Checkpoint { col: j, state });
                }
            }
            cur.set_triple(j, triple);
        }
    }

    SweepRows { prev, cur }
}

/// Extend each predecessor state by one step into `to`, keeping the cheapest
/// and inheriting its checkpoint verbatim.
#[inline]
fn step<S: Eq>(
    pred: [Cell; 3],
    to: AlignState,
    a: Option<&S>,
    b: Option<&S>,
    costs: &CostModel,
) -> Cell {
    let candidates = [
        pred[0]
            .cost
            .saturating_add(costs.transition(AlignState::Diagonal, to, a, b)),
        pred[1]
            .cost
            .saturating_add(costs.transition(AlignState::Vertical, to, a, b)),
        pred[2]
            .cost
            .saturating_add(costs.transition(AlignState::Horizontal, to, a, b)),
    ];
    let winner = arg_min3(candidates);
    Cell {
        cost: candidates[winner],
        checkpoint: pred[winner].checkpoint,
    }
}
