//! Checkpointed divide-and-conquer alignment driver.
//!
//! [`solve`] sweeps a rectangle, resolves the exit state, reads the
//! checkpoint hint out of the exit cell and recurses into the two halves that
//! hint pins down. Once a subproblem is at most one row tall, the fragment is
//! recovered by a direct backward traceback over the two retained rows. Row
//! heights halve at every level and the column ranges of siblings are
//! disjoint, so total work stays O(n·m) with only O(min(n, m)) cells live.

use crate::cell::{AlignState, Row};
use crate::costs::CostModel;
use crate::error::AlignError;
use crate::sweep::{forward_sweep, Rect, SweepRows};
use crate::utils::arg_min3;

/// An optimal global alignment of two sequences.
///
/// `aligned_a` and `aligned_b` have equal length; `None` marks a gap column.
/// Dropping the gaps of either side reproduces the corresponding input
/// sequence exactly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alignment<S> {
    /// Total edit cost under the model used to produce the alignment.
    pub cost: i32,
    pub aligned_a: Vec<Option<S>>,
    pub aligned_b: Vec<Option<S>>,
}

impl<S: Copy> Alignment<S> {
    /// Number of alignment columns.
    pub fn len(&self) -> usize {
        self.aligned_a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aligned_a.is_empty()
    }

    /// The first input sequence, recovered by dropping gap columns.
    pub fn sequence_a(&self) -> Vec<S> {
        self.aligned_a.iter().filter_map(|sym| *sym).collect()
    }

    /// The second input sequence, recovered by dropping gap columns.
    pub fn sequence_b(&self) -> Vec<S> {
        self.aligned_b.iter().filter_map(|sym| *sym).collect()
    }
}

impl Alignment<u8> {
    /// Render the first aligned sequence with `-` in gap columns.
    pub fn aligned_a_string(&self) -> String {
        render(&self.aligned_a)
    }

    /// Render the second aligned sequence with `-` in gap columns.
    pub fn aligned_b_string(&self) -> String {
        render(&self.aligned_b)
    }
}

fn render(aligned: &[Option<u8>]) -> String {
    aligned
        .iter()
        .map(|sym| sym.map_or('-', char::from))
        .collect()
}

/// A reusable aligner holding one validated cost model.
pub struct Aligner {
    costs: CostModel,
}

impl Aligner {
    /// Validate the model once; alignment runs can then not fail on
    /// configuration.
    pub fn new(costs: CostModel) -> Result<Self, AlignError> {
        costs.validate()?;
        Ok(Self { costs })
    }

    pub fn costs(&self) -> &CostModel {
        &self.costs
    }

    /// Align two sequences, returning the total cost and the gapped outputs.
    pub fn align<S: Copy + Eq>(&self, a: &[S], b: &[S]) -> Result<Alignment<S>, AlignError> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("align", len_a = a.len(), len_b = b.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        // Row buffers span the columns, so keep the shorter sequence there:
        // working memory stays O(min(n, m)) regardless of argument order.
        if b.len() <= a.len() {
            let (cost, aligned_a, aligned_b) = solve(
                a,
                b,
                &self.costs,
                Rect::whole(a.len(), b.len()),
                AlignState::Diagonal,
                None,
            )?;
            Ok(Alignment {
                cost,
                aligned_a,
                aligned_b,
            })
        } else {
            let (cost, aligned_b, aligned_a) = solve(
                b,
                a,
                &self.costs,
                Rect::whole(b.len(), a.len()),
                AlignState::Diagonal,
                None,
            )?;
            Ok(Alignment {
                cost,
                aligned_a,
                aligned_b,
            })
        }
    }
}

/// Align two sequences under the given cost model.
///
/// This is the one-shot form of [`Aligner::align`].
///
/// ```
/// use ckp_align::{align, CostModel};
///
/// let identical = align(b"GATTACA", b"GATTACA", &CostModel::default()).unwrap();
/// assert_eq!(identical.cost, 0);
/// assert_eq!(identical.aligned_a_string(), "GATTACA");
/// ```
pub fn align<S: Copy + Eq>(
    a: &[S],
    b: &[S],
    costs: &CostModel,
) -> Result<Alignment<S>, AlignError> {
    Aligner::new(*costs)?.align(a, b)
}

type Fragments<S> = (i32, Vec<Option<S>>, Vec<Option<S>>);

/// Solve one rectangle: sweep, split on the checkpoint, recurse.
///
/// Returns the rectangle's exit cost and the aligned fragments in forward
/// order. Recursive calls' own costs are discarded by the caller; only the
/// top-level cost is reported.
fn solve<S: Copy + Eq>(
    a: &[S],
    b: &[S],
    costs: &CostModel,
    rect: Rect,
    entry: AlignState,
    exit: Option<AlignState>,
) -> Result<Fragments<S>, AlignError> {
    #[cfg(feature = "tracing")]
    let span = tracing::trace_span!(
        "solve",
        row_start = rect.row_start,
        row_end = rect.row_end,
        col_start = rect.col_start,
        col_end = rect.col_end
    );
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    let rows = forward_sweep(a, b, costs, &rect, entry);

    let last = rows.cur.triple(rect.col_end);
    let exit_state = exit.unwrap_or_else(|| {
        AlignState::ALL[arg_min3([last[0].cost, last[1].cost, last[2].cost])]
    });
    let exit_cell = last[exit_state as usize];
    let cost = exit_cell.cost;

    if rect.height() > 1 {
        let split = exit_cell
            .checkpoint
            .ok_or(AlignError::MissingCheckpoint {
                row: rect.row_end,
                col: rect.col_end,
                state: exit_state,
            })?;
        let cp_row = rect.checkpoint_row();

        let (_, a_hi, b_hi) = solve(
            a,
            b,
            costs,
            Rect {
                row_start: cp_row,
                row_end: rect.row_end,
                col_start: split.col,
                col_end: rect.col_end,
            },
            split.state,
            Some(exit_state),
        )?;
        let (_, mut aligned_a, mut aligned_b) = solve(
            a,
            b,
            costs,
            Rect {
                row_start: rect.row_start,
                row_end: cp_row,
                col_start: rect.col_start,
                col_end: split.col,
            },
            entry,
            Some(split.state),
        )?;

        aligned_a.extend(a_hi);
        aligned_b.extend(b_hi);
        Ok((cost, aligned_a, aligned_b))
    } else {
        let (aligned_a, aligned_b) = traceback(a, b, costs, &rect, entry, exit_state, &rows)?;
        Ok((cost, aligned_a, aligned_b))
    }
}

/// Reconstruct a ≤1-row fragment by walking predecessors backward from the
/// exit corner to the entry corner.
fn traceback<S: Copy + Eq>(
    a: &[S],
    b: &[S],
    costs: &CostModel,
    rect: &Rect,
    entry: AlignState,
    exit: AlignState,
    rows: &SweepRows,
) -> Result<(Vec<Option<S>>, Vec<Option<S>>), AlignError> {
    // With at most one row of height, the walk only ever touches the final
    // sweep row and the one before it.
    let row_of = |i: usize| -> &Row {
        if i == rect.row_end {
            &rows.cur
        } else {
            &rows.prev
        }
    };

    let mut i = rect.row_end;
    let mut j = rect.col_end;
    let mut state = exit;
    let mut rev_a: Vec<Option<S>> = Vec::new();
    let mut rev_b: Vec<Option<S>> = Vec::new();

    while i != rect.row_start || j != rect.col_start {
        let (sym_a, sym_b, pi, pj) = match state {
            AlignState::Diagonal => (Some(a[i - 1]), Some(b[j - 1]), i - 1, j - 1),
            AlignState::Vertical => (Some(a[i - 1]), None, i - 1, j),
            AlignState::Horizontal => (None, Some(b[j - 1]), i, j - 1),
        };

        let here = row_of(i).cell(j, state).cost;
        let pred_row = row_of(pi);

        // Find which predecessor state the sweep's minimum came from; the
        // first state reproducing the cost matches the sweep's tie-break.
        let mut from = None;
        for candidate in AlignState::ALL {
            let reproduced = pred_row
                .cell(pj, candidate)
                .cost
                .saturating_add(costs.transition(candidate, state, sym_a.as_ref(), sym_b.as_ref()));
            if reproduced == here {
                from = Some(candidate);
                break;
            }
        }
        let from = from.ok_or(AlignError::NoPredecessor {
            row: i,
            col: j,
            state,
            cost: here,
        })?;

        rev_a.push(sym_a);
        rev_b.push(sym_b);
        i = pi;
        j = pj;
        state = from;
    }

    if state != entry {
        return Err(AlignError::EntryStateMismatch {
            row: rect.row_start,
            col: rect.col_start,
            expected: entry,
            found: state,
        });
    }

    rev_a.reverse();
    rev_b.reverse();
    Ok((rev_a, rev_b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::UNREACHABLE;

    /// Unconstrained full-table reference for the same three-state model.
    fn full_table_cost(a: &[u8], b: &[u8], costs: &CostModel) -> i32 {
        let n = a.len();
        let m = b.len();
        let mut table = vec![vec![[UNREACHABLE; 3]; m + 1]; n + 1];
        table[0][0][AlignState::Diagonal as usize] = 0;

        for i in 0..=n {
            for j in 0..=m {
                if i == 0 && j == 0 {
                    continue;
                }
                for to in AlignState::ALL {
                    let (pi, pj, sym_a, sym_b) = match to {
                        AlignState::Diagonal if i > 0 && j > 0 => {
                            (i - 1, j - 1, Some(&a[i - 1]), Some(&b[j - 1]))
                        }
                        AlignState::Vertical if i > 0 => (i - 1, j, Some(&a[i - 1]), None),
                        AlignState::Horizontal if j > 0 => (i, j - 1, None, Some(&b[j - 1])),
                        _ => continue,
                    };
                    let mut best = UNREACHABLE;
                    for from in AlignState::ALL {
                        let cand = table[pi][pj][from as usize]
                            .saturating_add(costs.transition(from, to, sym_a, sym_b));
                        best = best.min(cand);
                    }
                    table[i][j][to as usize] = best;
                }
            }
        }

        *table[n][m].iter().min().unwrap_or(&UNREACHABLE)
    }

    #[test]
    fn matches_full_table_on_a_small_example() {
        let costs = CostModel::default();
        let a = b"GATTACA";
        let b = b"GCATGCU";
        let result = align(a, b, &costs).unwrap();
        assert_eq!(result.cost, full_table_cost(a, b, &costs));
        assert_eq!(result.sequence_a(), a);
        assert_eq!(result.sequence_b(), b);
    }

    #[test]
    fn identical_sequences_align_without_gaps() {
        let result = align(b"HELLO", b"HELLO", &CostModel::default()).unwrap();
        assert_eq!(result.cost, 0);
        assert_eq!(result.aligned_a_string(), "HELLO");
        assert_eq!(result.aligned_b_string(), "HELLO");
    }

    #[test]
    fn empty_against_empty_is_the_empty_alignment() {
        let result = align::<u8>(b"", b"", &CostModel::default()).unwrap();
        assert_eq!(result.cost, 0);
        assert!(result.is_empty());
    }

    #[test]
    fn empty_side_costs_one_affine_gap_run() {
        let costs = CostModel::default();
        let result = align(b"", b"AAA", &costs).unwrap();
        assert_eq!(result.cost, costs.gap_open + 3 * costs.gap_extend);
        assert_eq!(result.aligned_a, vec![None, None, None]);
        assert_eq!(result.aligned_b_string(), "AAA");

        let flipped = align(b"AAA", b"", &costs).unwrap();
        assert_eq!(flipped.cost, result.cost);
        assert_eq!(flipped.aligned_a_string(), "AAA");
        assert_eq!(flipped.aligned_b, vec![None, None, None]);
    }

    #[test]
    fn longer_second_sequence_swaps_the_row_buffers_not_the_answer() {
        let costs = CostModel::default();
        let short = b"TATGC";
        let long = b"AGTACGCA";
        let forward = align(long, short, &costs).unwrap();
        let swapped = align(short, long, &costs).unwrap();
        assert_eq!(forward.cost, swapped.cost);
        assert_eq!(swapped.sequence_a(), short);
        assert_eq!(swapped.sequence_b(), long);
    }

    #[test]
    fn negative_parameters_fail_before_sweeping() {
        let costs = CostModel {
            gap_open: -2,
            ..CostModel::default()
        };
        let err = align(b"AC", b"AC", &costs).unwrap_err();
        assert!(matches!(err, AlignError::NegativeCost { name: "gap_open", .. }));
    }

    #[test]
    fn works_over_non_byte_alphabets() {
        let a: &[u32] = &[1, 2, 3, 4];
        let b: &[u32] = &[2, 3, 4];
        let result = align(a, b, &CostModel::default()).unwrap();
        // Dropping the leading symbol is a single gap run of length one.
        assert_eq!(result.cost, 4);
        assert_eq!(result.sequence_a(), a);
        assert_eq!(result.sequence_b(), b);
    }
}
