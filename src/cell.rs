//! Dynamic-programming cells and row buffers.
//!
//! A [`Cell`] belongs to one (row, column, state) triple and carries the best
//! cost to reach it plus the checkpoint hint inherited from its optimal
//! predecessor. Cells are constructed once per sweep position and stored by
//! value in a [`Row`], so no cell object is ever shared or mutated across
//! rows.

/// Which move a step of the alignment path takes.
///
/// The declaration order doubles as the tie-break order: whenever several
/// predecessor states achieve the same minimal cost, the first of
/// `Diagonal`, `Vertical`, `Horizontal` wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlignState {
    /// Consumed one symbol from each sequence (match or mismatch).
    Diagonal = 0,
    /// Consumed one symbol from A only — a gap in B.
    Vertical = 1,
    /// Consumed one symbol from B only — a gap in A.
    Horizontal = 2,
}

impl AlignState {
    /// All states, in tie-break order.
    pub const ALL: [AlignState; 3] = [
        AlignState::Diagonal,
        AlignState::Vertical,
        AlignState::Horizontal,
    ];
}

/// Sentinel cost for cells no path can reach.
///
/// Real path costs must stay strictly below this value; every cost addition
/// saturates so sums involving the sentinel never wrap around.
pub const UNREACHABLE: i32 = i32::MAX / 4;

/// Column and state on the checkpoint row through which the optimal path to a
/// cell passed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkpoint {
    pub col: usize,
    pub state: AlignState,
}

/// One DP entry: best accumulated cost plus the inherited checkpoint hint.
///
/// `checkpoint` is `None` until the sweep has passed the checkpoint row; from
/// then on it is copied forward verbatim from the winning predecessor, never
/// recomputed.
#[derive(Clone, Copy, Debug)]
pub struct Cell {
    pub cost: i32,
    pub checkpoint: Option<Checkpoint>,
}

impl Cell {
    /// A cell no path reaches.
    pub const UNREACHABLE: Cell = Cell {
        cost: UNREACHABLE,
        checkpoint: None,
    };
}

/// A row of cell triples (one [`Cell`] per state) spanning the column range
/// of one subproblem. Addressed by *absolute* column index.
///
/// Two rows alternate as "previous" and "current" during a sweep; a row lives
/// exactly as long as its subproblem.
pub struct Row {
    col_start: usize,
    cells: Vec<[Cell; 3]>,
}

impl Row {
    /// A fresh all-unreachable row covering `col_start..=col_end`.
    pub fn new(col_start: usize, col_end: usize) -> Self {
        Self {
            col_start,
            cells: vec![[Cell::UNREACHABLE; 3]; col_end - col_start + 1],
        }
    }

    /// The cell triple at absolute column `col`, in tie-break order.
    #[inline]
    pub fn triple(&self, col: usize) -> [Cell; 3] {
        self.cells[col - self.col_start]
    }

    /// The cell at absolute column `col` for one state.
    #[inline]
    pub fn cell(&self, col: usize, state: AlignState) -> Cell {
        self.cells[col - self.col_start][state as usize]
    }

    #[inline]
    pub fn set_triple(&mut self, col: usize, triple: [Cell; 3]) {
        self.cells[col - self.col_start] = triple;
    }
}
