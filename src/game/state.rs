use tracing::trace;

use super::board::Dimensions;
use super::cell::{Cell, Sign};

/// Whether a game has ended, and if so who won.
///
/// `winner` is only ever set on an ended game; an ended game without a
/// winner is a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WinState {
    is_ended: bool,
    winner: Option<Sign>,
}

impl WinState {
    pub fn ongoing() -> Self {
        WinState {
            is_ended: false,
            winner: None,
        }
    }

    pub fn draw() -> Self {
        WinState {
            is_ended: true,
            winner: None,
        }
    }

    pub fn won(sign: Sign) -> Self {
        WinState {
            is_ended: true,
            winner: Some(sign),
        }
    }

    pub fn is_ended(&self) -> bool {
        self.is_ended
    }

    pub fn winner(&self) -> Option<Sign> {
        self.winner
    }

    pub fn is_draw(&self) -> bool {
        self.is_ended && self.winner.is_none()
    }
}

/// Scan a row-major cell buffer for a completed run.
///
/// The loop walks perspectives opponent-first and tests the negated sign,
/// so when both signs hold a run (never in a legal game) `Sign::Current`
/// is reported.
pub(crate) fn evaluate(dims: Dimensions, cells: &[Cell]) -> WinState {
    for perspective in [Sign::Opponent, Sign::Current] {
        let sign = perspective.opposite();
        let pieces = Mask::of(dims, cells, Cell::from(sign));
        let k = dims.win_length;
        if pieces.has_straight_run(k) || pieces.transposed().has_straight_run(k) || pieces.has_diagonal_run(k) {
            trace!(winner = sign.value(), "run found");
            return WinState::won(sign);
        }
    }

    if cells.iter().all(|cell| !cell.is_empty()) {
        WinState::draw()
    } else {
        WinState::ongoing()
    }
}

/// Boolean grid marking the cells that hold one sign.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Mask {
    rows: usize,
    cols: usize,
    bits: Vec<bool>,
}

impl Mask {
    fn of(dims: Dimensions, cells: &[Cell], target: Cell) -> Self {
        Mask {
            rows: dims.rows,
            cols: dims.cols,
            bits: cells.iter().map(|&cell| cell == target).collect(),
        }
    }

    #[inline]
    fn at(&self, row: usize, col: usize) -> bool {
        self.bits[row * self.cols + col]
    }

    fn transposed(&self) -> Mask {
        let bits = (0..self.cols)
            .flat_map(|col| (0..self.rows).map(move |row| (row, col)))
            .map(|(row, col)| self.at(row, col))
            .collect();
        Mask {
            rows: self.cols,
            cols: self.rows,
            bits,
        }
    }

    /// Any row containing `len` consecutive set cells.
    /// Columns are checked by scanning the transpose.
    fn has_straight_run(&self, len: usize) -> bool {
        if len == 0 || len > self.cols {
            return false;
        }
        self.bits
            .chunks(self.cols)
            .any(|row| row.windows(len).any(|window| window.iter().filter(|&&b| b).count() == len))
    }

    /// Both diagonals of every `len x len` sub-square.
    fn has_diagonal_run(&self, len: usize) -> bool {
        if len == 0 || len > self.rows || len > self.cols {
            return false;
        }
        for top in 0..=self.rows - len {
            for left in 0..=self.cols - len {
                if (0..len).all(|x| self.at(top + x, left + x)) {
                    return true;
                }
                if (0..len).all(|x| self.at(top + x, left + len - 1 - x)) {
                    return true;
                }
            }
        }
        false
    }
}
