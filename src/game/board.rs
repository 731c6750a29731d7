use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::cell::{Cell, Sign};
use super::state::{self, WinState};
use super::topology::Topology;
use crate::error::BoardError;

/// Grid size and win condition, fixed for the life of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Dimensions {
    pub rows: usize,
    pub cols: usize,
    pub win_length: usize,
}

impl Dimensions {
    pub const TIC_TAC_TOE: Dimensions = Dimensions::new(3, 3, 3);
    pub const CONNECT_FOUR: Dimensions = Dimensions::new(6, 7, 4);

    pub const fn new(rows: usize, cols: usize, win_length: usize) -> Self {
        Dimensions {
            rows,
            cols,
            win_length,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }
}

/// An immutable board.
///
/// Cells are read from the perspective of the player about to move:
/// `Cell::Current` is +1 and `Cell::Opponent` is -1. Every transition
/// returns a new board; the cell buffer is reference counted, so clones are
/// cheap and never observe each other's moves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Board<T: Topology> {
    dims: Dimensions,
    cells: Arc<[Cell]>,
    topology: PhantomData<T>,
}

impl<T: Topology> Board<T> {
    /// Create a new empty board
    pub fn empty(dims: Dimensions) -> Self {
        Self::with_cells(dims, vec![Cell::Empty; dims.cell_count()])
    }

    /// Build a board from rows of cells. The layout must be exactly
    /// `dims.rows` rows of `dims.cols` cells; its contents are not checked
    /// beyond that, so an already decided position is accepted.
    pub fn from_layout<R: AsRef<[Cell]>>(dims: Dimensions, layout: &[R]) -> Result<Self, BoardError> {
        check_shape(dims, layout.iter().map(|row| row.as_ref().len()))?;
        let cells = layout
            .iter()
            .flat_map(|row| row.as_ref().iter().copied())
            .collect();
        Ok(Self::with_cells(dims, cells))
    }

    /// Build a board from the numeric {0, +1, -1} encoding.
    pub fn from_signs<R: AsRef<[i8]>>(dims: Dimensions, layout: &[R]) -> Result<Self, BoardError> {
        check_shape(dims, layout.iter().map(|row| row.as_ref().len()))?;
        let cells = layout
            .iter()
            .flat_map(|row| row.as_ref().iter().map(|&value| Cell::try_from(value)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::with_cells(dims, cells))
    }

    fn with_cells(dims: Dimensions, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), dims.cell_count());
        Board {
            dims,
            cells: cells.into(),
            topology: PhantomData,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn rows(&self) -> usize {
        self.dims.rows
    }

    pub fn cols(&self) -> usize {
        self.dims.cols
    }

    pub fn win_length(&self) -> usize {
        self.dims.win_length
    }

    /// Get the cell at a specific position.
    /// Row 0 is the top row.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.rows() && col < self.cols() {
            Some(self.cells[row * self.cols() + col])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row < self.rows() {
            let start = row * self.cols();
            Some(&self.cells[start..start + self.cols()])
        } else {
            None
        }
    }

    /// Rows of cells, top to bottom
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        (0..self.rows()).map(move |row| {
            let start = row * self.cols();
            &self.cells[start..start + self.cols()]
        })
    }

    /// `true` wherever the cell is empty
    pub fn legal_moves(&self) -> Vec<Vec<bool>> {
        self.iter_rows()
            .map(|row| row.iter().map(|cell| cell.is_empty()).collect())
            .collect()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Return a new board with `sign` placed at the cell `position` resolves
    /// to. The receiver is left untouched whether or not the move succeeds.
    ///
    /// No turn alternation happens here: the caller decides which sign the
    /// mover is in the resulting board's frame.
    pub fn place(&self, position: T::Position, sign: Sign) -> Result<Self, BoardError> {
        let (row, col) = T::resolve(self, position)?;
        let idx = row * self.cols() + col;
        if !self.cells[idx].is_empty() {
            return Err(BoardError::CellOccupied { row, col });
        }

        let mut cells = self.cells.to_vec();
        cells[idx] = Cell::from(sign);
        trace!(row, col, sign = sign.value(), "placed piece");
        Ok(Self::with_cells(self.dims, cells))
    }

    /// The same position seen by the other player: every piece changes sign.
    pub fn flip_perspective(&self) -> Self {
        Self::with_cells(self.dims, self.cells.iter().map(|cell| cell.flipped()).collect())
    }

    /// Evaluate whether the game on this board is over and who won.
    pub fn win_state(&self) -> WinState {
        state::evaluate(self.dims, &self.cells)
    }

    /// Numeric {0, +1, -1} layout
    pub fn to_signs(&self) -> Vec<Vec<i8>> {
        self.iter_rows()
            .map(|row| row.iter().map(|cell| cell.value()).collect())
            .collect()
    }
}

fn check_shape(dims: Dimensions, row_lens: impl ExactSizeIterator<Item = usize>) -> Result<(), BoardError> {
    let found_rows = row_lens.len();
    let mismatch = |found_cols| BoardError::ShapeMismatch {
        expected_rows: dims.rows,
        expected_cols: dims.cols,
        found_rows,
        found_cols,
    };

    let mut first_len = None;
    for len in row_lens {
        first_len.get_or_insert(len);
        if len != dims.cols {
            return Err(mismatch(len));
        }
    }
    if found_rows != dims.rows {
        return Err(mismatch(first_len.unwrap_or(0)));
    }
    Ok(())
}

impl<T: Topology> fmt::Display for Board<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows() == 0 {
            return f.write_str("[]");
        }
        for (r, row) in self.iter_rows().enumerate() {
            f.write_str(if r == 0 { "[[" } else { " [" })?;
            for (c, cell) in row.iter().enumerate() {
                if c > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{:>2}", cell.value())?;
            }
            f.write_str("]")?;
            if r + 1 < self.rows() {
                f.write_str("\n")?;
            }
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::game::{ConnectFour, TicTacToe};

    fn centre_occupied() -> TicTacToe {
        TicTacToe::from_signs(Dimensions::TIC_TAC_TOE, &[[0i8, 0, 0], [0, 1, 0], [0, 0, 0]]).unwrap()
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = TicTacToe::empty(Dimensions::new(4, 5, 3));
        for row in 0..4 {
            for col in 0..5 {
                assert_eq!(board.get(row, col), Some(Cell::Empty));
            }
        }
        assert_eq!(board.get(4, 0), None);
        assert_eq!(board.piece_count(), 0);
    }

    #[test]
    fn test_from_layout_rejects_wrong_row_count() {
        let err = TicTacToe::from_signs(Dimensions::TIC_TAC_TOE, &[[0i8; 3]; 2]).unwrap_err();
        assert_eq!(
            err,
            BoardError::ShapeMismatch {
                expected_rows: 3,
                expected_cols: 3,
                found_rows: 2,
                found_cols: 3,
            }
        );
    }

    #[test]
    fn test_from_layout_rejects_ragged_rows() {
        let layout = vec![vec![Cell::Empty; 3], vec![Cell::Empty; 4], vec![Cell::Empty; 3]];
        let err = TicTacToe::from_layout(Dimensions::TIC_TAC_TOE, &layout).unwrap_err();
        assert!(matches!(err, BoardError::ShapeMismatch { found_cols: 4, .. }));
    }

    #[test]
    fn test_from_signs_rejects_bad_values() {
        let err = TicTacToe::from_signs(Dimensions::TIC_TAC_TOE, &[[0i8, 0, 0], [0, 2, 0], [0, 0, 0]])
            .unwrap_err();
        assert_eq!(err, BoardError::InvalidCellValue(2));
    }

    #[test]
    fn test_from_layout_accepts_finished_game() {
        let board =
            TicTacToe::from_signs(Dimensions::TIC_TAC_TOE, &[[1i8, 1, 1], [0, 0, 0], [0, 0, 0]]).unwrap();
        assert_eq!(board.win_state(), WinState::won(Sign::Current));
    }

    #[test]
    fn test_legal_moves() {
        let empty = TicTacToe::tic_tac_toe();
        assert_eq!(empty.legal_moves(), vec![vec![true; 3]; 3]);

        let mut expected = vec![vec![true; 3]; 3];
        expected[1][1] = false;
        assert_eq!(centre_occupied().legal_moves(), expected);

        let full = TicTacToe::from_signs(Dimensions::TIC_TAC_TOE, &[[1i8; 3]; 3]).unwrap();
        assert_eq!(full.legal_moves(), vec![vec![false; 3]; 3]);
    }

    #[test]
    fn test_place_piece() {
        let board = centre_occupied();
        let new_board = board.place((0, 0), Sign::Opponent).unwrap();
        assert_eq!(new_board.to_signs(), vec![vec![-1, 0, 0], vec![0, 1, 0], vec![0, 0, 0]]);

        assert_eq!(
            new_board.place((0, 0), Sign::Opponent),
            Err(BoardError::CellOccupied { row: 0, col: 0 })
        );
        assert_eq!(
            new_board.place((0, 3), Sign::Opponent),
            Err(BoardError::OutOfBounds { row: 0, col: 3 })
        );
    }

    #[test]
    fn test_place_leaves_source_untouched() {
        let source = centre_occupied();
        let snapshot = source.to_signs();

        let a = source.place((2, 2), Sign::Current).unwrap();
        let b = source.place((2, 2), Sign::Current).unwrap();
        assert_eq!(a, b);
        assert_eq!(source.to_signs(), snapshot);
        assert_ne!(a, source);

        // A failed move must not disturb the source either
        assert!(source.place((1, 1), Sign::Opponent).is_err());
        assert_eq!(source.to_signs(), snapshot);
    }

    #[test]
    fn test_drop_piece() {
        let board = ConnectFour::connect_four();
        let board = board.place(3, Sign::Current).unwrap();
        assert_eq!(board.get(5, 3), Some(Cell::Current));

        let board = board.place(3, Sign::Opponent).unwrap();
        assert_eq!(board.get(4, 3), Some(Cell::Opponent));
    }

    #[test]
    fn test_flip_perspective() {
        let board = centre_occupied().place((0, 2), Sign::Opponent).unwrap();
        let flipped = board.flip_perspective();
        assert_eq!(flipped.to_signs(), vec![vec![0, 0, 1], vec![0, -1, 0], vec![0, 0, 0]]);
        assert_eq!(flipped.flip_perspective(), board);
    }

    #[test]
    fn test_flip_perspective_negates_winner() {
        let board =
            TicTacToe::from_signs(Dimensions::TIC_TAC_TOE, &[[-1i8, 1, 0], [-1, 1, 0], [-1, 0, 0]]).unwrap();
        assert_eq!(board.win_state().winner(), Some(Sign::Opponent));
        assert_eq!(board.flip_perspective().win_state().winner(), Some(Sign::Current));
    }

    #[test]
    fn test_equality_and_hash() {
        let a = TicTacToe::tic_tac_toe().place((0, 1), Sign::Current).unwrap();
        let b = TicTacToe::tic_tac_toe().place((0, 1), Sign::Current).unwrap();
        let c = TicTacToe::tic_tac_toe().place((0, 1), Sign::Opponent).unwrap();

        let mut seen = HashSet::new();
        seen.insert(a.clone());
        assert!(seen.contains(&b));
        assert!(!seen.contains(&c));

        // Same cells but a different win condition is a different board
        let longer = TicTacToe::empty(Dimensions::new(3, 3, 2));
        assert_ne!(TicTacToe::tic_tac_toe(), longer);
    }

    #[test]
    fn test_ordering_is_total() {
        let empty = TicTacToe::tic_tac_toe();
        let current = empty.place((0, 0), Sign::Current).unwrap();
        let opponent = empty.place((0, 0), Sign::Opponent).unwrap();
        let mut boards = vec![opponent.clone(), current.clone(), empty.clone()];
        boards.sort();
        assert_eq!(boards, vec![empty, current, opponent]);
    }

    #[test]
    fn test_display() {
        let board = centre_occupied().place((0, 2), Sign::Opponent).unwrap();
        assert_eq!(board.to_string(), "[[ 0  0 -1]\n [ 0  1  0]\n [ 0  0  0]]");
        assert_eq!(TicTacToe::empty(Dimensions::new(0, 0, 3)).to_string(), "[]");
    }

    #[test]
    fn test_clones_share_cells() {
        let board = ConnectFour::connect_four().place(0, Sign::Current).unwrap();
        let clone = board.clone();
        assert!(Arc::ptr_eq(&board.cells, &clone.cells));

        let next = clone.place(0, Sign::Opponent).unwrap();
        assert!(!Arc::ptr_eq(&next.cells, &board.cells));
        assert_eq!(board.piece_count(), 1);
    }

    #[test]
    fn test_concurrent_readers_and_writers() {
        let source = ConnectFour::connect_four().place(3, Sign::Current).unwrap();
        let shared = &source;
        let successors: Vec<ConnectFour> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..7)
                .map(|col| {
                    scope.spawn(move || {
                        assert!(!shared.win_state().is_ended());
                        shared.place(col, Sign::Opponent).unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(source.piece_count(), 1);
        for (col, board) in successors.iter().enumerate() {
            assert_eq!(board.piece_count(), 2);
            let row = if col == 3 { 4 } else { 5 };
            assert_eq!(board.get(row, col), Some(Cell::Opponent));
        }
    }

    #[test]
    fn test_random_playouts_keep_invariants() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let mut history = vec![ConnectFour::connect_four()];
            let mut sign = Sign::Current;
            loop {
                let board = history.last().unwrap().clone();
                let legal = board.legal_moves();
                for row in 0..board.rows() {
                    for col in 0..board.cols() {
                        assert_eq!(legal[row][col], board.get(row, col) == Some(Cell::Empty));
                    }
                }
                if board.win_state().is_ended() {
                    break;
                }
                let columns = board.legal_columns();
                let col = columns[rng.random_range(0..columns.len())];
                history.push(board.place(col, sign).unwrap());
                sign = sign.opposite();
            }

            // Every retained board still has exactly as many pieces as moves made to reach it
            for (moves, board) in history.iter().enumerate() {
                assert_eq!(board.piece_count(), moves);
            }
        }
    }
}
