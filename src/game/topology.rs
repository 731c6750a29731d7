//! Placement rules. A topology only decides which cell a move lands on;
//! everything after that (occupancy, win scanning) is shared.

use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use super::board::{Board, Dimensions};
use crate::error::BoardError;

/// Runtime tag for a topology, used by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopologyKind {
    /// Any empty cell may be targeted directly.
    Free,
    /// A piece falls to the lowest empty row of its column.
    #[default]
    Gravity,
}

impl fmt::Display for TopologyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopologyKind::Free => f.write_str("free"),
            TopologyKind::Gravity => f.write_str("gravity"),
        }
    }
}

/// Move resolution for one board topology.
pub trait Topology:
    fmt::Debug + Clone + Copy + PartialEq + Eq + Hash + PartialOrd + Ord + Default + Send + Sync + 'static
{
    /// What a caller names when making a move
    type Position: fmt::Debug + Clone + Copy;

    const KIND: TopologyKind;

    /// Resolve a position to a concrete in-bounds `(row, col)`.
    ///
    /// The returned cell is not guaranteed to be empty; `Board::place`
    /// checks occupancy itself.
    fn resolve(board: &Board<Self>, position: Self::Position) -> Result<(usize, usize), BoardError>;
}

/// Tic-tac-toe style placement: a move is a `(row, col)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct FreePlacement;

impl Topology for FreePlacement {
    type Position = (usize, usize);

    const KIND: TopologyKind = TopologyKind::Free;

    fn resolve(board: &Board<Self>, (row, col): (usize, usize)) -> Result<(usize, usize), BoardError> {
        if row >= board.rows() || col >= board.cols() {
            return Err(BoardError::OutOfBounds { row, col });
        }
        Ok((row, col))
    }
}

/// Connect Four style placement: a move is a column index.
/// Row 0 is the top, so pieces land on the highest free row index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct GravityDrop;

impl Topology for GravityDrop {
    type Position = usize;

    const KIND: TopologyKind = TopologyKind::Gravity;

    fn resolve(board: &Board<Self>, col: usize) -> Result<(usize, usize), BoardError> {
        if col >= board.cols() {
            return Err(BoardError::InvalidColumn { col });
        }
        let row = board.landing_row(col).ok_or(BoardError::ColumnFull { col })?;
        Ok((row, col))
    }
}

pub type TicTacToe = Board<FreePlacement>;
pub type ConnectFour = Board<GravityDrop>;

impl Board<FreePlacement> {
    /// Empty 3x3 board, three in a row wins
    pub fn tic_tac_toe() -> Self {
        Self::empty(Dimensions::TIC_TAC_TOE)
    }

    /// Every empty cell in row-major order
    pub fn legal_positions(&self) -> Vec<(usize, usize)> {
        (0..self.rows())
            .flat_map(|row| (0..self.cols()).map(move |col| (row, col)))
            .filter(|&(row, col)| self.get(row, col).is_some_and(|cell| cell.is_empty()))
            .collect()
    }
}

impl Board<GravityDrop> {
    /// Empty 6x7 board, four in a row wins
    pub fn connect_four() -> Self {
        Self::empty(Dimensions::CONNECT_FOUR)
    }

    /// Check if a column is full. Columns outside the board count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        self.get(0, col).map_or(true, |cell| !cell.is_empty())
    }

    /// Columns that can still take a piece, ascending
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..self.cols())
            .filter(|&col| !self.is_column_full(col))
            .collect()
    }

    /// Find the lowest empty row in a column (where a piece would land).
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        if col >= self.cols() {
            return None;
        }
        (0..self.rows())
            .rev()
            .find(|&row| self.get(row, col).is_some_and(|cell| cell.is_empty()))
    }
}
