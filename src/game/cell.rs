use std::fmt;

use crate::error::BoardError;

/// A piece sign, relative to the player about to move on the board that
/// holds it. `Current` is +1, `Opponent` is -1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sign {
    Opponent,
    Current,
}

impl Sign {
    /// Get the other sign
    pub fn opposite(self) -> Sign {
        match self {
            Sign::Current => Sign::Opponent,
            Sign::Opponent => Sign::Current,
        }
    }

    /// Numeric value, +1 or -1
    pub fn value(self) -> i8 {
        match self {
            Sign::Current => 1,
            Sign::Opponent => -1,
        }
    }
}

impl TryFrom<i8> for Sign {
    type Error = BoardError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Sign::Current),
            -1 => Ok(Sign::Opponent),
            other => Err(BoardError::InvalidSign(other)),
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.value())
    }
}

/// Contents of one grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Cell {
    #[default]
    Empty,
    Current,
    Opponent,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// The sign occupying this cell, if any
    pub fn sign(self) -> Option<Sign> {
        match self {
            Cell::Empty => None,
            Cell::Current => Some(Sign::Current),
            Cell::Opponent => Some(Sign::Opponent),
        }
    }

    /// Numeric value: 0 for empty, otherwise the sign's value
    pub fn value(self) -> i8 {
        self.sign().map_or(0, Sign::value)
    }

    /// Same cell seen from the other player's side
    pub fn flipped(self) -> Cell {
        match self {
            Cell::Empty => Cell::Empty,
            Cell::Current => Cell::Opponent,
            Cell::Opponent => Cell::Current,
        }
    }
}

impl From<Sign> for Cell {
    fn from(sign: Sign) -> Self {
        match sign {
            Sign::Current => Cell::Current,
            Sign::Opponent => Cell::Opponent,
        }
    }
}

impl TryFrom<i8> for Cell {
    type Error = BoardError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Cell::Empty),
            1 => Ok(Cell::Current),
            -1 => Ok(Cell::Opponent),
            other => Err(BoardError::InvalidCellValue(other)),
        }
    }
}
