use std::path::PathBuf;

use crate::game::TopologyKind;

/// Errors produced while constructing or transitioning a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error(
        "layout is {found_rows}x{found_cols} but the board is {expected_rows}x{expected_cols}"
    )]
    ShapeMismatch {
        expected_rows: usize,
        expected_cols: usize,
        found_rows: usize,
        found_cols: usize,
    },

    #[error("cell ({row}, {col}) is already occupied")]
    CellOccupied { row: usize, col: usize },

    #[error("column {col} is full")]
    ColumnFull { col: usize },

    #[error("position ({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },

    #[error("column {col} does not exist")]
    InvalidColumn { col: usize },

    #[error("invalid cell value {0} (expected -1, 0 or 1)")]
    InvalidCellValue(i8),

    #[error("invalid sign {0} (expected -1 or 1)")]
    InvalidSign(i8),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),

    #[error("config describes a {found} board but a {expected} board was requested")]
    TopologyMismatch {
        expected: TopologyKind,
        found: TopologyKind,
    },
}
