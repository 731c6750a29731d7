//! # mnk-board
//!
//! Immutable grid boards for k-in-a-row games. Tic-tac-toe and Connect Four
//! share one board type and one win-detection scan, differing only in
//! dimensions, win length and how a move picks its cell.
//!
//! Boards are values: `place` returns a new board and never touches the
//! old one, so a search tree can hold any number of positions at once.
//! Cell signs are relative to the player about to move.
//!
//! ```
//! use mnk_board::{ConnectFour, Sign, WinState};
//!
//! let mut board = ConnectFour::connect_four();
//! for _ in 0..4 {
//!     board = board.place(3, Sign::Current)?;
//! }
//! assert_eq!(board.win_state(), WinState::won(Sign::Current));
//! # Ok::<(), mnk_board::BoardError>(())
//! ```
//!
//! ## Modules
//!
//! - [`game`] — Cells, topologies, the board and win detection
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;

pub use config::BoardConfig;
pub use error::{BoardError, ConfigError};
pub use game::{
    Board, Cell, ConnectFour, Dimensions, FreePlacement, GravityDrop, Sign, TicTacToe, Topology,
    TopologyKind, WinState,
};
