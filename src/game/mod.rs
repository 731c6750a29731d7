//! Board representation: cells and signs, the two placement topologies,
//! the immutable board itself and win detection.

mod board;
mod cell;
mod state;
mod topology;

pub use board::{Board, Dimensions};
pub use cell::{Cell, Sign};
pub use state::WinState;
pub use topology::{ConnectFour, FreePlacement, GravityDrop, TicTacToe, Topology, TopologyKind};
