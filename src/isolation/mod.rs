mod board;
pub mod symmetry;

pub use board::{Board, InvalidMove, Player, Position};
