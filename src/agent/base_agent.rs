use crate::{Board, Position};

pub trait Agent {
    /// Pick a move for the side to move, or `None` to resign when no legal
    /// move exists. `time_left_ms` reports the milliseconds remaining in the
    /// turn; returning after it goes non-positive forfeits the game.
    fn get_move(&mut self, board: &Board, time_left_ms: &dyn Fn() -> f64) -> Option<Position>;
}
