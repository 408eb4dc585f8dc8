use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::agent::Agent;
use crate::{Board, Position};

/// baseline opponent that plays a uniformly random legal move
pub struct RandomAgent;

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        RandomAgent::new()
    }
}

impl Agent for RandomAgent {
    fn get_move(&mut self, board: &Board, _time_left_ms: &dyn Fn() -> f64) -> Option<Position> {
        board.legal_moves().choose(&mut thread_rng()).copied()
    }
}
