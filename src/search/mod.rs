mod alphabeta;
mod minimax;

pub use alphabeta::alphabeta_root;
pub use minimax::minimax_root;

use thiserror::Error;

use crate::heuristic::ScoreFn;
use crate::{Board, Position};

/*====================================================================================================================*/

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("search deadline exceeded")]
pub struct DeadlineExceeded;

/// Wall-clock budget polled at the top of every search node. The accessor is
/// re-invoked on every check, never cached; crossing the safety threshold
/// cancels the whole search as a value, unwinding through `?`.
pub struct Deadline<'a> {
    time_left_ms: &'a dyn Fn() -> f64,
    threshold_ms: f64,
}

impl<'a> Deadline<'a> {
    pub fn new(time_left_ms: &'a dyn Fn() -> f64, threshold_ms: f64) -> Self {
        Deadline {
            time_left_ms,
            threshold_ms,
        }
    }

    pub fn check(&self) -> Result<(), DeadlineExceeded> {
        if (self.time_left_ms)() < self.threshold_ms {
            Err(DeadlineExceeded)
        } else {
            Ok(())
        }
    }
}

/*====================================================================================================================*/

/// Result of one bounded-depth search. `best`/`partial` are `None` only at
/// terminal or moveless roots, or when the deadline hit before any root move
/// had been evaluated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchOutcome {
    Completed { value: f64, best: Option<Position> },
    Cancelled { partial: Option<Position> },
}

impl SearchOutcome {
    pub fn best_move(&self) -> Option<Position> {
        match *self {
            SearchOutcome::Completed { best, .. } => best,
            SearchOutcome::Cancelled { partial } => partial,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, SearchOutcome::Cancelled { .. })
    }
}

/*====================================================================================================================*/

/// search strategy, fixed at agent construction time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMethod {
    Minimax,
    AlphaBeta,
}

impl SearchMethod {
    pub fn search(self, board: &Board, depth: u32, score: ScoreFn, deadline: &Deadline) -> SearchOutcome {
        match self {
            SearchMethod::Minimax => minimax_root(board, depth, score, deadline),
            SearchMethod::AlphaBeta => alphabeta_root(board, depth, score, deadline),
        }
    }
}

/*====================================================================================================================*/

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::heuristic::blended_score;
    use crate::{Player, Position};

    fn midgame_board() -> Board {
        let mut board = Board::new(5, 5);
        board.apply_move(Position::new(2, 2)).unwrap();
        board.apply_move(Position::new(0, 0)).unwrap();
        board.apply_move(Position::new(0, 1)).unwrap();
        board.apply_move(Position::new(2, 1)).unwrap();
        board
    }

    #[test]
    fn test_alphabeta_value_matches_minimax() {
        let board = midgame_board();
        let generous = || 1e9;
        let deadline = Deadline::new(&generous, 10.0);

        for depth in 1..=4 {
            let plain = minimax_root(&board, depth, blended_score, &deadline);
            let pruned = alphabeta_root(&board, depth, blended_score, &deadline);

            match (plain, pruned) {
                (
                    SearchOutcome::Completed { value: v1, best: b1 },
                    SearchOutcome::Completed { value: v2, best: b2 },
                ) => {
                    assert_eq!(v1, v2, "values diverge at depth {}", depth);
                    // deterministic tie-break: identical move, not merely equal value
                    assert_eq!(b1, b2, "moves diverge at depth {}", depth);
                }
                _ => panic!("search cancelled despite a generous deadline"),
            }
        }
    }

    #[test]
    fn test_terminal_root_returns_no_move() {
        // terminal for Player 2
        let mut board = Board::new(3, 2);
        board.apply_move(Position::new(0, 0)).unwrap();
        board.apply_move(Position::new(1, 1)).unwrap();
        board.apply_move(Position::new(1, 2)).unwrap();
        assert!(board.is_terminal());

        let generous = || 1e9;
        let deadline = Deadline::new(&generous, 10.0);

        for method in [SearchMethod::Minimax, SearchMethod::AlphaBeta] {
            match method.search(&board, 3, blended_score, &deadline) {
                SearchOutcome::Completed { value, best } => {
                    assert_eq!(value, board.utility(Player::Two));
                    assert_eq!(best, None);
                }
                SearchOutcome::Cancelled { .. } => panic!("cancelled at a terminal root"),
            }
        }
    }

    #[test]
    fn test_expired_deadline_cancels_immediately() {
        let board = midgame_board();
        let expired = || 0.0;
        let deadline = Deadline::new(&expired, 10.0);

        for method in [SearchMethod::Minimax, SearchMethod::AlphaBeta] {
            let outcome = method.search(&board, 3, blended_score, &deadline);
            assert_eq!(outcome, SearchOutcome::Cancelled { partial: None });
        }
    }

    #[test]
    fn test_mid_search_deadline_unwinds_to_root() {
        let board = midgame_board();

        let polls = Cell::new(0u32);
        let ticking = || {
            polls.set(polls.get() + 1);
            if polls.get() > 40 {
                0.0
            } else {
                1e9
            }
        };
        let deadline = Deadline::new(&ticking, 10.0);

        let outcome = alphabeta_root(&board, 8, blended_score, &deadline);
        assert!(outcome.is_cancelled());
    }

    #[test]
    fn test_deadline_repolls_accessor() {
        let polls = Cell::new(0u32);
        let counting = || {
            polls.set(polls.get() + 1);
            1e9
        };
        let deadline = Deadline::new(&counting, 10.0);

        deadline.check().unwrap();
        deadline.check().unwrap();
        assert_eq!(polls.get(), 2);
    }
}
