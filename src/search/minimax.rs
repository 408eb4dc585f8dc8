use log::error;

use crate::heuristic::ScoreFn;
use crate::{Board, Player};

use super::{Deadline, DeadlineExceeded, SearchOutcome};

/// Depth-limited minimax, scored from `root_player`'s perspective. The
/// deadline is polled before anything else at every node; a trip unwinds the
/// whole recursion through `?`.
fn minimax(
    board: &Board,
    depth: u32,
    maximizing: bool,
    root_player: Player,
    score: ScoreFn,
    deadline: &Deadline,
) -> Result<f64, DeadlineExceeded> {
    deadline.check()?;

    if depth == 0 || board.is_terminal() {
        return Ok(score(board, root_player));
    }

    let mut best = if maximizing { f64::NEG_INFINITY } else { f64::INFINITY };

    for mv in board.legal_moves() {
        let next = match board.forecast_move(mv) {
            Ok(next) => next,
            Err(err) => {
                // enumerated moves are legal by construction
                error!("forecast of enumerated move failed: {}", err);
                continue;
            }
        };

        let value = minimax(&next, depth - 1, !maximizing, root_player, score, deadline)?;

        if maximizing {
            best = best.max(value);
        } else {
            best = best.min(value);
        }
    }

    Ok(best)
}

/// Root-level minimax over the side to move. Tracks the move achieving the
/// maximum (first one wins ties, in the board's enumeration order) and turns
/// a mid-iteration deadline into `Cancelled` carrying the best move found so
/// far.
pub fn minimax_root(board: &Board, depth: u32, score: ScoreFn, deadline: &Deadline) -> SearchOutcome {
    let root_player = board.to_move();

    if deadline.check().is_err() {
        return SearchOutcome::Cancelled { partial: None };
    }

    if depth == 0 || board.is_terminal() {
        return SearchOutcome::Completed {
            value: score(board, root_player),
            best: None,
        };
    }

    let mut best_value = f64::NEG_INFINITY;
    let mut best_move = None;

    for mv in board.legal_moves() {
        let next = match board.forecast_move(mv) {
            Ok(next) => next,
            Err(err) => {
                error!("forecast of enumerated move failed: {}", err);
                continue;
            }
        };

        match minimax(&next, depth - 1, false, root_player, score, deadline) {
            Ok(value) => {
                if best_move.is_none() || value > best_value {
                    best_value = value;
                    best_move = Some(mv);
                }
            }
            Err(DeadlineExceeded) => return SearchOutcome::Cancelled { partial: best_move },
        }
    }

    SearchOutcome::Completed {
        value: best_value,
        best: best_move,
    }
}
