use log::error;

use crate::heuristic::ScoreFn;
use crate::{Board, Player};

use super::{Deadline, DeadlineExceeded, SearchOutcome};

/// Alpha-beta-pruned minimax. Maximizing and minimizing layers are separate,
/// mutually recursive procedures since their cutoff comparisons are
/// asymmetric: the maximizer prunes on `value >= beta`, the minimizer on
/// `value <= alpha`. For equal depth the root value is identical to plain
/// minimax; pruning only changes which nodes get visited.
fn max_value(
    board: &Board,
    depth: u32,
    mut alpha: f64,
    beta: f64,
    root_player: Player,
    score: ScoreFn,
    deadline: &Deadline,
) -> Result<f64, DeadlineExceeded> {
    deadline.check()?;

    if depth == 0 || board.is_terminal() {
        return Ok(score(board, root_player));
    }

    let mut value = f64::NEG_INFINITY;

    for mv in board.legal_moves() {
        let next = match board.forecast_move(mv) {
            Ok(next) => next,
            Err(err) => {
                error!("forecast of enumerated move failed: {}", err);
                continue;
            }
        };

        value = value.max(min_value(&next, depth - 1, alpha, beta, root_player, score, deadline)?);

        if value >= beta {
            // beta cutoff
            return Ok(value);
        }
        alpha = alpha.max(value);
    }

    Ok(value)
}

fn min_value(
    board: &Board,
    depth: u32,
    alpha: f64,
    mut beta: f64,
    root_player: Player,
    score: ScoreFn,
    deadline: &Deadline,
) -> Result<f64, DeadlineExceeded> {
    deadline.check()?;

    if depth == 0 || board.is_terminal() {
        return Ok(score(board, root_player));
    }

    let mut value = f64::INFINITY;

    for mv in board.legal_moves() {
        let next = match board.forecast_move(mv) {
            Ok(next) => next,
            Err(err) => {
                error!("forecast of enumerated move failed: {}", err);
                continue;
            }
        };

        value = value.min(max_value(&next, depth - 1, alpha, beta, root_player, score, deadline)?);

        if value <= alpha {
            // alpha cutoff
            return Ok(value);
        }
        beta = beta.min(value);
    }

    Ok(value)
}

/// Root-level alpha-beta with the full `(-inf, +inf)` window. Same move
/// tracking and tie-break as `minimax_root`; alpha is raised as root moves
/// resolve so later siblings search a narrowed window.
pub fn alphabeta_root(board: &Board, depth: u32, score: ScoreFn, deadline: &Deadline) -> SearchOutcome {
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
    let mut alpha = f64::NEG_INFINITY;
    let beta = f64::INFINITY;

    for mv in board.legal_moves() {
        let next = match board.forecast_move(mv) {
            Ok(next) => next,
            Err(err) => {
                error!("forecast of enumerated move failed: {}", err);
                continue;
            }
        };

        match min_value(&next, depth - 1, alpha, beta, root_player, score, deadline) {
            Ok(value) => {
                if best_move.is_none() || value > best_value {
                    best_value = value;
                    best_move = Some(mv);
                }
                alpha = alpha.max(best_value);
            }
            Err(DeadlineExceeded) => return SearchOutcome::Cancelled { partial: best_move },
        }
    }

    SearchOutcome::Completed {
        value: best_value,
        best: best_move,
    }
}
