use std::collections::VecDeque;

use crate::{Board, Player, Position};

/// evaluation of a state from one player's perspective; +inf / -inf at
/// decided states, finite otherwise
pub type ScoreFn = fn(&Board, Player) -> f64;

/// terminal states are scored before any heuristic measure; mobility and
/// reachability are undefined once the game is decided
fn decided(board: &Board, player: Player) -> Option<f64> {
    if board.is_winner(player) {
        Some(f64::INFINITY)
    } else if board.is_loser(player) {
        Some(f64::NEG_INFINITY)
    } else {
        None
    }
}

/// own legal-move count minus the opponent's
pub fn mobility_score(board: &Board, player: Player) -> f64 {
    if let Some(value) = decided(board, player) {
        return value;
    }

    let own_moves = board.legal_moves_for(player).len();
    let opp_moves = board.legal_moves_for(!player).len();

    own_moves as f64 - opp_moves as f64
}

/// number of cells a player could still reach by chaining knight jumps over
/// blank cells (breadth-first flood fill from the current location)
fn reachable_count(board: &Board, player: Player) -> usize {
    let start = match board.player_location(player) {
        Some(pos) => pos,
        // not placed yet: every blank cell is a legal placement
        None => return board.blank_count(),
    };

    let width = board.width() as usize;
    let mut visited = vec![false; width * board.height() as usize];
    let index = |pos: Position| pos.row as usize * width + pos.col as usize;

    let mut frontier = VecDeque::new();
    frontier.push_back(start);
    visited[index(start)] = true;

    let mut count = 0;
    while let Some(pos) = frontier.pop_front() {
        count += 1;
        for jump in board.blank_jumps(pos) {
            if !visited[index(jump)] {
                visited[index(jump)] = true;
                frontier.push_back(jump);
            }
        }
    }

    count
}

/// difference of the two players' flood-fill reach; O(board size) per call,
/// worth the cost only once the board has filled up
pub fn reachability_score(board: &Board, player: Player) -> f64 {
    if let Some(value) = decided(board, player) {
        return value;
    }

    let own_reach = reachable_count(board, player);
    let opp_reach = reachable_count(board, !player);

    own_reach as f64 - opp_reach as f64
}

/// default policy: cheap mobility while the board is open, flood-fill
/// reachability once fewer than half the cells are blank
pub fn blended_score(board: &Board, player: Player) -> f64 {
    let board_size = board.width() as usize * board.height() as usize;

    if 2 * board.blank_count() < board_size {
        reachability_score(board, player)
    } else {
        mobility_score(board, player)
    }
}

/*====================================================================================================================*/

#[cfg(test)]
mod tests {
    use super::*;

    fn trapped_board() -> Board {
        // terminal for Player 2: its only knight jump from (1, 1) is occupied
        let mut board = Board::new(3, 2);
        board.apply_move(Position::new(0, 0)).unwrap();
        board.apply_move(Position::new(1, 1)).unwrap();
        board.apply_move(Position::new(1, 2)).unwrap();
        board
    }

    #[test]
    fn test_terminal_scores_agree_with_board() {
        let board = trapped_board();

        for score in [mobility_score, reachability_score, blended_score] {
            assert_eq!(score(&board, Player::Two), f64::NEG_INFINITY);
            assert_eq!(score(&board, Player::One), f64::INFINITY);
        }
    }

    #[test]
    fn test_mobility_is_move_count_difference() {
        let mut board = Board::new(7, 7);
        board.apply_move(Position::new(3, 3)).unwrap(); // P1, 8 jumps
        board.apply_move(Position::new(0, 0)).unwrap(); // P2, 2 jumps

        assert_eq!(mobility_score(&board, Player::One), 6.0);
        assert_eq!(mobility_score(&board, Player::Two), -6.0);
    }

    #[test]
    fn test_reachability_is_zero_on_symmetric_position() {
        let mut board = Board::new(7, 7);
        board.apply_move(Position::new(0, 0)).unwrap();
        board.apply_move(Position::new(6, 6)).unwrap();

        // positions related by 180-degree rotation reach the same cell count
        assert_eq!(reachability_score(&board, Player::One), 0.0);
        assert_eq!(reachability_score(&board, Player::Two), 0.0);
    }

    #[test]
    fn test_blended_switches_on_blank_fraction() {
        let mut board = Board::new(7, 7);
        board.apply_move(Position::new(3, 3)).unwrap();
        board.apply_move(Position::new(0, 0)).unwrap();

        // 47 of 49 cells blank: the cheap measure is used
        assert_eq!(blended_score(&board, Player::One), mobility_score(&board, Player::One));
    }
}
