use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::agent::Agent;
use crate::cache::TranspositionTable;
use crate::heuristic::{blended_score, ScoreFn};
use crate::search::{Deadline, SearchMethod, SearchOutcome};
use crate::{Board, Position};

/// cache window: at most this many plies played ...
const EARLY_CACHE_PLIES: u32 = 5;
/// ... or at most this many blank cells left
const LATE_CACHE_BLANKS: usize = 10;

/// Game-playing agent: fixed opening move, transposition cache for the early
/// and late game, iterative-deepening minimax or alpha-beta everywhere else.
/// Configuration is fixed at construction; the cache lives and dies with the
/// agent instance.
pub struct SearchAgent {
    method: SearchMethod,
    iterative: bool,
    search_depth: u32,
    threshold_ms: f64,
    score: ScoreFn,

    cache: TranspositionTable,
}

impl SearchAgent {
    pub fn new(method: SearchMethod) -> Self {
        SearchAgent::with_config(method, true, 3, 10.0, blended_score)
    }

    pub fn with_config(method: SearchMethod, iterative: bool, search_depth: u32, threshold_ms: f64, score: ScoreFn) -> Self {
        SearchAgent {
            method,
            iterative,
            search_depth,
            threshold_ms,
            score,
            cache: TranspositionTable::new(),
        }
    }

    /// First move of the game: the center if it is open, otherwise a random
    /// legal cell the opponent cannot jump to (avoids handing back a
    /// mirrored line).
    fn opening_move(&self, board: &Board) -> Option<Position> {
        let center = Position::new(board.height() / 2, board.width() / 2);
        if board.move_is_legal(center) {
            return Some(center);
        }

        let legal = board.legal_moves();
        let opponent_reach = board.legal_moves_for(!board.to_move());
        let safe: Vec<Position> = legal
            .iter()
            .copied()
            .filter(|mv| !opponent_reach.contains(mv))
            .collect();

        let mut rng = thread_rng();
        safe.choose(&mut rng).copied().or_else(|| legal.choose(&mut rng).copied())
    }

    fn in_cache_window(board: &Board) -> bool {
        board.move_count() <= EARLY_CACHE_PLIES || board.blank_count() <= LATE_CACHE_BLANKS
    }

    /// Iterative deepening from depth 1 upward (or one fixed-depth pass when
    /// iterative mode is off). The most recent iteration's move is retained;
    /// a cancelled iteration contributes its partial best if it got that
    /// far. `None` means the deadline expired before any root move resolved.
    fn run_search(&self, board: &Board, deadline: &Deadline) -> Option<Position> {
        let mut best = None;

        if self.iterative {
            for depth in 1.. {
                match self.method.search(board, depth, self.score, deadline) {
                    SearchOutcome::Completed { best: mv, .. } => {
                        if mv.is_some() {
                            best = mv;
                        }
                    }
                    SearchOutcome::Cancelled { partial } => {
                        debug!("deadline hit at depth {}", depth);
                        if partial.is_some() {
                            best = partial;
                        }
                        break;
                    }
                }
            }
        } else {
            best = self.method.search(board, self.search_depth, self.score, deadline).best_move();
        }

        best
    }
}

impl Agent for SearchAgent {
    fn get_move(&mut self, board: &Board, time_left_ms: &dyn Fn() -> f64) -> Option<Position> {
        if board.is_terminal() {
            // resign: no search, no cache traffic
            return None;
        }

        let stones = board.width() as u32 * board.height() as u32 - board.blank_count() as u32;
        if stones < 2 {
            return self.opening_move(board);
        }

        let deadline = Deadline::new(time_left_ms, self.threshold_ms);

        let mut cache_key = None;
        if Self::in_cache_window(board) {
            if let Some(key) = TranspositionTable::signature(board, board.to_move()) {
                if let Some(Some(cached)) = self.cache.lookup(&key) {
                    if board.move_is_legal(cached) {
                        return Some(cached);
                    }
                    // signature ignores the opponent's position, so a hit can
                    // belong to a state with a different blocking piece
                    warn!("cached move {} is illegal here, searching instead", cached);
                }
                cache_key = Some(key);
            }
        }

        match self.run_search(board, &deadline) {
            Some(best) => {
                if let Some(key) = cache_key {
                    // written only after the search has fully returned
                    self.cache.insert_orbit(key, Some(best), board.width(), board.height());
                }
                Some(best)
            }
            // no root move resolved in time; play the first legal move but
            // record nothing, a stopgap is not a recommendation
            None => board.legal_moves().first().copied(),
        }
    }
}

/*====================================================================================================================*/
