use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

mod agent;
mod cache;
mod heuristic;
mod isolation;
mod search;

use agent::{Agent, RandomAgent, SearchAgent};
pub use isolation::{Board, InvalidMove, Player, Position};
use log::{error, info};
use search::SearchMethod;
use threadpool::ThreadPool;

/// per-turn budget handed to each agent
const TURN_TIME_MS: f64 = 150.0;

fn single_ply(board: &mut Board, playing_agent: &mut impl Agent, print: bool) -> bool {
    let player = board.to_move();

    let start_time = std::time::Instant::now();
    let time_left = move || TURN_TIME_MS - start_time.elapsed().as_secs_f64() * 1000.0;

    let player_move = match playing_agent.get_move(board, &time_left) {
        Some(player_move) => player_move,
        None => {
            if print {
                info!("{} resigns", player);
            }
            return false;
        }
    };

    if print {
        info!(
            "{} decided to make move {} after {:?}",
            player,
            player_move,
            start_time.elapsed()
        );
    }

    match board.apply_move(player_move) {
        Ok(()) => true,
        Err(err) => {
            error!("{} forfeits: {}", player, err);
            false
        }
    }
}

fn game_loop(board: Board, player_one: impl Agent, player_two: impl Agent, print: bool) -> Player {
    let mut board = board;
    let mut player_one = player_one;
    let mut player_two = player_two;

    loop {
        if board.is_terminal() {
            return !board.to_move();
        }

        let current = board.to_move();
        let moved = match current {
            Player::One => single_ply(&mut board, &mut player_one, print),
            Player::Two => single_ply(&mut board, &mut player_two, print),
        };

        // a resignation or illegal move ends the game on the spot
        if !moved {
            return !current;
        }
    }
}

pub fn play_game<PlayerOne, PlayerTwo>(width: u8, height: u8, player_one: PlayerOne, player_two: PlayerTwo)
where
    PlayerOne: Agent,
    PlayerTwo: Agent,
{
    let board = Board::new(width, height);

    let winner = game_loop(board, player_one, player_two, true);

    info!("{} won", winner);
}

/// play `num_runs` games in parallel (whole games, never a single search)
/// and tally the winners
pub fn evaluate_agents<PlayerOne, PlayerTwo>(
    width: u8,
    height: u8,
    player_one_builder: &dyn Fn() -> PlayerOne,
    player_two_builder: &dyn Fn() -> PlayerTwo,
    num_runs: usize,
) where
    PlayerOne: Agent + Send + 'static,
    PlayerTwo: Agent + Send + 'static,
{
    let num_workers = num_cpus::get();

    let one_wins = Arc::new(AtomicU64::new(0));
    let two_wins = Arc::new(AtomicU64::new(0));

    let pool = ThreadPool::new(num_workers);

    for _ in 0..num_runs {
        let board = Board::new(width, height);

        let player_one = player_one_builder();
        let player_two = player_two_builder();

        let one_wins = Arc::clone(&one_wins);
        let two_wins = Arc::clone(&two_wins);

        pool.execute(move || {
            match game_loop(board, player_one, player_two, false) {
                Player::One => one_wins.fetch_add(1, Ordering::Release),
                Player::Two => two_wins.fetch_add(1, Ordering::Release),
            };
        });
    }

    pool.join();

    info!("Player 1 wins: {}", one_wins.load(Ordering::Acquire));
    info!("Player 2 wins: {}", two_wins.load(Ordering::Acquire));
}

fn main() {
    simple_logger::init_with_level(log::Level::Info).unwrap();

    play_game(
        7,
        7,
        SearchAgent::new(SearchMethod::AlphaBeta),
        RandomAgent::new(),
    );

    evaluate_agents(
        7,
        7,
        &|| SearchAgent::new(SearchMethod::AlphaBeta),
        &RandomAgent::new,
        20,
    );
}
