use std::fmt::{Debug, Display};

use thiserror::Error;

/// knight-style jump offsets, in the fixed enumeration order that drives
/// move ordering and therefore search tie-breaks
const DIRECTIONS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/*====================================================================================================================*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    One,
    Two,
}

impl std::ops::Not for Player {
    type Output = Player;

    fn not(self) -> Self::Output {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::One => write!(f, "Player 1"),
            Player::Two => write!(f, "Player 2"),
        }
    }
}

/*====================================================================================================================*/

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Self {
        Position { row, col }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl Debug for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Position({}, {})", self.row, self.col)
    }
}

/*====================================================================================================================*/

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("move to {0} is not legal in the current position")]
pub struct InvalidMove(pub Position);

/*====================================================================================================================*/

/// Isolation game state. Every cell a piece ever lands on stays blocked for
/// the rest of the game; a piece not yet on the board may be placed on any
/// blank cell, afterwards it moves in knight-style jumps.
#[derive(Clone)]
pub struct Board {
    blocked: Box<[bool]>,

    width: u8,
    height: u8,

    locations: [Option<Position>; 2],
    to_move: Player,
    move_count: u32,
}

impl Board {
    pub fn new(width: u8, height: u8) -> Self {
        assert!(width > 0 && height > 0, "Board dimensions must be positive");

        let blocked = vec![false; width as usize * height as usize].into_boxed_slice();
        Board {
            blocked,
            width,
            height,
            locations: [None, None],
            to_move: Player::One,
            move_count: 0,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    fn index(&self, pos: Position) -> usize {
        pos.row as usize * self.width as usize + pos.col as usize
    }

    fn in_bounds(&self, row: i16, col: i16) -> bool {
        0 <= row && row < self.height as i16 && 0 <= col && col < self.width as i16
    }

    pub fn is_blank(&self, pos: Position) -> bool {
        !self.blocked[self.index(pos)]
    }

    /// blank cells in row-major order
    pub fn blank_spaces(&self) -> Vec<Position> {
        let mut blanks = Vec::with_capacity(self.blocked.len());
        for row in 0..self.height {
            for col in 0..self.width {
                let pos = Position::new(row, col);
                if self.is_blank(pos) {
                    blanks.push(pos);
                }
            }
        }
        blanks
    }

    pub fn blank_count(&self) -> usize {
        self.blocked.iter().filter(|&&b| !b).count()
    }

    /// occupied cells in row-major order
    pub fn occupied_spaces(&self) -> Vec<Position> {
        let mut occupied = Vec::new();
        for row in 0..self.height {
            for col in 0..self.width {
                let pos = Position::new(row, col);
                if !self.is_blank(pos) {
                    occupied.push(pos);
                }
            }
        }
        occupied
    }

    pub fn player_location(&self, player: Player) -> Option<Position> {
        match player {
            Player::One => self.locations[0],
            Player::Two => self.locations[1],
        }
    }

    /// in-bounds blank knight jumps from an arbitrary cell, in DIRECTIONS order
    pub fn blank_jumps(&self, from: Position) -> Vec<Position> {
        DIRECTIONS
            .iter()
            .filter_map(|&(dr, dc)| {
                let row = from.row as i16 + dr as i16;
                let col = from.col as i16 + dc as i16;
                if !self.in_bounds(row, col) {
                    return None;
                }
                let pos = Position::new(row as u8, col as u8);
                self.is_blank(pos).then_some(pos)
            })
            .collect()
    }

    /// legal moves for `player`, in deterministic order: all blank cells
    /// (row-major) if the player has no piece on the board yet, otherwise
    /// knight jumps in DIRECTIONS order
    pub fn legal_moves_for(&self, player: Player) -> Vec<Position> {
        match self.player_location(player) {
            Some(loc) => self.blank_jumps(loc),
            None => self.blank_spaces(),
        }
    }

    /// legal moves for the side to move
    pub fn legal_moves(&self) -> Vec<Position> {
        self.legal_moves_for(self.to_move)
    }

    pub fn move_is_legal(&self, pos: Position) -> bool {
        if !self.in_bounds(pos.row as i16, pos.col as i16) || !self.is_blank(pos) {
            return false;
        }

        match self.player_location(self.to_move) {
            None => true,
            Some(loc) => {
                let dr = pos.row as i16 - loc.row as i16;
                let dc = pos.col as i16 - loc.col as i16;
                DIRECTIONS.iter().any(|&(r, c)| (r as i16, c as i16) == (dr, dc))
            }
        }
    }

    /// no legal move for the side to move
    pub fn is_terminal(&self) -> bool {
        self.legal_moves().is_empty()
    }

    pub fn apply_move(&mut self, pos: Position) -> Result<(), InvalidMove> {
        if !self.move_is_legal(pos) {
            return Err(InvalidMove(pos));
        }

        let idx = self.index(pos);
        self.blocked[idx] = true;

        match self.to_move {
            Player::One => self.locations[0] = Some(pos),
            Player::Two => self.locations[1] = Some(pos),
        }

        self.to_move = !self.to_move;
        self.move_count += 1;

        Ok(())
    }

    /// new state with `pos` played; the receiver is never mutated
    pub fn forecast_move(&self, pos: Position) -> Result<Board, InvalidMove> {
        let mut next = self.clone();
        next.apply_move(pos)?;
        Ok(next)
    }

    pub fn is_winner(&self, player: Player) -> bool {
        player != self.to_move && self.is_terminal()
    }

    pub fn is_loser(&self, player: Player) -> bool {
        player == self.to_move && self.is_terminal()
    }

    /// terminal outcome from `player`'s perspective: +inf win, -inf loss,
    /// 0.0 at every non-terminal state
    pub fn utility(&self, player: Player) -> f64 {
        if !self.is_terminal() {
            return 0.0;
        }

        if player == self.to_move {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        }
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                let pos = Position::new(row, col);

                let glyph = if self.player_location(Player::One) == Some(pos) {
                    '1'
                } else if self.player_location(Player::Two) == Some(pos) {
                    '2'
                } else if self.is_blank(pos) {
                    '.'
                } else {
                    '#'
                };

                write!(f, " {}", glyph)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/*====================================================================================================================*/
