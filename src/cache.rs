use std::collections::{BTreeSet, HashMap};

use log::debug;

use crate::isolation::symmetry::{reflect, rotate_cw, rotate_move};
use crate::{Board, Player, Position};

/// canonical cache key: the occupied cells plus the querying player's own
/// position
pub type SignatureKey = (BTreeSet<Position>, Position);

/*====================================================================================================================*/

/// Symmetry-closed move cache for the early and late game. Populated only,
/// never evicted; lives exactly as long as the agent that owns it and is
/// touched by no one else.
pub struct TranspositionTable {
    entries: HashMap<SignatureKey, Option<Position>>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        TranspositionTable {
            entries: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// signature of `board` from `player`'s point of view; `None` while the
    /// player has no piece on the board
    pub fn signature(board: &Board, player: Player) -> Option<SignatureKey> {
        let own = board.player_location(player)?;
        Some((board.occupied_spaces().into_iter().collect(), own))
    }

    pub fn lookup(&self, key: &SignatureKey) -> Option<Option<Position>> {
        self.entries.get(key).copied()
    }

    /// Insert `key -> mv` together with its whole symmetry orbit: the
    /// horizontal reflection always, and on a square board also the three
    /// clockwise rotations and each rotation's reflection (8 entries total,
    /// 2 on a non-square board). Rotations are skipped, not an error, when
    /// width != height.
    pub fn insert_orbit(&mut self, key: SignatureKey, mv: Option<Position>, width: u8, height: u8) {
        let reflect_key = |key: &SignatureKey| -> Option<SignatureKey> {
            let occupied = key
                .0
                .iter()
                .map(|&pos| reflect(pos, height))
                .collect::<Option<BTreeSet<Position>>>()?;
            Some((occupied, reflect(key.1, height)?))
        };
        // the entry is dropped whole when any image leaves the coordinate
        // range; a clipped move must not masquerade as the "no move" sentinel
        let reflected_entry = |key: &SignatureKey, mv: Option<Position>| -> Option<(SignatureKey, Option<Position>)> {
            let reflected = reflect_key(key)?;
            let mv = match mv {
                Some(pos) => Some(reflect(pos, height)?),
                None => None,
            };
            Some((reflected, mv))
        };
        let rotate_key = |key: &SignatureKey| -> SignatureKey {
            (
                key.0.iter().map(|&pos| rotate_cw(pos, width)).collect(),
                rotate_cw(key.1, width),
            )
        };

        match reflected_entry(&key, mv) {
            Some((reflected, reflected_move)) => {
                self.entries.insert(reflected, reflected_move);
            }
            None => debug!("reflected image leaves the board, dropping orbit entry"),
        }
        self.entries.insert(key.clone(), mv);

        if width != height {
            debug!("non-square board, skipping rotation symmetries");
            return;
        }

        let mut rotated_key = key;
        let mut rotated_move = mv;
        for _ in 0..3 {
            rotated_key = rotate_key(&rotated_key);
            rotated_move = rotate_move(rotated_move, width);

            // on a square board the reflection extent always fits
            if let Some((reflected, reflected_move)) = reflected_entry(&rotated_key, rotated_move) {
                self.entries.insert(reflected, reflected_move);
            }
            self.entries.insert(rotated_key.clone(), rotated_move);
        }
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        TranspositionTable::new()
    }
}

/*====================================================================================================================*/

#[cfg(test)]
mod tests {
    use super::*;

    fn asymmetric_key() -> SignatureKey {
        let occupied: BTreeSet<Position> = [Position::new(0, 1), Position::new(2, 3), Position::new(3, 3)]
            .into_iter()
            .collect();
        (occupied, Position::new(2, 3))
    }

    #[test]
    fn test_square_orbit_has_eight_entries() {
        let mut table = TranspositionTable::new();
        table.insert_orbit(asymmetric_key(), Some(Position::new(4, 4)), 7, 7);

        assert_eq!(table.len(), 8);
    }

    #[test]
    fn test_non_square_orbit_has_two_entries() {
        let mut table = TranspositionTable::new();
        let occupied: BTreeSet<Position> = [Position::new(0, 2), Position::new(4, 3)].into_iter().collect();

        table.insert_orbit((occupied, Position::new(4, 3)), Some(Position::new(2, 2)), 5, 7);

        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_reflected_lookup_returns_reflected_move() {
        let mut table = TranspositionTable::new();
        let key = asymmetric_key();
        table.insert_orbit(key.clone(), Some(Position::new(4, 4)), 7, 7);

        let reflected_key: SignatureKey = (
            key.0.iter().map(|&pos| reflect(pos, 7).unwrap()).collect(),
            reflect(key.1, 7).unwrap(),
        );

        assert_eq!(table.lookup(&reflected_key), Some(Some(Position::new(4, 2))));
    }

    #[test]
    fn test_wide_board_out_of_range_reflection_dropped() {
        let mut table = TranspositionTable::new();
        // width 7, height 5: column 6 has no mirror image
        let occupied: BTreeSet<Position> = [Position::new(0, 6), Position::new(1, 1)].into_iter().collect();

        table.insert_orbit((occupied, Position::new(0, 6)), Some(Position::new(1, 4)), 7, 5);

        // the base entry survives, the unreflectable one is dropped
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_rotated_lookup_returns_rotated_move() {
        let mut table = TranspositionTable::new();
        let key = asymmetric_key();
        table.insert_orbit(key.clone(), Some(Position::new(4, 4)), 7, 7);

        let rotated_key: SignatureKey = (
            key.0.iter().map(|&pos| rotate_cw(pos, 7)).collect(),
            rotate_cw(key.1, 7),
        );

        assert_eq!(table.lookup(&rotated_key), Some(Some(rotate_cw(Position::new(4, 4), 7))));
    }

    #[test]
    fn test_sentinel_survives_every_transform() {
        let mut table = TranspositionTable::new();
        table.insert_orbit(asymmetric_key(), None, 7, 7);

        assert_eq!(table.len(), 8);
        assert!(table.entries.values().all(|mv| mv.is_none()));
    }

    #[test]
    fn test_signature_requires_a_placed_player() {
        let board = Board::new(7, 7);
        assert!(TranspositionTable::signature(&board, Player::One).is_none());

        let board = board.forecast_move(Position::new(3, 3)).unwrap();
        let (occupied, own) = TranspositionTable::signature(&board, Player::One).unwrap();
        assert_eq!(own, Position::new(3, 3));
        assert!(occupied.contains(&Position::new(3, 3)));
        assert_eq!(occupied.len(), 1);
    }
}
