//! Board symmetry transforms used to close the transposition cache over
//! equivalent positions.

use super::board::Position;

/// Mirror a position across the board's vertical center axis. The mirror
/// extent is the board height, so on a wide board (width > height) columns
/// at or beyond the height extent have no image; those come back as `None`
/// and the caller drops the orbit entry.
pub fn reflect(pos: Position, height: u8) -> Option<Position> {
    let col = height as i16 - 1 - pos.col as i16;
    u8::try_from(col).ok().map(|col| Position::new(pos.row, col))
}

/// rotate a position 90 degrees clockwise; used on square boards only,
/// where a row index always fits the width extent
pub fn rotate_cw(pos: Position, width: u8) -> Position {
    Position::new(pos.col, width - 1 - pos.row)
}

/// the "no move" sentinel is invariant under every transform
pub fn rotate_move(mv: Option<Position>, width: u8) -> Option<Position> {
    mv.map(|pos| rotate_cw(pos, width))
}

/*====================================================================================================================*/
