//! Piece-square tables, from White's point of view with a1 as the first
//! entry. Black values mirror the board vertically.

use crate::board::{Color, PieceKind};
use crate::square::Square;

#[rustfmt::skip]
const PAWN: [i32; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
      5,  10,  10, -20, -20,  10,  10,   5,
      5,  -5, -10,   0,   0, -10,  -5,   5,
      0,   0,   0,  20,  20,   0,   0,   0,
      5,   5,  10,  25,  25,  10,   5,   5,
     10,  10,  20,  30,  30,  20,  10,  10,
     50,  50,  50,  50,  50,  50,  50,  50,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const BISHOP: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const ROOK: [i32; 64] = [
      0,   0,   0,   5,   5,   0,   0,   0,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
      5,  10,  10,  10,  10,  10,  10,   5,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const QUEEN: [i32; 64] = [
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    -10,   0,   5,   0,   0,   0,   0, -10,
    -10,   5,   5,   5,   5,   5,   0, -10,
      0,   0,   5,   5,   5,   5,   0,  -5,
     -5,   0,   5,   5,   5,   5,   0,  -5,
    -10,   0,   5,   5,   5,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10,  -5,  -5, -10, -10, -20,
];

#[rustfmt::skip]
const KING_MIDDLE: [i32; 64] = [
     20,  30,  10,   0,   0,  10,  30,  20,
     20,  20,   0,   0,   0,   0,  20,  20,
    -10, -20, -20, -20, -20, -20, -20, -10,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
];

#[rustfmt::skip]
const KING_END: [i32; 64] = [
    -50, -30, -30, -30, -30, -30, -30, -50,
    -30, -30,   0,   0,   0,   0, -30, -30,
    -30, -10,  20,  30,  30,  20, -10, -30,
    -30, -10,  30,  40,  40,  30, -10, -30,
    -30, -10,  30,  40,  40,  30, -10, -30,
    -30, -10,  20,  30,  30,  20, -10, -30,
    -30, -20, -10,   0,   0, -10, -20, -30,
    -50, -40, -30, -20, -20, -30, -40, -50,
];

/// Positional value of a piece on a square, from White's point of view.
/// The king table fades from the middle-game table to the endgame table as
/// `end_game_weight` approaches 1.
pub fn pst_value(kind: PieceKind, sq: Square, color: Color, end_game_weight: f64) -> i32 {
    let index = match color {
        Color::White => sq as usize,
        Color::Black => (sq ^ 56) as usize,
    };
    match kind {
        PieceKind::Pawn => PAWN[index],
        PieceKind::Knight => KNIGHT[index],
        PieceKind::Bishop => BISHOP[index],
        PieceKind::Rook => ROOK[index],
        PieceKind::Queen => QUEEN[index],
        PieceKind::King => {
            let w = (end_game_weight.clamp(0.0, 1.0) * 100.0) as i32;
            (KING_MIDDLE[index] * (100 - w) + KING_END[index] * w) / 100
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square;

    #[test]
    fn test_tables_are_mirrored_for_black() {
        let e4 = square::parse("e4").unwrap();
        let e5 = square::parse("e5").unwrap();
        assert_eq!(
            pst_value(PieceKind::Pawn, e4, Color::White, 0.0),
            pst_value(PieceKind::Pawn, e5, Color::Black, 0.0)
        );
    }

    #[test]
    fn test_central_knight_beats_rim_knight() {
        let e4 = square::parse("e4").unwrap();
        let a1 = square::parse("a1").unwrap();
        assert!(
            pst_value(PieceKind::Knight, e4, Color::White, 0.0)
                > pst_value(PieceKind::Knight, a1, Color::White, 0.0)
        );
    }

    #[test]
    fn test_king_table_fades_to_endgame() {
        let e4 = square::parse("e4").unwrap();
        let middle = pst_value(PieceKind::King, e4, Color::White, 0.0);
        let end = pst_value(PieceKind::King, e4, Color::White, 1.0);
        assert!(end > middle, "a centralised king is an endgame asset");
        assert_eq!(middle, KING_MIDDLE[e4 as usize]);
        assert_eq!(end, KING_END[e4 as usize]);
    }
}
