//! Castling pre-validation and move synthesis.
//!
//! Castling is the one move whose legality cannot be judged from a single
//! origin/destination pair, so it is generated here in full: rights, empty
//! squares, the king not being in check and the transit squares being safe
//! are all checked before the move is emitted. Execution then relocates
//! king and rook as one atomic move.

use crate::board::strategic::{
    StrategicData, BLACK_KING_SIDE, BLACK_QUEEN_SIDE, WHITE_KING_SIDE, WHITE_QUEEN_SIDE,
};
use crate::board::{Board, Color, PieceKind};
use crate::moves::Move;
use crate::square::Square;
use smallvec::SmallVec;

const WHITE_KING_START: Square = 4;
const BLACK_KING_START: Square = 60;

/// Rook relocation for a castling king destination.
pub fn rook_relocation(king_to: Square) -> Option<(Square, Square)> {
    match king_to {
        6 => Some((7, 5)),
        2 => Some((0, 3)),
        62 => Some((63, 61)),
        58 => Some((56, 59)),
        _ => None,
    }
}

/// Append the legal castling moves for `color`.
pub fn moves_for(board: &Board, color: Color, buf: &mut SmallVec<[Move; 64]>) {
    let (king_start, king_side, queen_side) = match color {
        Color::White => (WHITE_KING_START, WHITE_KING_SIDE, WHITE_QUEEN_SIDE),
        Color::Black => (BLACK_KING_START, BLACK_KING_SIDE, BLACK_QUEEN_SIDE),
    };
    let rights = &board.strategic.castling;
    if !rights[king_side] && !rights[queen_side] {
        return;
    }
    if board.king_square(color) != Some(king_start) {
        return;
    }
    let oracle = board.attack_cache(color.opposite());
    if oracle.attacks_square(king_start) {
        return;
    }

    if rights[king_side] && side_is_clear(board, color, king_start, true) {
        buf.push(Move::castling(king_start, king_start + 2));
    }
    if rights[queen_side] && side_is_clear(board, color, king_start, false) {
        buf.push(Move::castling(king_start, king_start - 2));
    }
}

fn side_is_clear(board: &Board, color: Color, king_start: Square, king_side: bool) -> bool {
    let oracle = board.attack_cache(color.opposite());
    let (rook_sq, empties, transits): (Square, &[Square], &[Square]) = if king_side {
        (
            king_start + 3,
            &[king_start + 1, king_start + 2][..],
            &[king_start + 1, king_start + 2][..],
        )
    } else {
        (
            king_start - 4,
            &[king_start - 1, king_start - 2, king_start - 3][..],
            &[king_start - 1, king_start - 2][..],
        )
    };

    let rook_present = board
        .piece_at(rook_sq)
        .map_or(false, |p| p.color == color && p.kind == PieceKind::Rook);
    if !rook_present {
        return false;
    }
    if empties.iter().any(|&sq| board.piece_at(sq).is_some()) {
        return false;
    }
    !transits.iter().any(|&sq| oracle.attacks_square(sq))
}

/// Drop castling rights invalidated by a move between `from` and `to`.
/// Covers the king moving, a rook moving, and a rook being captured.
pub fn revoke_rights(strategic: &mut StrategicData, from: Square, to: Square) {
    for sq in [from, to] {
        match sq {
            4 => {
                strategic.castling[WHITE_KING_SIDE] = false;
                strategic.castling[WHITE_QUEEN_SIDE] = false;
            }
            7 => strategic.castling[WHITE_KING_SIDE] = false,
            0 => strategic.castling[WHITE_QUEEN_SIDE] = false,
            60 => {
                strategic.castling[BLACK_KING_SIDE] = false;
                strategic.castling[BLACK_QUEEN_SIDE] = false;
            }
            63 => strategic.castling[BLACK_KING_SIDE] = false,
            56 => strategic.castling[BLACK_QUEEN_SIDE] = false,
            _ => {}
        }
    }
}
