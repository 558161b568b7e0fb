//! Static position evaluation.
//!
//! Scores are centipawns from White's point of view: positive favours
//! White, negative favours Black, regardless of whose turn it is. The
//! search layers maximize or minimize over this single convention.

mod tables;

pub use tables::pst_value;

use crate::board::{Board, Color, PieceKind, KING_STRENGTH};
use crate::square;

/// Magnitude of a checkmate score before depth adjustment.
pub const CHECKMATE_SCORE: i32 = KING_STRENGTH;

/// Scores beyond this magnitude can only come from a mate.
pub const CHECKMATE_THRESHOLD: i32 = KING_STRENGTH / 2;

/// Material plus piece-square terms, with king activity folded in once the
/// game is deep enough into the endgame.
pub fn evaluate(board: &Board) -> i32 {
    let weight = board.strategic.end_game_weight;
    let mut score = 0;
    for (color, sign) in [(Color::White, 1), (Color::Black, -1)] {
        for (sq, piece) in board.pieces_of(color) {
            score += sign * (piece.kind.base_strength() + pst_value(piece.kind, sq, color, weight));
        }
    }
    if weight > 0.5 {
        score += king_activity(board, weight);
    }
    score
}

/// Score for a position where the side to move has no legal moves: a mate
/// against the mover, or exactly zero for stalemate.
///
/// Mates found with more depth left are found closer to the root, so the
/// remaining depth is added to the magnitude to prefer the shorter mate.
pub fn no_moves_score(board: &Board, depth_remaining: i32) -> i32 {
    let mover = board.side_to_move();
    if !board.is_check_against(mover) {
        return 0;
    }
    let base = match mover {
        Color::White => -CHECKMATE_SCORE,
        Color::Black => CHECKMATE_SCORE,
    };
    base + base.signum() * depth_remaining.max(0)
}

/// In a won endgame, drive the losing king to the edge and bring the
/// winning king up.
fn king_activity(board: &Board, weight: f64) -> i32 {
    let material: i32 = [(Color::White, 1), (Color::Black, -1)]
        .iter()
        .map(|&(color, sign)| -> i32 {
            board
                .pieces_of(color)
                .filter(|(_, p)| p.kind != PieceKind::King)
                .map(|(_, p)| sign * p.kind.base_strength())
                .sum()
        })
        .sum();
    if material == 0 {
        return 0;
    }
    let (winner, loser) = if material > 0 {
        (Color::White, Color::Black)
    } else {
        (Color::Black, Color::White)
    };
    let (Some(winner_king), Some(loser_king)) =
        (board.king_square(winner), board.king_square(loser))
    else {
        return 0;
    };

    let cornering = 47 * square::centre_distance(loser_king)
        + 16 * (14 - square::manhattan_distance(winner_king, loser_king));
    let scaled = (cornering as f64 * weight) as i32;
    if winner == Color::White {
        scaled
    } else {
        -scaled
    }
}

#[inline]
pub fn is_mate_score(score: i32) -> bool {
    score.abs() > CHECKMATE_THRESHOLD
}

/// Round the depth component of a mate score up to an even value so that
/// entries written at odd and even plies compare consistently.
pub fn adjust_mate_to_even(score: i32) -> i32 {
    if is_mate_score(score) && score.abs() % 2 == 1 {
        score + score.signum()
    } else {
        score
    }
}
