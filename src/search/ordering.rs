//! Root and node move ordering.
//!
//! Two tiers: a cheap guess weight applied at every node, and a full
//! one-ply evaluation sort that callers can opt into at the root. Good
//! ordering front-loads the cutoffs; it never changes which move is best.

use crate::board::{Board, PieceKind};
use crate::eval;
use crate::movegen::MoveBuf;
use crate::moves::Move;
use crate::search::diagnostics::Diagnostics;

/// Cheap ordering heuristic: capture value minus a fraction of the
/// attacker value, plus bonuses for promotions and castling.
pub fn guess_weight(board: &Board, mv: &Move) -> i32 {
    let mut weight = 0;

    if let Some(victim) = board.piece_at(mv.to) {
        let attacker = board
            .piece_at(mv.from)
            .map_or(0, |p| p.kind.base_strength());
        weight += 10_000 + victim.kind.base_strength() - attacker / 10;
    }
    if mv.en_passant {
        weight += 10_000 + PieceKind::Pawn.base_strength();
    }
    if let Some(kind) = mv.promotion {
        weight += 9_000 + kind.base_strength();
    }
    if mv.castling {
        weight += 500;
    }
    weight
}

/// Sort moves best-first by the guess weight.
pub fn sort_by_guess(board: &Board, moves: &mut MoveBuf) {
    moves.sort_by_key(|mv| -guess_weight(board, mv));
}

/// Sort moves by evaluating each child position one ply deep. Much more
/// expensive than the guess weight; used at the root when full ordering is
/// requested.
pub fn sort_by_evaluation(board: &Board, moves: &mut MoveBuf, maximizing: bool, diag: &Diagnostics) {
    let mut scored: Vec<(i32, Move)> = moves
        .iter()
        .map(|mv| {
            diag.count_evaluation();
            (eval::evaluate(&board.make_child(mv)), *mv)
        })
        .collect();
    if maximizing {
        scored.sort_by_key(|(score, _)| -score);
    } else {
        scored.sort_by_key(|(score, _)| *score);
    }
    moves.clear();
    moves.extend(scored.into_iter().map(|(_, mv)| mv));
}

/// Reorder `moves` so that entries appear in the order given by `ranked`.
/// Used by iterative deepening to seed each depth with the previous
/// depth's verdict.
pub fn apply_ranking(moves: &mut MoveBuf, ranked: &[Move]) {
    let mut reordered = MoveBuf::new();
    for mv in ranked {
        if let Some(found) = moves.iter().find(|m| *m == mv) {
            reordered.push(*found);
        }
    }
    for mv in moves.iter() {
        if !reordered.contains(mv) {
            reordered.push(*mv);
        }
    }
    *moves = reordered;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square;

    fn sq(name: &str) -> u8 {
        square::parse(name).unwrap()
    }

    #[test]
    fn test_captures_sort_first() {
        // white queen can capture the hanging rook on e5
        let board = Board::from_fen("4k3/8/8/4r3/8/8/4Q3/4K3 w - - 0 1").unwrap();
        let mut moves = board.legal_moves();
        sort_by_guess(&board, &mut moves);
        assert_eq!(moves[0], Move::capture(sq("e2"), sq("e5")));
    }

    #[test]
    fn test_valuable_victims_sort_before_cheap_ones() {
        // knight can take either the queen on d5 or the pawn on f5
        let board = Board::from_fen("4k3/8/8/3q1p2/8/4N3/8/4K3 w - - 0 1").unwrap();
        let mut moves = board.legal_moves();
        sort_by_guess(&board, &mut moves);
        assert_eq!(moves[0], Move::capture(sq("e3"), sq("d5")));
    }

    #[test]
    fn test_full_sort_agrees_with_evaluation() {
        let board = Board::from_fen("4k3/8/8/4r3/8/8/4Q3/4K3 w - - 0 1").unwrap();
        let diag = Diagnostics::new();
        let mut moves = board.legal_moves();
        sort_by_evaluation(&board, &mut moves, true, &diag);
        assert_eq!(moves[0], Move::capture(sq("e2"), sq("e5")));
        assert!(diag.report(std::time::Duration::ZERO, 1, None).evaluations > 0);
    }

    #[test]
    fn test_apply_ranking_preserves_set() {
        let board = Board::start_position();
        let mut moves = board.legal_moves();
        let count = moves.len();
        let ranked = vec![Move::new(sq("e2"), sq("e4")), Move::new(sq("g1"), sq("f3"))];
        apply_ranking(&mut moves, &ranked);
        assert_eq!(moves.len(), count);
        assert_eq!(moves[0], ranked[0]);
        assert_eq!(moves[1], ranked[1]);
    }
}
