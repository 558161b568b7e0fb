//! Shallow forced-mate probes, run before the main search.

use crate::board::Board;
use crate::movegen::MoveBuf;
use crate::moves::Move;

/// A move that checkmates on the spot, if one exists.
pub fn immediate_mate(board: &Board, moves: &MoveBuf) -> Option<Move> {
    for mv in moves {
        let child = board.make_child(mv);
        if child.is_checkmate() {
            let mut found = *mv;
            found.check = true;
            found.checkmate = true;
            return Some(found);
        }
    }
    None
}

/// All moves after which every opponent reply allows an immediate mate.
/// Several moves can force the same mate; the caller decides between
/// them.
pub fn mate_in_two_candidates(board: &Board, moves: &MoveBuf) -> MoveBuf {
    let mut candidates = MoveBuf::new();
    for mv in moves {
        let child = board.make_child(mv);
        let replies = child.legal_moves();
        if replies.is_empty() {
            // mate or stalemate on the spot, not a mate in two
            continue;
        }
        let all_lost = replies.iter().all(|reply| {
            let grandchild = child.make_child(reply);
            let finishers = grandchild.legal_moves();
            immediate_mate(&grandchild, &finishers).is_some()
        });
        if all_lost {
            candidates.push(*mv);
        }
    }
    candidates
}

/// First move that forces mate on the following turn, if any.
pub fn mate_in_two(board: &Board, moves: &MoveBuf) -> Option<Move> {
    mate_in_two_candidates(board, moves).first().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square;

    fn sq(name: &str) -> u8 {
        square::parse(name).unwrap()
    }

    #[test]
    fn test_back_rank_mate_in_one() {
        // black rooks on the seventh and eighth files, Rc8-a8 mates
        let board = Board::from_fen("2r4k/1r6/8/8/8/K7/8/8 b - - 0 1").unwrap();
        let moves = board.legal_moves();
        let found = immediate_mate(&board, &moves).unwrap();
        assert_eq!(found, Move::new(sq("c8"), sq("a8")));
        assert!(found.checkmate);
    }

    #[test]
    fn test_no_mate_in_quiet_position() {
        let board = Board::start_position();
        let moves = board.legal_moves();
        assert!(immediate_mate(&board, &moves).is_none());
        assert!(mate_in_two(&board, &moves).is_none());
    }

    #[test]
    fn test_back_rank_mate_in_two() {
        // Rc7-c8 first, then Ra8 mates whichever way the king steps
        let board = Board::from_fen("7k/1rr5/8/8/8/K7/8/8 b - - 0 1").unwrap();
        let moves = board.legal_moves();
        assert!(immediate_mate(&board, &moves).is_none());
        assert!(mate_in_two(&board, &moves).is_some());
    }

    #[test]
    fn test_all_forcing_moves_are_collected() {
        // either rook can lift to the back rank; both force the mate
        let board = Board::from_fen("7k/1rr5/8/8/8/K7/8/8 b - - 0 1").unwrap();
        let moves = board.legal_moves();
        let candidates = mate_in_two_candidates(&board, &moves);
        assert!(candidates.len() >= 2, "found {:?}", candidates);
        for mv in &candidates {
            let child = board.make_child(mv);
            for reply in &child.legal_moves() {
                let grandchild = child.make_child(reply);
                let finishers = grandchild.legal_moves();
                assert!(immediate_mate(&grandchild, &finishers).is_some());
            }
        }
    }
}
