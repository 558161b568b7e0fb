//! Depth-limited alpha-beta minimax.
//!
//! White maximizes and Black minimizes over the single White-positive
//! evaluation. Child positions are reached by cloning the board; dropping
//! the clone is the undo. The transposition-aware variant consults and
//! feeds the shared table, the plain variant is the deterministic baseline.

use crate::board::{Board, Color};
use crate::errors::EngineError;
use crate::eval;
use crate::hashing::{NodeType, Transposition};
use crate::movegen::MoveBuf;
use crate::moves::Move;
use crate::search::diagnostics::Diagnostics;
use crate::search::ordering;
use crate::search::stop::StopControl;

/// Plain alpha-beta to `depth` plies. Returns the White-positive score of
/// the subtree under `board`.
pub fn to_depth(
    board: &Board,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    diag: &Diagnostics,
) -> i32 {
    diag.count_node();
    if depth == 0 {
        diag.count_evaluation();
        return eval::evaluate(board);
    }

    let mut moves = board.legal_moves();
    if moves.is_empty() {
        diag.count_evaluation();
        return eval::no_moves_score(board, depth as i32);
    }
    ordering::sort_by_guess(board, &mut moves);

    if maximizing {
        let mut value = i32::MIN;
        for mv in &moves {
            let child = board.make_child(mv);
            value = value.max(to_depth(&child, depth - 1, alpha, beta, false, diag));
            if value >= beta {
                diag.count_beta_cutoff();
                break;
            }
            alpha = alpha.max(value);
        }
        value
    } else {
        let mut value = i32::MAX;
        for mv in &moves {
            let child = board.make_child(mv);
            value = value.min(to_depth(&child, depth - 1, alpha, beta, true, diag));
            if value <= alpha {
                diag.count_alpha_cutoff();
                break;
            }
            beta = beta.min(value);
        }
        value
    }
}

/// Alpha-beta with transposition probing and storing.
pub fn to_depth_with_tt(
    board: &Board,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    diag: &Diagnostics,
) -> i32 {
    diag.count_node();
    let transpositions = &board.shared().transpositions;
    let hash = board.hash();

    let mut hash_move = None;
    if let Some(entry) = transpositions.probe(hash) {
        hash_move = entry.best_move;
        if entry.depth >= depth {
            match entry.node_type {
                NodeType::Exact => return entry.score,
                NodeType::LowerBound => {
                    if entry.score >= beta {
                        return entry.score;
                    }
                    alpha = alpha.max(entry.score);
                }
                NodeType::UpperBound => {
                    if entry.score <= alpha {
                        return entry.score;
                    }
                    beta = beta.min(entry.score);
                }
            }
        }
    }

    if depth == 0 {
        diag.count_evaluation();
        return eval::evaluate(board);
    }

    let mut moves = board.legal_moves();
    if moves.is_empty() {
        diag.count_evaluation();
        return eval::no_moves_score(board, depth as i32);
    }
    ordering::sort_by_guess(board, &mut moves);
    if let Some(hm) = hash_move {
        if let Some(pos) = moves.iter().position(|m| *m == hm) {
            moves.swap(0, pos);
        }
    }

    let alpha_in = alpha;
    let beta_in = beta;
    let mut best_move = None;
    let value = if maximizing {
        let mut value = i32::MIN;
        for mv in &moves {
            let child = board.make_child(mv);
            let score = to_depth_with_tt(&child, depth - 1, alpha, beta, false, diag);
            if score > value {
                value = score;
                best_move = Some(*mv);
            }
            if value >= beta {
                diag.count_beta_cutoff();
                break;
            }
            alpha = alpha.max(value);
        }
        value
    } else {
        let mut value = i32::MAX;
        for mv in &moves {
            let child = board.make_child(mv);
            let score = to_depth_with_tt(&child, depth - 1, alpha, beta, true, diag);
            if score < value {
                value = score;
                best_move = Some(*mv);
            }
            if value <= alpha {
                diag.count_alpha_cutoff();
                break;
            }
            beta = beta.min(value);
        }
        value
    };

    let node_type = if value <= alpha_in {
        NodeType::UpperBound
    } else if value >= beta_in {
        NodeType::LowerBound
    } else {
        NodeType::Exact
    };
    transpositions.store(Transposition {
        hash,
        depth,
        score: value,
        best_move,
        node_type,
        turn: board.strategic.turn_count,
    });

    value
}

/// Evaluate each root move to `depth` and pick the best for the side to
/// move. Cancellation discards the whole pass: the caller either falls
/// back to an earlier depth or reports a timeout.
pub fn search_root(
    board: &Board,
    moves: &MoveBuf,
    depth: u8,
    use_transpositions: bool,
    diag: &Diagnostics,
    stop: &StopControl,
) -> Result<(Move, i32), EngineError> {
    let maximizing = board.side_to_move() == Color::White;
    let mut alpha = i32::MIN;
    let mut beta = i32::MAX;
    let mut best: Option<(Move, i32)> = None;

    for mv in moves {
        if stop.should_stop() {
            return Err(EngineError::Timeout);
        }
        let child = board.make_child(mv);
        let score = if use_transpositions {
            to_depth_with_tt(&child, depth - 1, alpha, beta, !maximizing, diag)
        } else {
            to_depth(&child, depth - 1, alpha, beta, !maximizing, diag)
        };
        let better = match &best {
            None => true,
            Some((_, best_score)) => {
                if maximizing {
                    score > *best_score
                } else {
                    score < *best_score
                }
            }
        };
        if better {
            best = Some((*mv, score));
        }
        if maximizing {
            alpha = alpha.max(score);
        } else {
            beta = beta.min(score);
        }
    }
    best.ok_or(EngineError::EmptyMoveSet)
}

/// Score every root move without a pruning window, for iterative
/// deepening's full reordering between depths.
pub fn score_root_moves(
    board: &Board,
    moves: &MoveBuf,
    depth: u8,
    use_transpositions: bool,
    diag: &Diagnostics,
    stop: &StopControl,
) -> Result<Vec<(Move, i32)>, EngineError> {
    let maximizing = board.side_to_move() == Color::White;
    let mut scored = Vec::with_capacity(moves.len());
    for mv in moves {
        if stop.should_stop() {
            return Err(EngineError::Timeout);
        }
        let child = board.make_child(mv);
        let score = if use_transpositions {
            to_depth_with_tt(&child, depth - 1, i32::MIN, i32::MAX, !maximizing, diag)
        } else {
            to_depth(&child, depth - 1, i32::MIN, i32::MAX, !maximizing, diag)
        };
        scored.push((*mv, score));
    }
    if maximizing {
        scored.sort_by_key(|(_, score)| -score);
    } else {
        scored.sort_by_key(|(_, score)| *score);
    }
    Ok(scored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::is_mate_score;
    use crate::square;

    fn sq(name: &str) -> u8 {
        square::parse(name).unwrap()
    }

    #[test]
    fn test_finds_hanging_queen() {
        // white rook takes the queen on d4
        let board = Board::from_fen("4k3/8/8/8/3q4/8/3R4/4K3 w - - 0 1").unwrap();
        let diag = Diagnostics::new();
        let moves = board.legal_moves();
        let (best, score) =
            search_root(&board, &moves, 3, false, &diag, &StopControl::none()).unwrap();
        assert_eq!(best, Move::capture(sq("d2"), sq("d4")));
        assert!(score > 300, "winning the queen should show: {}", score);
    }

    #[test]
    fn test_mated_position_scores_against_the_mover() {
        let board =
            Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 0 3")
                .unwrap();
        let diag = Diagnostics::new();
        let score = to_depth(&board, 2, i32::MIN, i32::MAX, true, &diag);
        assert!(is_mate_score(score));
        assert!(score < 0, "white is mated, got {}", score);
    }

    #[test]
    fn test_plain_and_tt_agree() {
        let board = Board::from_fen("4k3/8/8/8/3q4/8/3R4/4K3 w - - 0 1").unwrap();
        let diag = Diagnostics::new();
        let moves = board.legal_moves();

        let (plain_move, plain_score) =
            search_root(&board, &moves, 3, false, &diag, &StopControl::none()).unwrap();
        let (tt_move, tt_score) =
            search_root(&board, &moves, 3, true, &diag, &StopControl::none()).unwrap();

        assert_eq!(plain_move, tt_move);
        assert_eq!(plain_score, tt_score);
        assert!(board.shared().transpositions.len() > 0);
    }

    #[test]
    fn test_repeat_search_hits_the_table() {
        let board = Board::start_position();
        let diag = Diagnostics::new();
        let moves = board.legal_moves();

        search_root(&board, &moves, 3, true, &diag, &StopControl::none()).unwrap();
        let hits_before = board.shared().transpositions.hits();
        search_root(&board, &moves, 3, true, &diag, &StopControl::none()).unwrap();
        assert!(
            board.shared().transpositions.hits() > hits_before,
            "second pass should reuse stored positions"
        );
    }

    #[test]
    fn test_stop_control_aborts_root() {
        let board = Board::start_position();
        let diag = Diagnostics::new();
        let moves = board.legal_moves();
        let stop = StopControl::none().with_budget(std::time::Duration::ZERO);
        let result = search_root(&board, &moves, 3, false, &diag, &stop);
        assert!(matches!(result, Err(EngineError::Timeout)));
    }

    #[test]
    fn test_deterministic_across_runs() {
        let board = Board::from_fen(
            "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 0 4",
        )
        .unwrap();
        let diag = Diagnostics::new();
        let moves = board.legal_moves();
        let first = search_root(&board, &moves, 3, false, &diag, &StopControl::none()).unwrap();
        let second = search_root(&board, &moves, 3, false, &diag, &StopControl::none()).unwrap();
        assert_eq!(first, second);
    }
}
