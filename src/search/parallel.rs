//! Parallel root split.
//!
//! Each root move gets its own full-window alpha-beta subtree on the rayon
//! pool. The subtrees do not share a window, so this searches more nodes
//! than the sequential variant but returns the identical best score.

use crate::board::{Board, Color};
use crate::errors::EngineError;
use crate::movegen::MoveBuf;
use crate::moves::Move;
use crate::search::diagnostics::Diagnostics;
use crate::search::minimax;
use crate::search::stop::StopControl;
use rayon::prelude::*;

pub fn search_root(
    board: &Board,
    moves: &MoveBuf,
    depth: u8,
    diag: &Diagnostics,
    stop: &StopControl,
) -> Result<(Move, i32), EngineError> {
    if moves.is_empty() {
        return Err(EngineError::EmptyMoveSet);
    }
    let maximizing = board.side_to_move() == Color::White;
    log::debug!(
        "splitting {} root moves across {} cores",
        moves.len(),
        num_cpus::get()
    );

    let scored: Vec<(Move, i32)> = moves
        .par_iter()
        .map(|mv| {
            if stop.should_stop() {
                return Err(EngineError::Timeout);
            }
            let child = board.make_child(mv);
            let score = minimax::to_depth(&child, depth - 1, i32::MIN, i32::MAX, !maximizing, diag);
            Ok((*mv, score))
        })
        .collect::<Result<_, _>>()?;

    // sequential reduce keeps tie-breaking deterministic in move order
    let mut best = scored[0];
    for candidate in &scored[1..] {
        let better = if maximizing {
            candidate.1 > best.1
        } else {
            candidate.1 < best.1
        };
        if better {
            best = *candidate;
        }
    }
    Ok(best)
}
