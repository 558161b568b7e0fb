//! Iterative deepening.
//!
//! Depths are searched in increasing order and each completed depth
//! reorders the root moves for the next one. Cancellation is only honored
//! between root moves, and a cancelled depth is discarded wholesale: the
//! verdict of the last completed depth stands.

use crate::board::Board;
use crate::errors::EngineError;
use crate::movegen::MoveBuf;
use crate::moves::Move;
use crate::search::diagnostics::Diagnostics;
use crate::search::minimax;
use crate::search::ordering;
use crate::search::stop::StopControl;
use std::time::Instant;

/// First depth searched; shallower passes cost more in ordering churn
/// than they save.
pub const INITIAL_DEPTH: u8 = 2;

/// Outcome of a deepening run.
#[derive(Debug, Clone, Copy)]
pub struct DeepeningResult {
    pub best: Move,
    pub score: i32,
    pub depth_reached: u8,
}

/// Deepen from [`INITIAL_DEPTH`] to `target_depth`. `moves` should arrive
/// pre-ordered; it is reordered in place after every completed depth.
pub fn deepen(
    board: &Board,
    moves: &mut MoveBuf,
    target_depth: u8,
    use_transpositions: bool,
    diag: &Diagnostics,
    stop: &StopControl,
) -> Result<DeepeningResult, EngineError> {
    if moves.is_empty() {
        return Err(EngineError::EmptyMoveSet);
    }
    let started = Instant::now();
    let mut settled: Option<DeepeningResult> = None;

    let first = INITIAL_DEPTH.min(target_depth).max(1);
    for depth in first..=target_depth {
        match minimax::score_root_moves(board, moves, depth, use_transpositions, diag, stop) {
            Ok(scored) => {
                let (best, score) = scored[0];
                let ranked: Vec<Move> = scored.iter().map(|(mv, _)| *mv).collect();
                ordering::apply_ranking(moves, &ranked);
                settled = Some(DeepeningResult {
                    best,
                    score,
                    depth_reached: depth,
                });
                log::info!(
                    "info depth {} score cp {} nodes {} time {}ms",
                    depth,
                    score,
                    diag.nodes(),
                    started.elapsed().as_millis()
                );
            }
            Err(EngineError::Timeout) => {
                log::info!("depth {} cancelled, keeping depth {}", depth, depth - 1);
                break;
            }
            Err(e) => return Err(e),
        }
        if stop.should_stop() {
            break;
        }
    }
    settled.ok_or(EngineError::Timeout)
}
