//! Best-move controller.
//!
//! Owns the full decision pipeline for one move: table upkeep, opening
//! book, shallow mate probes, root ordering, then dispatch to whichever
//! search variant the options select.

use crate::board::{Board, Color};
use crate::errors::EngineError;
use crate::interfaces::{OpeningBook, ReplaySink};
use crate::moves::Move;
use crate::search::diagnostics::{Diagnostics, DiagnosticsReport};
use crate::search::stop::StopControl;
use crate::search::{iterative, mate, minimax, ordering, parallel};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Knobs for a single best-move request.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Target depth in plies.
    pub depth: u8,
    pub use_transpositions: bool,
    pub use_iterative_deepening: bool,
    pub use_parallel: bool,
    /// Order root moves by a one-ply evaluation instead of the cheap
    /// guess weight.
    pub full_ordering: bool,
    /// Table entries older than this many game turns are purged before
    /// searching.
    pub staleness_window: u32,
    pub time_budget: Option<Duration>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            depth: 5,
            use_transpositions: true,
            use_iterative_deepening: true,
            use_parallel: false,
            full_ordering: false,
            staleness_window: 8,
            time_budget: None,
        }
    }
}

/// The chosen move plus everything measured while choosing it.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub best: Move,
    pub score: i32,
    pub diagnostics: DiagnosticsReport,
}

/// Optional collaborators threaded through a request.
#[derive(Default)]
pub struct Collaborators<'a> {
    pub book: Option<&'a dyn OpeningBook>,
    pub replay: Option<&'a mut dyn ReplaySink>,
    pub stop: Option<Arc<AtomicBool>>,
}

impl<'a> Collaborators<'a> {
    pub fn none() -> Self {
        Self::default()
    }
}

pub fn find_best_move(board: &Board, options: &SearchOptions) -> Result<SearchOutcome, EngineError> {
    find_best_move_with(board, options, Collaborators::none())
}

pub fn find_best_move_with(
    board: &Board,
    options: &SearchOptions,
    mut collaborators: Collaborators<'_>,
) -> Result<SearchOutcome, EngineError> {
    let started = Instant::now();
    let depth = options.depth.max(1);
    let diag = Diagnostics::new();
    let transpositions = &board.shared().transpositions;

    if options.use_transpositions {
        let purged =
            transpositions.purge_stale(board.strategic.turn_count, options.staleness_window);
        if purged > 0 {
            log::debug!("purged {} stale transpositions", purged);
        }
    }

    let mut moves = board.legal_moves();
    if moves.is_empty() {
        return Err(EngineError::EmptyMoveSet);
    }

    if let Some(book) = collaborators.book {
        if let Some(reply) = book.probe(board) {
            log::info!("book move {}", reply);
            let outcome = SearchOutcome {
                best: reply,
                score: 0,
                diagnostics: diag.report(started.elapsed(), 0, None),
            };
            if let Some(replay) = collaborators.replay.as_mut() {
                replay.record(board, &outcome.best, &outcome.diagnostics);
            }
            return Ok(outcome);
        }
    }

    let mut stop = StopControl::none();
    if let Some(token) = collaborators.stop.clone() {
        stop = stop.with_token(token);
    }
    if let Some(budget) = options.time_budget {
        stop = stop.with_budget(budget);
    }

    // forced mates skip the search entirely
    if let Some(finisher) = mate::immediate_mate(board, &moves) {
        return finish(board, finisher, 1, &diag, started, depth, &mut collaborators);
    }
    if depth >= 4 {
        let candidates = mate::mate_in_two_candidates(board, &moves);
        match candidates.len() {
            0 => {}
            1 => {
                return finish(board, candidates[0], 3, &diag, started, depth, &mut collaborators)
            }
            _ => {
                // several moves force the mate; a short search picks the
                // strongest continuation among them
                let (best, score) = minimax::search_root(
                    board,
                    &candidates,
                    4,
                    options.use_transpositions,
                    &diag,
                    &stop,
                )?;
                return finish_at(
                    board,
                    best,
                    score,
                    &diag,
                    started,
                    4,
                    &mut collaborators,
                    options,
                );
            }
        }
    }

    let maximizing = board.side_to_move() == Color::White;
    if options.full_ordering {
        ordering::sort_by_evaluation(board, &mut moves, maximizing, &diag);
    } else {
        ordering::sort_by_guess(board, &mut moves);
    }

    let deepening = options.use_iterative_deepening && depth >= 3;
    let (best, score, depth_reached) = if options.use_parallel {
        let (best, score) = parallel::search_root(board, &moves, depth, &diag, &stop)?;
        (best, score, depth)
    } else if deepening {
        let result = iterative::deepen(
            board,
            &mut moves,
            depth,
            options.use_transpositions,
            &diag,
            &stop,
        )?;
        (result.best, result.score, result.depth_reached)
    } else {
        let (best, score) =
            minimax::search_root(board, &moves, depth, options.use_transpositions, &diag, &stop)?;
        (best, score, depth)
    };

    finish_at(board, best, score, &diag, started, depth_reached, &mut collaborators, options)
}

fn finish(
    board: &Board,
    best: Move,
    mate_in_plies: i32,
    diag: &Diagnostics,
    started: Instant,
    depth: u8,
    collaborators: &mut Collaborators<'_>,
) -> Result<SearchOutcome, EngineError> {
    let magnitude = crate::eval::CHECKMATE_SCORE + depth as i32 - mate_in_plies;
    let signed = if board.side_to_move() == Color::White {
        magnitude
    } else {
        -magnitude
    };
    let outcome = SearchOutcome {
        best,
        score: signed,
        diagnostics: diag.report(started.elapsed(), depth, None),
    };
    if let Some(replay) = collaborators.replay.as_mut() {
        replay.record(board, &outcome.best, &outcome.diagnostics);
    }
    Ok(outcome)
}

#[allow(clippy::too_many_arguments)]
fn finish_at(
    board: &Board,
    mut best: Move,
    score: i32,
    diag: &Diagnostics,
    started: Instant,
    depth_reached: u8,
    collaborators: &mut Collaborators<'_>,
    options: &SearchOptions,
) -> Result<SearchOutcome, EngineError> {
    let child = board.make_child(&best);
    best.check = child.is_check_against(child.side_to_move());
    best.checkmate = child.is_checkmate();

    let transpositions = options
        .use_transpositions
        .then(|| &board.shared().transpositions);
    let outcome = SearchOutcome {
        best,
        score,
        diagnostics: diag.report(started.elapsed(), depth_reached, transpositions),
    };
    log::info!(
        "best {} score {} depth {} nodes {} in {}ms",
        outcome.best,
        outcome.score,
        depth_reached,
        outcome.diagnostics.nodes,
        outcome.diagnostics.elapsed.as_millis()
    );
    if let Some(replay) = collaborators.replay.as_mut() {
        replay.record(board, &outcome.best, &outcome.diagnostics);
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::{MoveLog, StaticOpeningBook};
    use crate::square;

    fn sq(name: &str) -> u8 {
        square::parse(name).unwrap()
    }

    fn shallow() -> SearchOptions {
        SearchOptions {
            depth: 3,
            use_iterative_deepening: false,
            use_transpositions: false,
            ..SearchOptions::default()
        }
    }

    #[test]
    fn test_hanging_queen_is_taken() {
        let board = Board::from_fen("4k3/8/8/8/3q4/8/3R4/4K3 w - - 0 1").unwrap();
        let outcome = find_best_move(&board, &shallow()).unwrap();
        assert_eq!(outcome.best, Move::capture(sq("d2"), sq("d4")));
        assert!(outcome.diagnostics.nodes > 0);
    }

    #[test]
    fn test_mate_in_one_is_flagged() {
        let board = Board::from_fen("2r4k/1r6/8/8/8/K7/8/8 b - - 0 1").unwrap();
        let outcome = find_best_move(&board, &shallow()).unwrap();
        assert_eq!(outcome.best, Move::new(sq("c8"), sq("a8")));
        assert!(outcome.best.checkmate);
    }

    #[test]
    fn test_no_moves_is_an_error() {
        let board = Board::from_fen("7k/8/5KQ1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(matches!(
            find_best_move(&board, &shallow()),
            Err(EngineError::EmptyMoveSet)
        ));
    }

    #[test]
    fn test_book_move_short_circuits() {
        let board = Board::start_position();
        let mut book = StaticOpeningBook::new();
        book.insert(&board, Move::new(sq("e2"), sq("e4")));

        let outcome = find_best_move_with(
            &board,
            &shallow(),
            Collaborators {
                book: Some(&book),
                ..Collaborators::none()
            },
        )
        .unwrap();
        assert_eq!(outcome.best, Move::new(sq("e2"), sq("e4")));
        assert_eq!(outcome.diagnostics.nodes, 0);
    }

    #[test]
    fn test_replay_sink_sees_the_result() {
        let board = Board::start_position();
        let mut log = MoveLog::default();
        find_best_move_with(
            &board,
            &shallow(),
            Collaborators {
                replay: Some(&mut log),
                ..Collaborators::none()
            },
        )
        .unwrap();
        assert_eq!(log.entries.len(), 1);
    }

    #[test]
    fn test_zero_budget_times_out() {
        let board = Board::start_position();
        let options = SearchOptions {
            time_budget: Some(Duration::ZERO),
            ..shallow()
        };
        assert!(matches!(
            find_best_move(&board, &options),
            Err(EngineError::Timeout)
        ));
    }

    #[test]
    fn test_parallel_respects_the_time_budget() {
        let board = Board::start_position();
        let options = SearchOptions {
            depth: 3,
            use_parallel: true,
            time_budget: Some(Duration::ZERO),
            ..SearchOptions::default()
        };
        assert!(matches!(
            find_best_move(&board, &options),
            Err(EngineError::Timeout)
        ));
    }

    #[test]
    fn test_variants_agree_on_a_tactic() {
        let fen = "4k3/8/8/8/3q4/8/3R4/4K3 w - - 0 1";
        let expected = Move::capture(sq("d2"), sq("d4"));

        for options in [
            SearchOptions {
                depth: 3,
                use_transpositions: false,
                use_iterative_deepening: false,
                ..SearchOptions::default()
            },
            SearchOptions {
                depth: 3,
                use_transpositions: true,
                use_iterative_deepening: false,
                ..SearchOptions::default()
            },
            SearchOptions {
                depth: 4,
                use_transpositions: true,
                use_iterative_deepening: true,
                ..SearchOptions::default()
            },
            SearchOptions {
                depth: 3,
                use_parallel: true,
                ..SearchOptions::default()
            },
        ] {
            let board = Board::from_fen(fen).unwrap();
            let outcome = find_best_move(&board, &options).unwrap();
            assert_eq!(outcome.best, expected, "options {:?}", options);
        }
    }

    #[test]
    fn test_mate_in_two_short_circuits_at_depth() {
        let board = Board::from_fen("7k/1rr5/8/8/8/K7/8/8 b - - 0 1").unwrap();
        let options = SearchOptions {
            depth: 4,
            ..SearchOptions::default()
        };
        let outcome = find_best_move(&board, &options).unwrap();
        // whichever way white wriggles, a mate follows on the next move
        let child = board.make_child(&outcome.best);
        let replies = child.legal_moves();
        assert!(!replies.is_empty());
        for reply in &replies {
            let grandchild = child.make_child(reply);
            let finishers = grandchild.legal_moves();
            assert!(crate::search::mate::immediate_mate(&grandchild, &finishers).is_some());
        }
        assert!(outcome.score < 0, "black is winning");
        assert!(
            crate::eval::is_mate_score(outcome.score),
            "forced mate must carry a mate score, got {}",
            outcome.score
        );
    }
}
