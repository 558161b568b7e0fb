//! Command line demo: print the best move for a position.
//!
//! ```text
//! bestmove [depth] [FEN]
//! ```
//!
//! With no FEN the starting position is searched. Set `RUST_LOG=info` to
//! watch the per-depth progress.

use std::env;
use std::process::ExitCode;
use vanguard::board::Board;
use vanguard::search::{find_best_move, SearchOptions};

fn main() -> ExitCode {
    env_logger::init();

    let mut args = env::args().skip(1);
    let depth = match args.next() {
        Some(raw) => match raw.parse::<u8>() {
            Ok(d) if d > 0 => d,
            _ => {
                eprintln!("depth must be a positive integer, got {:?}", raw);
                return ExitCode::FAILURE;
            }
        },
        None => SearchOptions::default().depth,
    };
    let fen: Vec<String> = args.collect();

    let board = if fen.is_empty() {
        Board::start_position()
    } else {
        match Board::from_fen(&fen.join(" ")) {
            Ok(board) => board,
            Err(e) => {
                eprintln!("bad position: {}", e);
                return ExitCode::FAILURE;
            }
        }
    };

    let options = SearchOptions {
        depth,
        ..SearchOptions::default()
    };
    match find_best_move(&board, &options) {
        Ok(outcome) => {
            println!("bestmove {}", outcome.best);
            println!(
                "score {} depth {} nodes {} evals {} tt-hits {} in {}ms",
                outcome.score,
                outcome.diagnostics.depth_reached,
                outcome.diagnostics.nodes,
                outcome.diagnostics.evaluations,
                outcome.diagnostics.transposition_hits,
                outcome.diagnostics.elapsed.as_millis()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("search failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
