//! A best-move chess engine.
//!
//! Positions are value types: searching a move clones the [`board::Board`]
//! and plays the move on the clone, so there is no unmake and parallel
//! workers never share mutable position state. Legality comes from
//! per-side attack caches that are updated incrementally as moves execute.
//! On top sit a zobrist-keyed transposition table and an alpha-beta
//! search with iterative deepening and an optional parallel root split.
//!
//! ```
//! use vanguard::board::Board;
//! use vanguard::search::{find_best_move, SearchOptions};
//!
//! let board = Board::start_position();
//! let outcome = find_best_move(&board, &SearchOptions { depth: 3, ..Default::default() })?;
//! println!("{}", outcome.best);
//! # Ok::<(), vanguard::errors::EngineError>(())
//! ```

pub mod attacks;
pub mod board;
pub mod errors;
pub mod eval;
pub mod hashing;
pub mod interfaces;
pub mod movegen;
pub mod moves;
pub mod search;
pub mod square;
pub mod tables;

pub use board::Board;
pub use errors::EngineError;
pub use moves::Move;
pub use search::{find_best_move, find_best_move_with, SearchOptions, SearchOutcome};
