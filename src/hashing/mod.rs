pub mod transposition;
pub mod zobrist;

pub use transposition::{NodeType, Transposition, TranspositionTable};
