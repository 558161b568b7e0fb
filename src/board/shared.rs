use crate::hashing::TranspositionTable;

/// Search-wide state shared by every position branched from one root.
///
/// Cloning a board only bumps the `Arc` refcount, so the whole search tree
/// and all parallel root workers see the same transposition table.
#[derive(Debug, Default)]
pub struct SharedData {
    pub transpositions: TranspositionTable,
}

impl SharedData {
    pub fn new() -> Self {
        Self::default()
    }
}
