use crate::square::{self, Square};
use std::collections::HashMap;

/// Squares occupied by friendly pieces that are defended by another friendly
/// piece. Sourced from soft-target moves; the enemy king may not capture on
/// a guarded square.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuardedMap {
    by_guard: HashMap<Square, u64>,
}

impl GuardedMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, guard: Square, targets: u64) {
        if targets == 0 {
            self.by_guard.remove(&guard);
        } else {
            self.by_guard.insert(guard, targets);
        }
    }

    pub fn remove(&mut self, guard: Square) {
        self.by_guard.remove(&guard);
    }

    pub fn is_guarded(&self, sq: Square) -> bool {
        let bit = square::bit(sq);
        self.by_guard.values().any(|targets| targets & bit != 0)
    }

    pub fn union(&self) -> u64 {
        self.by_guard.values().fold(0, |acc, t| acc | t)
    }

    /// Guards whose guarded set intersects `squares`.
    pub fn guards_touching(&self, squares: u64) -> smallvec::SmallVec<[Square; 8]> {
        self.by_guard
            .iter()
            .filter(|(_, targets)| *targets & squares != 0)
            .map(|(&guard, _)| guard)
            .collect()
    }

    pub fn clear(&mut self) {
        self.by_guard.clear();
    }
}
