use crate::square::{self, Square};
use smallvec::SmallVec;
use std::collections::HashMap;

/// Attack targets per attacker square.
///
/// Forward map only: the attacker population is at most sixteen entries, so
/// reverse queries (who attacks square X) scan the map instead of keeping a
/// second index in sync.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectAttackMap {
    by_attacker: HashMap<Square, u64>,
}

impl DirectAttackMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the target set of one attacker. An empty set removes the
    /// entry entirely.
    pub fn set(&mut self, attacker: Square, targets: u64) {
        if targets == 0 {
            self.by_attacker.remove(&attacker);
        } else {
            self.by_attacker.insert(attacker, targets);
        }
    }

    pub fn remove(&mut self, attacker: Square) {
        self.by_attacker.remove(&attacker);
    }

    pub fn targets_of(&self, attacker: Square) -> u64 {
        self.by_attacker.get(&attacker).copied().unwrap_or(0)
    }

    /// All attackers whose target set contains `sq`.
    pub fn attackers_of(&self, sq: Square) -> SmallVec<[Square; 4]> {
        let bit = square::bit(sq);
        self.by_attacker
            .iter()
            .filter(|(_, targets)| *targets & bit != 0)
            .map(|(&attacker, _)| attacker)
            .collect()
    }

    pub fn attacks(&self, sq: Square) -> bool {
        let bit = square::bit(sq);
        self.by_attacker.values().any(|targets| targets & bit != 0)
    }

    /// Union of every target set.
    pub fn union(&self) -> u64 {
        self.by_attacker.values().fold(0, |acc, t| acc | t)
    }

    /// Attackers whose target set intersects `squares`.
    pub fn attackers_touching(&self, squares: u64) -> SmallVec<[Square; 8]> {
        self.by_attacker
            .iter()
            .filter(|(_, targets)| *targets & squares != 0)
            .map(|(&attacker, _)| attacker)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Square, u64)> + '_ {
        self.by_attacker.iter().map(|(&sq, &t)| (sq, t))
    }

    pub fn clear(&mut self) {
        self.by_attacker.clear();
    }
}
