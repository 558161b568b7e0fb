use crate::eval::{adjust_mate_to_even, is_mate_score};
use crate::moves::Move;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Bound classification for a stored score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Position was fully searched within the window.
    Exact,
    /// Beta cutoff: the true score is at least this value.
    LowerBound,
    /// All moves failed low: the true score is at most this value.
    UpperBound,
}

/// One cached search result.
#[derive(Debug, Clone, Copy)]
pub struct Transposition {
    pub hash: u64,
    pub depth: u8,
    pub score: i32,
    pub best_move: Option<Move>,
    pub node_type: NodeType,
    /// Game turn the entry was stored on, for staleness purging.
    pub turn: u32,
}

/// Shared cache of search results keyed by position hash.
///
/// One coarse mutex guards the map; every probe and store holds it for O(1)
/// work, which is short enough that parallel root workers do not contend
/// noticeably. Hit and miss counters are atomics so read statistics never
/// need the lock.
#[derive(Debug)]
pub struct TranspositionTable {
    table: Mutex<HashMap<u64, Transposition>>,
    hits: AtomicU64,
    misses: AtomicU64,
    stores: AtomicU64,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(HashMap::with_capacity(100_000)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            stores: AtomicU64::new(0),
        }
    }

    /// Look up a position. Copies the entry out so the lock is released
    /// before the caller inspects it.
    pub fn probe(&self, hash: u64) -> Option<Transposition> {
        let found = self
            .table
            .lock()
            .expect("transposition table lock poisoned")
            .get(&hash)
            .copied();
        match found {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store a search result.
    ///
    /// An existing entry is only replaced when the new one was searched at
    /// least as deep. Mate scores are normalized to an even magnitude before
    /// storing so entries written at odd and even plies stay comparable.
    pub fn store(&self, mut entry: Transposition) {
        if is_mate_score(entry.score) {
            entry.score = adjust_mate_to_even(entry.score);
        }
        let mut table = self
            .table
            .lock()
            .expect("transposition table lock poisoned");
        match table.get(&entry.hash) {
            Some(existing) if entry.depth < existing.depth => {}
            _ => {
                table.insert(entry.hash, entry);
                self.stores.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Drop entries older than `window` game turns, returning how many
    /// went. Called once per search so the table tracks the game instead
    /// of growing without bound.
    pub fn purge_stale(&self, current_turn: u32, window: u32) -> usize {
        let mut table = self
            .table
            .lock()
            .expect("transposition table lock poisoned");
        let before = table.len();
        table.retain(|_, entry| current_turn.saturating_sub(entry.turn) <= window);
        before - table.len()
    }

    pub fn clear(&self) {
        self.table
            .lock()
            .expect("transposition table lock poisoned")
            .clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.stores.store(0, Ordering::Relaxed);
    }

    pub fn len(&self) -> usize {
        self.table
            .lock()
            .expect("transposition table lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}
