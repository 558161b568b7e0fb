use crate::hashing::TranspositionTable;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Search counters, threaded through every search call as a shared
/// reference. Atomics keep them accurate across parallel root workers
/// without any global state.
#[derive(Debug, Default)]
pub struct Diagnostics {
    nodes: AtomicU64,
    evaluations: AtomicU64,
    alpha_cutoffs: AtomicU64,
    beta_cutoffs: AtomicU64,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn count_node(&self) {
        self.nodes.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn count_evaluation(&self) {
        self.evaluations.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn count_alpha_cutoff(&self) {
        self.alpha_cutoffs.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn count_beta_cutoff(&self) {
        self.beta_cutoffs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn nodes(&self) -> u64 {
        self.nodes.load(Ordering::Relaxed)
    }

    pub fn report(
        &self,
        elapsed: Duration,
        depth_reached: u8,
        transpositions: Option<&TranspositionTable>,
    ) -> DiagnosticsReport {
        DiagnosticsReport {
            nodes: self.nodes.load(Ordering::Relaxed),
            evaluations: self.evaluations.load(Ordering::Relaxed),
            alpha_cutoffs: self.alpha_cutoffs.load(Ordering::Relaxed),
            beta_cutoffs: self.beta_cutoffs.load(Ordering::Relaxed),
            elapsed,
            depth_reached,
            transposition_hits: transpositions.map_or(0, |t| t.hits()),
            transposition_misses: transpositions.map_or(0, |t| t.misses()),
        }
    }
}

/// Snapshot of the counters returned with a search result.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticsReport {
    pub nodes: u64,
    pub evaluations: u64,
    pub alpha_cutoffs: u64,
    pub beta_cutoffs: u64,
    pub elapsed: Duration,
    pub depth_reached: u8,
    pub transposition_hits: u64,
    pub transposition_misses: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let diag = Diagnostics::new();
        diag.count_node();
        diag.count_node();
        diag.count_evaluation();
        diag.count_beta_cutoff();

        let report = diag.report(Duration::from_millis(5), 3, None);
        assert_eq!(report.nodes, 2);
        assert_eq!(report.evaluations, 1);
        assert_eq!(report.beta_cutoffs, 1);
        assert_eq!(report.alpha_cutoffs, 0);
        assert_eq!(report.depth_reached, 3);
    }
}
