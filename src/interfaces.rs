//! Pluggable collaborators for the search controller.

use crate::board::Board;
use crate::moves::Move;
use crate::search::DiagnosticsReport;

/// Supplies prepared replies for known positions, consulted before any
/// search runs. Probing by hash keeps the book independent of how the
/// position was reached.
pub trait OpeningBook: Sync {
    fn probe(&self, board: &Board) -> Option<Move>;
}

/// Receives the chosen move and its diagnostics after every completed
/// search, for logging or game records.
pub trait ReplaySink {
    fn record(&mut self, board: &Board, best: &Move, diagnostics: &DiagnosticsReport);
}

/// Hash-keyed in-memory book.
#[derive(Debug, Default)]
pub struct StaticOpeningBook {
    entries: std::collections::HashMap<u64, Move>,
}

impl StaticOpeningBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, board: &Board, reply: Move) {
        self.entries.insert(board.hash(), reply);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl OpeningBook for StaticOpeningBook {
    fn probe(&self, board: &Board) -> Option<Move> {
        self.entries.get(&board.hash()).copied()
    }
}

/// Collects search results in memory; handy for tests and demos.
#[derive(Debug, Default)]
pub struct MoveLog {
    pub entries: Vec<(Move, DiagnosticsReport)>,
}

impl ReplaySink for MoveLog {
    fn record(&mut self, _board: &Board, best: &Move, diagnostics: &DiagnosticsReport) {
        self.entries.push((*best, diagnostics.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square;

    fn sq(name: &str) -> u8 {
        square::parse(name).unwrap()
    }

    #[test]
    fn test_book_probe_by_position() {
        let board = Board::start_position();
        let mut book = StaticOpeningBook::new();
        book.insert(&board, Move::new(sq("e2"), sq("e4")));

        assert_eq!(book.probe(&board), Some(Move::new(sq("e2"), sq("e4"))));
        let after = board.make_child(&Move::new(sq("e2"), sq("e4")));
        assert_eq!(book.probe(&after), None);
    }

    #[test]
    fn test_move_log_records() {
        let board = Board::start_position();
        let mut log = MoveLog::default();
        log.record(
            &board,
            &Move::new(sq("e2"), sq("e4")),
            &DiagnosticsReport::default(),
        );
        assert_eq!(log.entries.len(), 1);
        assert_eq!(log.entries[0].0, Move::new(sq("e2"), sq("e4")));
    }
}
