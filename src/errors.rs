use thiserror::Error;

/// Errors surfaced by the engine API.
///
/// Search internals treat a corrupted position (e.g. a missing king) as a
/// programming error and panic instead of threading a `Result` through the
/// hot path. Everything callers can plausibly trigger is reported here.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A move was rejected against the current legal move set.
    #[error("invalid move {0}")]
    InvalidMove(String),

    /// The side to move has no legal moves, so there is nothing to search.
    #[error("no legal moves for the side to move")]
    EmptyMoveSet,

    /// The search was cancelled before a single depth completed.
    #[error("search stopped before any depth completed")]
    Timeout,

    /// FEN input could not be parsed into a position.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// Internal state contradiction detected at an API boundary.
    #[error("logical inconsistency: {0}")]
    LogicalInconsistency(String),
}
