//! Move value type.
//!
//! A move is a plain value carrying its origin, destination and a handful of
//! flags. Equality and hashing only look at origin and destination: two moves
//! between the same squares are the same move regardless of which flags a
//! particular code path happened to fill in. That keeps lookups stable across
//! the generator, the search and the transposition table.

use crate::board::PieceKind;
use crate::errors::EngineError;
use crate::square::{self, Square};
use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Copy)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub capture: bool,
    pub promotion: Option<PieceKind>,
    pub castling: bool,
    pub en_passant: bool,
    pub check: bool,
    pub checkmate: bool,
    /// Marker move onto a friendly piece. These exist only to feed the
    /// guarded-square bookkeeping and are never executed or returned as
    /// legal moves.
    pub soft_target: bool,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            capture: false,
            promotion: None,
            castling: false,
            en_passant: false,
            check: false,
            checkmate: false,
            soft_target: false,
        }
    }

    pub fn capture(from: Square, to: Square) -> Self {
        Self {
            capture: true,
            ..Self::new(from, to)
        }
    }

    /// Attack on a friendly piece, recorded for guard tracking only.
    pub fn soft(from: Square, to: Square) -> Self {
        Self {
            capture: true,
            soft_target: true,
            ..Self::new(from, to)
        }
    }

    pub fn promotion(from: Square, to: Square, kind: PieceKind, capture: bool) -> Self {
        Self {
            capture,
            promotion: Some(kind),
            ..Self::new(from, to)
        }
    }

    pub fn en_passant(from: Square, to: Square) -> Self {
        Self {
            capture: true,
            en_passant: true,
            ..Self::new(from, to)
        }
    }

    pub fn castling(from: Square, to: Square) -> Self {
        Self {
            castling: true,
            ..Self::new(from, to)
        }
    }

    /// Parse coordinate notation, e.g. "e2e4" or "e7e8q".
    pub fn from_algebraic(s: &str) -> Result<Self, EngineError> {
        if s.len() != 4 && s.len() != 5 {
            return Err(EngineError::InvalidMove(format!("bad move '{}'", s)));
        }
        let from = square::parse(&s[0..2])?;
        let to = square::parse(&s[2..4])?;
        let mut mv = Self::new(from, to);
        if s.len() == 5 {
            let kind = match s.as_bytes()[4].to_ascii_lowercase() {
                b'q' => PieceKind::Queen,
                b'r' => PieceKind::Rook,
                b'b' => PieceKind::Bishop,
                b'n' => PieceKind::Knight,
                _ => {
                    return Err(EngineError::InvalidMove(format!(
                        "bad promotion in '{}'",
                        s
                    )))
                }
            };
            mv.promotion = Some(kind);
        }
        Ok(mv)
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            square::algebraic(self.from),
            square::algebraic(self.to)
        )?;
        if let Some(kind) = self.promotion {
            let c = match kind {
                PieceKind::Queen => 'q',
                PieceKind::Rook => 'r',
                PieceKind::Bishop => 'b',
                PieceKind::Knight => 'n',
                _ => '?',
            };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}
