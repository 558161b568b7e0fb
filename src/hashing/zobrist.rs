//! Zobrist hashing constants and helpers.
//!
//! Each of the 12 piece/color combinations gets a random 64-bit key per
//! square, plus one key toggled when Black is to move. There are deliberately
//! no keys for castling rights or the en-passant file: the hash identifies
//! the piece arrangement and the side to move, nothing else. That keeps the
//! hash invariant under different move orders reaching the same arrangement,
//! including a castling executed as one move versus its component
//! relocations.

use crate::board::{Board, Color, Piece};
use crate::square::Square;
use once_cell::sync::Lazy;

pub struct ZobristKeys {
    /// [piece_index][square], piece_index = kind * 2 + color
    pub pieces: [[u64; 64]; 12],
    /// Toggled when Black is to move.
    pub side_to_move: u64,
}

impl ZobristKeys {
    /// Generate the keys from a seeded RNG so every process agrees on them.
    fn generate() -> Self {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(0x9e3779b97f4a7c15);

        let mut pieces = [[0u64; 64]; 12];
        for piece in &mut pieces {
            for sq in piece.iter_mut() {
                *sq = rng.gen();
            }
        }

        Self {
            pieces,
            side_to_move: rng.gen(),
        }
    }

    #[inline]
    fn piece_index(piece: Piece) -> usize {
        piece.kind.index() * 2 + piece.color.index()
    }
}

static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::generate);

/// Key for one piece standing on one square.
#[inline]
pub fn piece_key(piece: Piece, sq: Square) -> u64 {
    ZOBRIST.pieces[ZobristKeys::piece_index(piece)][sq as usize]
}

/// Key toggled when the side to move flips.
#[inline]
pub fn side_key() -> u64 {
    ZOBRIST.side_to_move
}

/// Recompute the hash of a board from scratch. Used when importing a
/// position and by tests validating the incremental updates.
pub fn full_hash(board: &Board) -> u64 {
    let mut hash = 0u64;
    for sq in 0..64u8 {
        if let Some(piece) = board.piece_at(sq) {
            hash ^= piece_key(piece, sq);
        }
    }
    if board.side_to_move() == Color::Black {
        hash ^= side_key();
    }
    hash
}
