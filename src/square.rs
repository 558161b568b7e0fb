//! Square indexing helpers.
//!
//! Squares are `u8` indices 0..64 with a1 = 0, b1 = 1, ... h8 = 63.

use crate::errors::EngineError;

pub type Square = u8;

#[inline]
pub fn file(sq: Square) -> u8 {
    sq % 8
}

#[inline]
pub fn rank(sq: Square) -> u8 {
    sq / 8
}

#[inline]
pub fn make(file: u8, rank: u8) -> Square {
    rank * 8 + file
}

#[inline]
pub fn bit(sq: Square) -> u64 {
    1u64 << sq
}

/// Iterate over the set squares of a bitboard, lowest index first.
pub fn squares_of(mut bb: u64) -> impl Iterator<Item = Square> {
    std::iter::from_fn(move || {
        if bb == 0 {
            return None;
        }
        let sq = bb.trailing_zeros() as Square;
        bb &= bb - 1;
        Some(sq)
    })
}

/// Format a square as algebraic notation, e.g. 28 -> "e4".
pub fn algebraic(sq: Square) -> String {
    let f = (b'a' + file(sq)) as char;
    let r = (b'1' + rank(sq)) as char;
    format!("{}{}", f, r)
}

/// Parse algebraic notation into a square index.
pub fn parse(s: &str) -> Result<Square, EngineError> {
    let bytes = s.as_bytes();
    if bytes.len() != 2 {
        return Err(EngineError::InvalidMove(format!("bad square '{}'", s)));
    }
    let f = bytes[0].wrapping_sub(b'a');
    let r = bytes[1].wrapping_sub(b'1');
    if f > 7 || r > 7 {
        return Err(EngineError::InvalidMove(format!("bad square '{}'", s)));
    }
    Ok(make(f, r))
}

/// Manhattan distance between two squares.
pub fn manhattan_distance(a: Square, b: Square) -> i32 {
    let df = (file(a) as i32 - file(b) as i32).abs();
    let dr = (rank(a) as i32 - rank(b) as i32).abs();
    df + dr
}

/// Distance from the board centre, 0 (centre) to 6 (corner).
pub fn centre_distance(sq: Square) -> i32 {
    let f = file(sq) as i32;
    let r = rank(sq) as i32;
    let df = (f - 3).max(4 - f);
    let dr = (r - 3).max(4 - r);
    df + dr - 2
}
