//! Precomputed move tables.
//!
//! Jump tables (knight, king, pawn attacks) are built at compile time.
//! Slider rays keep their squares in walking order, nearest first, which the
//! attack bookkeeping relies on, so they are built lazily at first use.

use crate::square::Square;
use once_cell::sync::Lazy;
use smallvec::SmallVec;

/// KNIGHT_TARGETS[square] is a bitboard of all squares a knight reaches.
pub static KNIGHT_TARGETS: [u64; 64] = generate_jump_table(&[
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
]);

/// KING_TARGETS[square] is a bitboard of the up-to-8 neighbouring squares.
pub static KING_TARGETS: [u64; 64] = generate_jump_table(&[
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
]);

/// PAWN_ATTACKS[color][square]: diagonal attack squares for a pawn.
/// Index 0 = White, 1 = Black.
pub static PAWN_ATTACKS: [[u64; 64]; 2] = [
    generate_jump_table(&[(1, -1), (1, 1)]),
    generate_jump_table(&[(-1, -1), (-1, 1)]),
];

const fn generate_jump_table<const N: usize>(deltas: &[(i8, i8); N]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0;
    while sq < 64 {
        let rank = (sq / 8) as i8;
        let file = (sq % 8) as i8;
        let mut targets = 0u64;
        let mut i = 0;
        while i < N {
            let (dr, df) = deltas[i];
            let r = rank + dr;
            let f = file + df;
            if r >= 0 && r < 8 && f >= 0 && f < 8 {
                targets |= 1u64 << (r * 8 + f);
            }
            i += 1;
        }
        table[sq as usize] = targets;
        sq += 1;
    }
    table
}

/// Ray directions as (rank delta, file delta). The first four are the rook
/// directions, the last four the bishop directions.
pub const DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

pub const ROOK_DIRECTIONS: std::ops::Range<usize> = 0..4;
pub const BISHOP_DIRECTIONS: std::ops::Range<usize> = 4..8;
pub const ALL_DIRECTIONS: std::ops::Range<usize> = 0..8;

pub type Ray = SmallVec<[Square; 7]>;

/// RAYS[square][direction]: squares along the ray, nearest first, up to the
/// board edge.
pub static RAYS: Lazy<Box<[[Ray; 8]; 64]>> = Lazy::new(|| {
    Box::new(std::array::from_fn(|sq| {
        std::array::from_fn(|dir| ray_from(sq as Square, DIRECTIONS[dir]))
    }))
});

fn ray_from(sq: Square, (dr, df): (i8, i8)) -> Ray {
    let mut ray = Ray::new();
    let mut r = (sq / 8) as i8 + dr;
    let mut f = (sq % 8) as i8 + df;
    while (0..8).contains(&r) && (0..8).contains(&f) {
        ray.push((r * 8 + f) as Square);
        r += dr;
        f += df;
    }
    ray
}

/// Direction index pointing from `from` towards `to`, if they share a rank,
/// file or diagonal.
pub fn direction_between(from: Square, to: Square) -> Option<usize> {
    let dr = (to / 8) as i8 - (from / 8) as i8;
    let df = (to % 8) as i8 - (from % 8) as i8;
    if dr == 0 && df == 0 {
        return None;
    }
    let step = (dr.signum(), df.signum());
    if dr != 0 && df != 0 && dr.abs() != df.abs() {
        return None;
    }
    DIRECTIONS.iter().position(|&d| d == step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square;

    #[test]
    fn test_knight_targets_corner_and_centre() {
        // a1 knight reaches b3 and c2 only
        let a1 = KNIGHT_TARGETS[0];
        assert_eq!(a1.count_ones(), 2);
        assert_ne!(a1 & square::bit(square::parse("b3").unwrap()), 0);
        assert_ne!(a1 & square::bit(square::parse("c2").unwrap()), 0);

        // e4 knight has the full 8 targets
        assert_eq!(KNIGHT_TARGETS[square::parse("e4").unwrap() as usize].count_ones(), 8);
    }

    #[test]
    fn test_king_targets() {
        assert_eq!(KING_TARGETS[0].count_ones(), 3);
        assert_eq!(KING_TARGETS[square::parse("e4").unwrap() as usize].count_ones(), 8);
    }

    #[test]
    fn test_pawn_attacks_edges() {
        let a2 = square::parse("a2").unwrap() as usize;
        assert_eq!(PAWN_ATTACKS[0][a2].count_ones(), 1);
        let e4 = square::parse("e4").unwrap() as usize;
        assert_eq!(PAWN_ATTACKS[0][e4].count_ones(), 2);
        // black pawn attacks point down the board
        assert_ne!(
            PAWN_ATTACKS[1][e4] & square::bit(square::parse("d3").unwrap()),
            0
        );
    }

    #[test]
    fn test_rays_are_ordered_nearest_first() {
        let e4 = square::parse("e4").unwrap();
        // north ray from e4: e5 e6 e7 e8
        let ray = &RAYS[e4 as usize][0];
        let names: Vec<_> = ray.iter().map(|&s| square::algebraic(s)).collect();
        assert_eq!(names, vec!["e5", "e6", "e7", "e8"]);
    }

    #[test]
    fn test_direction_between() {
        let e4 = square::parse("e4").unwrap();
        let e8 = square::parse("e8").unwrap();
        let h7 = square::parse("h7").unwrap();
        let h6 = square::parse("h6").unwrap();
        assert_eq!(direction_between(e4, e8), Some(0));
        // e4-h7 runs through f5 and g6
        assert!(BISHOP_DIRECTIONS.contains(&direction_between(e4, h7).unwrap()));
        // a knight-ish offset shares no line
        assert!(direction_between(e4, h6).is_none());
        let a8 = square::parse("a8").unwrap();
        let d = direction_between(e4, a8).unwrap();
        assert!(BISHOP_DIRECTIONS.contains(&d));
    }
}
