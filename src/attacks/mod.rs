//! Incrementally maintained attack bookkeeping.
//!
//! Each side owns an [`AttackCache`] describing every square it attacks,
//! which of its own pieces are guarded, and every slider bearing on the
//! opposing king. The cache is the legality oracle: a pseudo-legal move is
//! legal exactly when the opposing side's cache accepts it, so no move is
//! ever validated by simulating it.
//!
//! After a move executes, only the entries linked to the move's squares are
//! rebuilt. Caches are shared into child positions behind an `Arc` and
//! cloned on first write, so branching stays cheap.

mod direct;
mod guarded;
mod slider;

pub use direct::DirectAttackMap;
pub use guarded::GuardedMap;
pub use slider::SliderPin;

use crate::board::{Board, Color, MoveRecord, PieceKind};
use crate::movegen;
use crate::moves::Move;
use crate::square::{self, Square};
use crate::tables::{direction_between, BISHOP_DIRECTIONS, RAYS, ROOK_DIRECTIONS};
use smallvec::SmallVec;

#[derive(Debug, Clone)]
pub struct AttackCache {
    attacker: Color,
    /// Attacks by every piece except the king.
    direct: DirectAttackMap,
    /// Attacks by the king itself.
    king: DirectAttackMap,
    /// Friendly pieces covered by another friendly piece.
    guarded: GuardedMap,
    /// Sliders bearing on the opposing king: checks, pins and the
    /// en-passant double-blocker case.
    sliders: Vec<SliderPin>,
    /// Union of all attacked squares, kept in sync with the maps.
    capture_targets: u64,
}

impl AttackCache {
    /// Cache with no attacks recorded, used while a board is being
    /// assembled.
    pub fn build_empty(attacker: Color) -> Self {
        Self {
            attacker,
            direct: DirectAttackMap::new(),
            king: DirectAttackMap::new(),
            guarded: GuardedMap::new(),
            sliders: Vec::new(),
            capture_targets: 0,
        }
    }

    /// Build the cache for one side from scratch.
    pub fn build(board: &Board, attacker: Color) -> Self {
        let mut cache = Self::build_empty(attacker);
        for (sq, _) in board.pieces_of(attacker) {
            cache.regenerate(board, sq);
        }
        cache.capture_targets = cache.direct.union() | cache.king.union();
        cache
    }

    pub fn attacker(&self) -> Color {
        self.attacker
    }

    /// All squares this side attacks, pawn pseudo-captures included.
    pub fn capture_targets(&self) -> u64 {
        self.capture_targets
    }

    pub fn attacks_square(&self, sq: Square) -> bool {
        self.capture_targets & square::bit(sq) != 0
    }

    pub fn is_guarded(&self, sq: Square) -> bool {
        self.guarded.is_guarded(sq)
    }

    pub fn guarded_union(&self) -> u64 {
        self.guarded.union()
    }

    pub fn direct_union(&self) -> u64 {
        self.direct.union()
    }

    pub fn sliders(&self) -> &[SliderPin] {
        &self.sliders
    }

    /// Squares of pieces giving check to the opposing king on `king_sq`.
    pub fn checkers_of(&self, king_sq: Square) -> SmallVec<[Square; 4]> {
        let mut checkers = self.direct.attackers_of(king_sq);
        for sq in self.king.attackers_of(king_sq) {
            if !checkers.contains(&sq) {
                checkers.push(sq);
            }
        }
        checkers
    }

    /// Decide whether a pseudo-legal move by the opposing side is legal.
    ///
    /// Three branches, king moves first: the king may not step onto an
    /// attacked square, capture a guarded piece, or retreat along a live
    /// check ray. Any other move must resolve an active check (double check
    /// forces a king move) and must respect the pin its origin square may be
    /// part of.
    pub fn is_legal(&self, board: &Board, mv: &Move) -> bool {
        let defender = self.attacker.opposite();
        let Some(moving) = board.piece_at(mv.from) else {
            return false;
        };
        let Some(king_sq) = board.king_square(defender) else {
            panic!("no {:?} king on the board while validating moves", defender);
        };

        if moving.kind == PieceKind::King {
            if self.attacks_square(mv.to) {
                return false;
            }
            if mv.capture && self.is_guarded(mv.to) {
                return false;
            }
            return !self
                .sliders
                .iter()
                .any(|pin| pin.is_check() && pin.behind_king == Some(mv.to));
        }

        let checkers = self.checkers_of(king_sq);
        if checkers.len() >= 2 {
            return false;
        }
        if let [checker] = checkers.as_slice() {
            let captures_checker = mv.to == *checker
                || (mv.en_passant && board.en_passant_victim() == Some(*checker));
            let blocks = self
                .sliders
                .iter()
                .any(|pin| pin.attacker == *checker && pin.is_check() && pin.covers(mv.to));
            if !captures_checker && !blocks {
                return false;
            }
        }

        for pin in self.sliders.iter().filter(|p| p.guard == Some(mv.from)) {
            if pin.en_passant_opportunity {
                if mv.en_passant {
                    return false;
                }
            } else if !pin.covers(mv.to) {
                return false;
            }
        }
        true
    }

    /// Refresh the cache after `record` was executed on `board`.
    ///
    /// Entries are dropped and rebuilt when their attacker stood on one of
    /// the move's squares (origin, destination, captured piece, castling
    /// rook) or when their target set or pin line touches one of them. That
    /// includes entries keyed by a captured attacker on the destination
    /// square, so no attack of a removed piece can linger.
    pub fn update_after_move(&mut self, board: &Board, record: &MoveRecord) {
        let defender = self.attacker.opposite();
        if record.moved.color == defender && record.moved.kind == PieceKind::King {
            // every slider bearing references the king square
            *self = Self::build(board, self.attacker);
            return;
        }

        let mut touched = square::bit(record.from) | square::bit(record.to);
        if let Some((sq, _)) = record.captured {
            touched |= square::bit(sq);
        }
        if let Some((rook_from, rook_to)) = record.rook {
            touched |= square::bit(rook_from) | square::bit(rook_to);
        }

        let mut refresh: SmallVec<[Square; 16]> = SmallVec::new();
        let note = |sq: Square, refresh: &mut SmallVec<[Square; 16]>| {
            if !refresh.contains(&sq) {
                refresh.push(sq);
            }
        };

        for sq in square::squares_of(touched) {
            note(sq, &mut refresh);
        }
        for sq in self.direct.attackers_touching(touched) {
            note(sq, &mut refresh);
        }
        for sq in self.king.attackers_touching(touched) {
            note(sq, &mut refresh);
        }
        for sq in self.guarded.guards_touching(touched) {
            note(sq, &mut refresh);
        }
        for pin in &self.sliders {
            // expired en-passant rights invalidate the double-blocker case
            if pin.line & touched != 0 || pin.en_passant_opportunity {
                note(pin.attacker, &mut refresh);
            }
        }
        // a slider blocked twice over has no cached entry on the far
        // blocker's square, yet gains a pin the moment that piece leaves
        // the line; re-probe every own slider whose segment towards the
        // king was touched
        if let Some(king_sq) = board.king_square(defender) {
            for (sq, piece) in board.pieces_of(self.attacker) {
                if !piece.kind.is_slider() {
                    continue;
                }
                let Some(dir) = direction_between(sq, king_sq) else {
                    continue;
                };
                let reaches = match piece.kind {
                    PieceKind::Queen => true,
                    PieceKind::Rook => ROOK_DIRECTIONS.contains(&dir),
                    PieceKind::Bishop => BISHOP_DIRECTIONS.contains(&dir),
                    _ => false,
                };
                if !reaches {
                    continue;
                }
                let mut segment = 0u64;
                for &step in RAYS[sq as usize][dir].iter() {
                    if step == king_sq {
                        break;
                    }
                    segment |= square::bit(step);
                }
                if segment & touched != 0 {
                    note(sq, &mut refresh);
                }
            }
        }

        for &sq in &refresh {
            self.remove_attacker(sq);
        }
        for &sq in &refresh {
            self.regenerate(board, sq);
        }
        self.capture_targets = self.direct.union() | self.king.union();
    }

    fn remove_attacker(&mut self, sq: Square) {
        self.direct.remove(sq);
        self.king.remove(sq);
        self.guarded.remove(sq);
        self.sliders.retain(|pin| pin.attacker != sq);
    }

    /// Recompute the contribution of the piece on `sq`, if it belongs to
    /// this side. Soft-target moves become guarded squares, everything else
    /// becomes a direct attack.
    fn regenerate(&mut self, board: &Board, sq: Square) {
        let Some(piece) = board.piece_at(sq) else {
            return;
        };
        if piece.color != self.attacker {
            return;
        }

        let mut buf = movegen::MoveBuf::new();
        movegen::attack_moves_for(board, sq, &mut buf);

        let mut attacked = 0u64;
        let mut guarded = 0u64;
        for mv in &buf {
            let own_target = board
                .piece_at(mv.to)
                .map_or(false, |p| p.color == self.attacker);
            if own_target {
                guarded |= square::bit(mv.to);
            } else {
                attacked |= square::bit(mv.to);
            }
        }

        if piece.kind == PieceKind::King {
            self.king.set(sq, attacked);
        } else {
            self.direct.set(sq, attacked);
        }
        self.guarded.set(sq, guarded);

        if piece.kind.is_slider() {
            let defender = self.attacker.opposite();
            if let Some(king_sq) = board.king_square(defender) {
                if let Some(pin) = slider::probe(board, sq, piece.kind, king_sq) {
                    self.sliders.push(pin);
                }
            }
        }
    }
}
