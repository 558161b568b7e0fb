//! Position store.
//!
//! A [`Board`] owns the mailbox piece table, per-side piece lists, the king
//! squares, the incrementally maintained zobrist hash, per-branch strategic
//! state and both attack caches. Branching into a child position clones the
//! board; there is no make/unmake. The piece table and lists are cheap
//! copies, the attack caches sit behind `Arc`s and are cloned on first
//! write, and [`SharedData`] is reference-counted across the whole search.

pub mod castling;
mod fen;
mod piece;
mod shared;
mod strategic;

#[cfg(test)]
mod tests;

pub use piece::{Color, Piece, PieceKind, KING_STRENGTH};
pub use shared::SharedData;
pub use strategic::StrategicData;

use crate::attacks::AttackCache;
use crate::errors::EngineError;
use crate::hashing::zobrist;
use crate::movegen::{self, MoveBuf};
use crate::moves::Move;
use crate::square::{self, Square};
use smallvec::SmallVec;
use std::sync::Arc;

/// What a move changed on the board, for the incremental cache updates.
#[derive(Debug, Clone, Copy)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    /// Piece now standing on `to`, promotion already applied.
    pub moved: Piece,
    pub captured: Option<(Square, Piece)>,
    /// Rook relocation when the move was a castling.
    pub rook: Option<(Square, Square)>,
}

#[derive(Debug, Clone)]
pub struct Board {
    squares: [Option<Piece>; 64],
    piece_squares: [SmallVec<[Square; 16]>; 2],
    kings: [Option<Square>; 2],
    side_to_move: Color,
    hash: u64,
    pub strategic: StrategicData,
    shared: Arc<SharedData>,
    attacks: [Arc<AttackCache>; 2],
}

impl Board {
    /// The standard starting position.
    pub fn start_position() -> Self {
        fen::parse(fen::START_POSITION).expect("starting position FEN is valid")
    }

    pub fn from_fen(input: &str) -> Result<Self, EngineError> {
        fen::parse(input)
    }

    /// Debug-quality FEN export: placement, side, castling and en passant
    /// are faithful, the move counters are placeholders.
    pub fn to_fen(&self) -> String {
        fen::export(self)
    }

    /// Assemble a board from a populated square array. Derives the piece
    /// lists, king squares, hash, endgame weight and attack caches.
    fn assemble(
        squares: [Option<Piece>; 64],
        side_to_move: Color,
        strategic: StrategicData,
    ) -> Result<Self, EngineError> {
        let mut piece_squares: [SmallVec<[Square; 16]>; 2] = [SmallVec::new(), SmallVec::new()];
        let mut kings = [None, None];
        for sq in 0..64u8 {
            if let Some(piece) = squares[sq as usize] {
                piece_squares[piece.color.index()].push(sq);
                if piece.kind == PieceKind::King {
                    if kings[piece.color.index()].is_some() {
                        return Err(EngineError::LogicalInconsistency(format!(
                            "two {:?} kings",
                            piece.color
                        )));
                    }
                    kings[piece.color.index()] = Some(sq);
                }
            }
        }
        if kings[0].is_none() || kings[1].is_none() {
            return Err(EngineError::LogicalInconsistency(
                "both kings must be on the board".into(),
            ));
        }

        let mut board = Self {
            squares,
            piece_squares,
            kings,
            side_to_move,
            hash: 0,
            strategic,
            shared: Arc::new(SharedData::new()),
            attacks: [
                Arc::new(AttackCache::build_empty(Color::White)),
                Arc::new(AttackCache::build_empty(Color::Black)),
            ],
        };
        board.strategic.end_game_weight = board.compute_end_game_weight();
        board.hash = zobrist::full_hash(&board);
        board.attacks = [
            Arc::new(AttackCache::build(&board, Color::White)),
            Arc::new(AttackCache::build(&board, Color::Black)),
        ];
        Ok(board)
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq as usize]
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.kings[color.index()]
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub fn shared(&self) -> &Arc<SharedData> {
        &self.shared
    }

    pub fn attack_cache(&self, color: Color) -> &AttackCache {
        &self.attacks[color.index()]
    }

    /// Squares occupied by `color`, with the pieces standing on them.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.piece_squares[color.index()]
            .iter()
            .filter_map(move |&sq| self.squares[sq as usize].map(|p| (sq, p)))
    }

    /// Square of the pawn removable by en passant, if the right is live.
    pub fn en_passant_victim(&self) -> Option<Square> {
        let target = self.strategic.en_passant?;
        // the pawn that double-pushed belongs to the side that just moved
        match self.side_to_move.opposite() {
            Color::White => Some(target + 8),
            Color::Black => Some(target - 8),
        }
    }

    pub fn legal_moves(&self) -> MoveBuf {
        movegen::legal_moves(self)
    }

    /// Is `color`'s king currently attacked?
    pub fn is_check_against(&self, color: Color) -> bool {
        match self.kings[color.index()] {
            Some(king_sq) => self
                .attack_cache(color.opposite())
                .attacks_square(king_sq),
            None => false,
        }
    }

    /// Side to move is in check with no legal moves.
    pub fn is_checkmate(&self) -> bool {
        self.is_check_against(self.side_to_move) && self.legal_moves().is_empty()
    }

    /// Side to move has no legal moves but is not in check.
    pub fn is_stalemate(&self) -> bool {
        !self.is_check_against(self.side_to_move) && self.legal_moves().is_empty()
    }

    /// Clone into the child position reached by `mv`. The parent stays
    /// untouched, which is the entire undo story of the search tree.
    pub fn make_child(&self, mv: &Move) -> Self {
        let mut child = self.clone();
        child.execute_move(mv);
        child
    }

    /// Validate `mv` against the legal move set before executing it.
    pub fn execute_validated_move(&mut self, mv: &Move) -> Result<(), EngineError> {
        let legal = self.legal_moves();
        let found = legal.iter().find(|m| {
            m.from == mv.from
                && m.to == mv.to
                && (mv.promotion.is_none() || m.promotion == mv.promotion)
        });
        match found {
            Some(m) => {
                let full = *m;
                self.execute_move(&full);
                Ok(())
            }
            None => Err(EngineError::InvalidMove(mv.to_string())),
        }
    }

    /// Execute a move assumed legal. Updates the mailbox, piece lists,
    /// kings, hash, strategic data and both attack caches in place.
    pub fn execute_move(&mut self, mv: &Move) {
        let Some(moving) = self.squares[mv.from as usize] else {
            panic!("no piece on {} to move", square::algebraic(mv.from));
        };

        let captured = if mv.en_passant {
            self.en_passant_victim()
                .and_then(|sq| self.squares[sq as usize].map(|p| (sq, p)))
        } else {
            self.squares[mv.to as usize].map(|p| (mv.to, p))
        };
        let placed = match mv.promotion {
            Some(kind) => Piece::new(moving.color, kind),
            None => moving,
        };
        let rook = if mv.castling {
            castling::rook_relocation(mv.to)
        } else {
            None
        };

        // hash: remove, then place, then flip the side
        self.hash ^= zobrist::piece_key(moving, mv.from);
        if let Some((sq, piece)) = captured {
            self.hash ^= zobrist::piece_key(piece, sq);
        }
        self.hash ^= zobrist::piece_key(placed, mv.to);
        if let Some((rook_from, rook_to)) = rook {
            let rook_piece = Piece::new(moving.color, PieceKind::Rook);
            self.hash ^= zobrist::piece_key(rook_piece, rook_from);
            self.hash ^= zobrist::piece_key(rook_piece, rook_to);
        }
        self.hash ^= zobrist::side_key();

        // mailbox and piece lists
        self.squares[mv.from as usize] = None;
        if let Some((sq, piece)) = captured {
            self.squares[sq as usize] = None;
            self.piece_squares[piece.color.index()].retain(|&mut s| s != sq);
        }
        self.squares[mv.to as usize] = Some(placed);
        self.relocate_in_list(moving.color, mv.from, mv.to);
        if let Some((rook_from, rook_to)) = rook {
            let rook_piece = self.squares[rook_from as usize]
                .take()
                .unwrap_or(Piece::new(moving.color, PieceKind::Rook));
            self.squares[rook_from as usize] = None;
            self.squares[rook_to as usize] = Some(rook_piece);
            self.relocate_in_list(moving.color, rook_from, rook_to);
        }
        if moving.kind == PieceKind::King {
            self.kings[moving.color.index()] = Some(mv.to);
        }

        // strategic state
        castling::revoke_rights(&mut self.strategic, mv.from, mv.to);
        self.strategic.en_passant = if moving.kind == PieceKind::Pawn
            && mv.to.abs_diff(mv.from) == 16
        {
            Some((mv.from + mv.to) / 2)
        } else {
            None
        };
        self.strategic.turn_count += 1;
        if captured.is_some() || mv.promotion.is_some() {
            self.strategic.end_game_weight = self.compute_end_game_weight();
        }
        self.side_to_move = self.side_to_move.opposite();

        // attack caches, cloned on write when shared with a parent
        let record = MoveRecord {
            from: mv.from,
            to: mv.to,
            moved: placed,
            captured,
            rook,
        };
        for index in 0..2 {
            let mut cache = Arc::clone(&self.attacks[index]);
            Arc::make_mut(&mut cache).update_after_move(self, &record);
            self.attacks[index] = cache;
        }
    }

    fn relocate_in_list(&mut self, color: Color, from: Square, to: Square) {
        for sq in self.piece_squares[color.index()].iter_mut() {
            if *sq == from {
                *sq = to;
                return;
            }
        }
    }

    /// 0.0 with full material, approaching 1.0 as the non-pawn pieces
    /// leave the board.
    fn compute_end_game_weight(&self) -> f64 {
        let power_pieces = self
            .squares
            .iter()
            .flatten()
            .filter(|p| !matches!(p.kind, PieceKind::Pawn | PieceKind::King))
            .count();
        1.0 - (power_pieces as f64 / 14.0)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::start_position()
    }
}
