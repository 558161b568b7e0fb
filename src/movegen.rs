//! Pseudo-legal move generation.
//!
//! Generation is dispatched through fixed per-kind function tables, one for
//! playable moves and one for attack moves. Attack moves feed the attack
//! caches and include soft targets (attacks on friendly pieces) as well as
//! pawn pseudo-captures onto empty squares; playable moves are what the
//! search executes, after the opposing attack cache has accepted them.

use crate::board::{castling, Board, Color, PieceKind};
use crate::moves::Move;
use crate::square::{self, Square};
use crate::tables::{
    ALL_DIRECTIONS, BISHOP_DIRECTIONS, KING_TARGETS, KNIGHT_TARGETS, PAWN_ATTACKS, RAYS,
    ROOK_DIRECTIONS,
};
use smallvec::SmallVec;

pub type MoveBuf = SmallVec<[Move; 64]>;

type Generator = fn(&Board, Square, &mut MoveBuf);

/// Playable move generators indexed by `PieceKind::index`.
static PLAY_GENERATORS: [Generator; 6] = [
    pawn_play,
    knight_play,
    bishop_play,
    rook_play,
    queen_play,
    king_play,
];

/// Attack move generators indexed by `PieceKind::index`.
static ATTACK_GENERATORS: [Generator; 6] = [
    pawn_attacks,
    knight_attacks,
    bishop_attacks,
    rook_attacks,
    queen_attacks,
    king_attacks,
];

/// Playable pseudo-legal moves for the piece on `sq`. Castling is appended
/// separately because it depends on the opposing attack cache.
pub fn playable_moves_for(board: &Board, sq: Square, buf: &mut MoveBuf) {
    if let Some(piece) = board.piece_at(sq) {
        PLAY_GENERATORS[piece.kind.index()](board, sq, buf);
    }
}

/// Attack moves for the piece on `sq`, soft targets included.
pub fn attack_moves_for(board: &Board, sq: Square, buf: &mut MoveBuf) {
    if let Some(piece) = board.piece_at(sq) {
        ATTACK_GENERATORS[piece.kind.index()](board, sq, buf);
    }
}

/// All playable pseudo-legal moves for one side, castling excluded.
pub fn pseudo_moves(board: &Board, color: Color, buf: &mut MoveBuf) {
    for (sq, _) in board.pieces_of(color) {
        playable_moves_for(board, sq, buf);
    }
}

/// All legal moves for the side to move.
pub fn legal_moves(board: &Board) -> MoveBuf {
    let color = board.side_to_move();
    let oracle = board.attack_cache(color.opposite());

    let mut pseudo = MoveBuf::new();
    pseudo_moves(board, color, &mut pseudo);

    let mut legal: MoveBuf = pseudo
        .into_iter()
        .filter(|mv| !mv.soft_target && oracle.is_legal(board, mv))
        .collect();
    castling::moves_for(board, color, &mut legal);
    legal
}

/// Count leaf nodes of the move generation tree to `depth`.
pub fn perft(board: &Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = legal_moves(board);
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0;
    for mv in &moves {
        nodes += perft(&board.make_child(mv), depth - 1);
    }
    nodes
}

/// Perft split by root move, for pinpointing generation bugs.
pub fn divide(board: &Board, depth: u32) -> Vec<(Move, u64)> {
    legal_moves(board)
        .into_iter()
        .map(|mv| {
            let nodes = if depth == 0 {
                1
            } else {
                perft(&board.make_child(&mv), depth - 1)
            };
            (mv, nodes)
        })
        .collect()
}

const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

fn push_pawn_advance(from: Square, to: Square, capture: bool, buf: &mut MoveBuf) {
    if square::rank(to) == 0 || square::rank(to) == 7 {
        for kind in PROMOTION_KINDS {
            buf.push(Move::promotion(from, to, kind, capture));
        }
    } else if capture {
        buf.push(Move::capture(from, to));
    } else {
        buf.push(Move::new(from, to));
    }
}

fn pawn_play(board: &Board, sq: Square, buf: &mut MoveBuf) {
    let piece = match board.piece_at(sq) {
        Some(p) => p,
        None => return,
    };
    let forward = piece.color.forward();
    let rank = square::rank(sq) as i8;
    let home_rank = match piece.color {
        Color::White => 1,
        Color::Black => 6,
    };

    let one = (sq as i8 + forward * 8) as Square;
    if board.piece_at(one).is_none() {
        push_pawn_advance(sq, one, false, buf);
        if rank == home_rank {
            let two = (sq as i8 + forward * 16) as Square;
            if board.piece_at(two).is_none() {
                buf.push(Move::new(sq, two));
            }
        }
    }

    for to in square::squares_of(PAWN_ATTACKS[piece.color.index()][sq as usize]) {
        match board.piece_at(to) {
            Some(target) if target.color != piece.color => {
                push_pawn_advance(sq, to, true, buf);
            }
            None if board.strategic.en_passant == Some(to) => {
                buf.push(Move::en_passant(sq, to));
            }
            _ => {}
        }
    }
}

fn pawn_attacks(board: &Board, sq: Square, buf: &mut MoveBuf) {
    let piece = match board.piece_at(sq) {
        Some(p) => p,
        None => return,
    };
    for to in square::squares_of(PAWN_ATTACKS[piece.color.index()][sq as usize]) {
        match board.piece_at(to) {
            Some(target) if target.color == piece.color => buf.push(Move::soft(sq, to)),
            Some(_) => buf.push(Move::capture(sq, to)),
            // pseudo-capture: the square is covered even though nothing
            // stands on it
            None => buf.push(Move {
                capture: true,
                soft_target: true,
                ..Move::new(sq, to)
            }),
        }
    }
}

fn jump_play(board: &Board, sq: Square, targets: u64, buf: &mut MoveBuf) {
    let color = match board.piece_at(sq) {
        Some(p) => p.color,
        None => return,
    };
    for to in square::squares_of(targets) {
        match board.piece_at(to) {
            Some(target) if target.color == color => {}
            Some(_) => buf.push(Move::capture(sq, to)),
            None => buf.push(Move::new(sq, to)),
        }
    }
}

fn jump_attacks(board: &Board, sq: Square, targets: u64, buf: &mut MoveBuf) {
    let color = match board.piece_at(sq) {
        Some(p) => p.color,
        None => return,
    };
    for to in square::squares_of(targets) {
        match board.piece_at(to) {
            Some(target) if target.color == color => buf.push(Move::soft(sq, to)),
            Some(_) => buf.push(Move::capture(sq, to)),
            None => buf.push(Move::new(sq, to)),
        }
    }
}

fn knight_play(board: &Board, sq: Square, buf: &mut MoveBuf) {
    jump_play(board, sq, KNIGHT_TARGETS[sq as usize], buf);
}

fn knight_attacks(board: &Board, sq: Square, buf: &mut MoveBuf) {
    jump_attacks(board, sq, KNIGHT_TARGETS[sq as usize], buf);
}

fn king_play(board: &Board, sq: Square, buf: &mut MoveBuf) {
    jump_play(board, sq, KING_TARGETS[sq as usize], buf);
}

fn king_attacks(board: &Board, sq: Square, buf: &mut MoveBuf) {
    jump_attacks(board, sq, KING_TARGETS[sq as usize], buf);
}

fn slider_play(board: &Board, sq: Square, dirs: std::ops::Range<usize>, buf: &mut MoveBuf) {
    let color = match board.piece_at(sq) {
        Some(p) => p.color,
        None => return,
    };
    for dir in dirs {
        for &to in RAYS[sq as usize][dir].iter() {
            match board.piece_at(to) {
                None => buf.push(Move::new(sq, to)),
                Some(target) => {
                    if target.color != color {
                        buf.push(Move::capture(sq, to));
                    }
                    break;
                }
            }
        }
    }
}

fn slider_attacks(board: &Board, sq: Square, dirs: std::ops::Range<usize>, buf: &mut MoveBuf) {
    let color = match board.piece_at(sq) {
        Some(p) => p.color,
        None => return,
    };
    for dir in dirs {
        for &to in RAYS[sq as usize][dir].iter() {
            match board.piece_at(to) {
                None => buf.push(Move::new(sq, to)),
                Some(target) => {
                    if target.color == color {
                        buf.push(Move::soft(sq, to));
                    } else {
                        buf.push(Move::capture(sq, to));
                    }
                    break;
                }
            }
        }
    }
}

fn bishop_play(board: &Board, sq: Square, buf: &mut MoveBuf) {
    slider_play(board, sq, BISHOP_DIRECTIONS, buf);
}

fn bishop_attacks(board: &Board, sq: Square, buf: &mut MoveBuf) {
    slider_attacks(board, sq, BISHOP_DIRECTIONS, buf);
}

fn rook_play(board: &Board, sq: Square, buf: &mut MoveBuf) {
    slider_play(board, sq, ROOK_DIRECTIONS, buf);
}

fn rook_attacks(board: &Board, sq: Square, buf: &mut MoveBuf) {
    slider_attacks(board, sq, ROOK_DIRECTIONS, buf);
}

fn queen_play(board: &Board, sq: Square, buf: &mut MoveBuf) {
    slider_play(board, sq, ALL_DIRECTIONS, buf);
}

fn queen_attacks(board: &Board, sq: Square, buf: &mut MoveBuf) {
    slider_attacks(board, sq, ALL_DIRECTIONS, buf);
}
