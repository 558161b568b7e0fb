use crate::board::{Board, PieceKind};
use crate::square::{self, Square};
use crate::tables::{self, BISHOP_DIRECTIONS, RAYS, ROOK_DIRECTIONS};

/// A slider bearing on the enemy king along one ray.
///
/// With no guard the king is in check and `line` holds the blockable
/// squares. With one guard the guard is pinned to the line. The en-passant
/// variant covers the one case where two pawns block the ray but a single
/// en-passant capture would remove both of them at once.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderPin {
    pub attacker: Square,
    /// Pinned defender, if any. `None` means the slider checks the king
    /// directly.
    pub guard: Option<Square>,
    pub king: Square,
    /// Every square from attacker to king, both endpoints included.
    pub line: u64,
    /// Square one step past the king on the same ray. Unavailable as a king
    /// retreat while the check is live.
    pub behind_king: Option<Square>,
    /// The ray is blocked by exactly two pawns that an en-passant capture
    /// would both remove.
    pub en_passant_opportunity: bool,
    /// Square of the en-passant victim pawn for the case above.
    pub ep_victim: Option<Square>,
}

impl SliderPin {
    pub fn is_check(&self) -> bool {
        self.guard.is_none() && !self.en_passant_opportunity
    }

    /// Squares a defender can move to in order to keep or restore the block:
    /// anywhere on the line, including capturing the attacker.
    pub fn covers(&self, sq: Square) -> bool {
        self.line & square::bit(sq) != 0
    }
}

/// Probe one slider for a bearing on the enemy king.
///
/// Walks the ray from the slider towards the king, counting blockers. Zero
/// blockers is a check, one defender-side blocker is a pin, and two pawns on
/// a rank may form the en-passant case. Anything else means the slider does
/// not constrain the king on this ray.
pub fn probe(board: &Board, attacker_sq: Square, kind: PieceKind, king: Square) -> Option<SliderPin> {
    let dir = tables::direction_between(attacker_sq, king)?;
    let compatible = match kind {
        PieceKind::Rook => ROOK_DIRECTIONS.contains(&dir),
        PieceKind::Bishop => BISHOP_DIRECTIONS.contains(&dir),
        PieceKind::Queen => true,
        _ => false,
    };
    if !compatible {
        return None;
    }

    let attacker = board.piece_at(attacker_sq)?;
    let mut line = square::bit(attacker_sq);
    let mut blockers: smallvec::SmallVec<[Square; 2]> = smallvec::SmallVec::new();
    let mut behind_king = None;

    let ray = &RAYS[attacker_sq as usize][dir];
    let mut reached_king = false;
    for &sq in ray.iter() {
        if reached_king {
            behind_king = Some(sq);
            break;
        }
        line |= square::bit(sq);
        if sq == king {
            reached_king = true;
            continue;
        }
        if board.piece_at(sq).is_some() {
            if blockers.len() == 2 {
                return None;
            }
            blockers.push(sq);
        }
    }
    if !reached_king {
        return None;
    }

    let king_color = board.piece_at(king)?.color;
    match blockers.as_slice() {
        [] => Some(SliderPin {
            attacker: attacker_sq,
            guard: None,
            king,
            line,
            behind_king,
            en_passant_opportunity: false,
            ep_victim: None,
        }),
        [guard] => {
            let piece = board.piece_at(*guard)?;
            if piece.color == king_color {
                Some(SliderPin {
                    attacker: attacker_sq,
                    guard: Some(*guard),
                    king,
                    line,
                    behind_king: None,
                    en_passant_opportunity: false,
                    ep_victim: None,
                })
            } else {
                // blocked by the slider's own side
                None
            }
        }
        [a, b] => {
            // Horizontal ray only: a double-pushed pawn and the adjacent
            // pawn able to take it en passant both sit on the king's rank.
            if !(2..4).contains(&dir) {
                return None;
            }
            let victim_sq = board.en_passant_victim()?;
            let (victim, capturer) = if *a == victim_sq {
                (*a, *b)
            } else if *b == victim_sq {
                (*b, *a)
            } else {
                return None;
            };
            if square::file(victim).abs_diff(square::file(capturer)) != 1 {
                return None;
            }
            let victim_piece = board.piece_at(victim)?;
            let capturer_piece = board.piece_at(capturer)?;
            if victim_piece.kind != PieceKind::Pawn || capturer_piece.kind != PieceKind::Pawn {
                return None;
            }
            if victim_piece.color != attacker.color || capturer_piece.color != king_color {
                return None;
            }
            Some(SliderPin {
                attacker: attacker_sq,
                guard: Some(capturer),
                king,
                line,
                behind_king: None,
                en_passant_opportunity: true,
                ep_victim: Some(victim),
            })
        }
        _ => None,
    }
}
