use crate::square::Square;

/// Castling right indices into [`StrategicData::castling`].
pub const WHITE_KING_SIDE: usize = 0;
pub const WHITE_QUEEN_SIDE: usize = 1;
pub const BLACK_KING_SIDE: usize = 2;
pub const BLACK_QUEEN_SIDE: usize = 3;

/// Per-branch auxiliary state, copied into every child position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategicData {
    pub castling: [bool; 4],
    /// Square a pawn could capture onto en passant, if the previous move
    /// was a double push.
    pub en_passant: Option<Square>,
    /// Half-move counter from the start of the game.
    pub turn_count: u32,
    /// 0.0 at the starting position, 1.0 once all non-pawn material except
    /// the kings is gone. Drives the endgame evaluation terms.
    pub end_game_weight: f64,
}

impl Default for StrategicData {
    fn default() -> Self {
        Self {
            castling: [true; 4],
            en_passant: None,
            turn_count: 0,
            end_game_weight: 0.0,
        }
    }
}

impl StrategicData {
    /// State for a position without any castling rights, e.g. most test
    /// setups built from sparse FEN strings.
    pub fn without_castling() -> Self {
        Self {
            castling: [false; 4],
            ..Self::default()
        }
    }
}
