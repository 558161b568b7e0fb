//! FEN import and a debug-quality export.

use crate::board::strategic::{
    StrategicData, BLACK_KING_SIDE, BLACK_QUEEN_SIDE, WHITE_KING_SIDE, WHITE_QUEEN_SIDE,
};
use crate::board::{Board, Color, Piece};
use crate::errors::EngineError;
use crate::square;

pub const START_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub(super) fn parse(input: &str) -> Result<Board, EngineError> {
    let mut fields = input.split_whitespace();
    let placement = fields
        .next()
        .ok_or_else(|| EngineError::InvalidFen("empty input".into()))?;

    let mut squares: [Option<Piece>; 64] = [None; 64];
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(EngineError::InvalidFen(format!(
            "expected 8 ranks, got {}",
            ranks.len()
        )));
    }
    for (i, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - i as u8;
        let mut file = 0u8;
        for c in rank_str.chars() {
            if let Some(skip) = c.to_digit(10) {
                file += skip as u8;
            } else {
                let piece = Piece::from_fen_char(c)
                    .ok_or_else(|| EngineError::InvalidFen(format!("bad piece '{}'", c)))?;
                if file > 7 {
                    return Err(EngineError::InvalidFen(format!("rank {} overflows", rank + 1)));
                }
                squares[square::make(file, rank) as usize] = Some(piece);
                file += 1;
            }
        }
        if file != 8 {
            return Err(EngineError::InvalidFen(format!(
                "rank {} has {} files",
                rank + 1,
                file
            )));
        }
    }

    let side_to_move = match fields.next() {
        Some("w") | None => Color::White,
        Some("b") => Color::Black,
        Some(other) => {
            return Err(EngineError::InvalidFen(format!(
                "bad side to move '{}'",
                other
            )))
        }
    };

    let mut strategic = StrategicData::without_castling();
    if let Some(rights) = fields.next() {
        if rights != "-" {
            for c in rights.chars() {
                match c {
                    'K' => strategic.castling[WHITE_KING_SIDE] = true,
                    'Q' => strategic.castling[WHITE_QUEEN_SIDE] = true,
                    'k' => strategic.castling[BLACK_KING_SIDE] = true,
                    'q' => strategic.castling[BLACK_QUEEN_SIDE] = true,
                    _ => {
                        return Err(EngineError::InvalidFen(format!(
                            "bad castling flag '{}'",
                            c
                        )))
                    }
                }
            }
        }
    }

    if let Some(ep) = fields.next() {
        if ep != "-" {
            let target = square::parse(ep)
                .map_err(|_| EngineError::InvalidFen(format!("bad en passant square '{}'", ep)))?;
            strategic.en_passant = Some(target);
        }
    }

    // halfmove clock is ignored; the fullmove number seeds the turn count
    let _halfmove = fields.next();
    if let Some(fullmove) = fields.next() {
        let number: u32 = fullmove
            .parse()
            .map_err(|_| EngineError::InvalidFen(format!("bad fullmove number '{}'", fullmove)))?;
        strategic.turn_count =
            number.saturating_sub(1) * 2 + if side_to_move == Color::Black { 1 } else { 0 };
    }

    Board::assemble(squares, side_to_move, strategic)
}

/// Placement, side, castling and en passant reflect the board; the move
/// counters are fixed placeholders.
pub(super) fn export(board: &Board) -> String {
    let mut placement = String::new();
    for rank in (0..8u8).rev() {
        let mut empty = 0;
        for file in 0..8u8 {
            match board.piece_at(square::make(file, rank)) {
                Some(piece) => {
                    if empty > 0 {
                        placement.push(char::from_digit(empty, 10).unwrap_or('8'));
                        empty = 0;
                    }
                    placement.push(piece.fen_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            placement.push(char::from_digit(empty, 10).unwrap_or('8'));
        }
        if rank > 0 {
            placement.push('/');
        }
    }

    let side = match board.side_to_move() {
        Color::White => 'w',
        Color::Black => 'b',
    };

    let mut rights = String::new();
    let flags = ['K', 'Q', 'k', 'q'];
    for (i, flag) in flags.iter().enumerate() {
        if board.strategic.castling[i] {
            rights.push(*flag);
        }
    }
    if rights.is_empty() {
        rights.push('-');
    }

    let ep = match board.strategic.en_passant {
        Some(sq) => square::algebraic(sq),
        None => "-".to_string(),
    };

    format!("{} {} {} {} 0 1", placement, side, rights, ep)
}
