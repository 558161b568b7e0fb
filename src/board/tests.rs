use super::*;
use crate::attacks::AttackCache;
use crate::hashing::zobrist;
use crate::movegen;
use crate::square;

fn sq(name: &str) -> u8 {
    square::parse(name).unwrap()
}

#[test]
fn test_start_position_basics() {
    let board = Board::start_position();
    assert_eq!(board.side_to_move(), Color::White);
    assert_eq!(board.king_square(Color::White), Some(sq("e1")));
    assert_eq!(board.king_square(Color::Black), Some(sq("e8")));
    assert_eq!(board.legal_moves().len(), 20);
    assert_ne!(board.hash(), 0);
    assert_eq!(board.strategic.end_game_weight, 0.0);
}

#[test]
fn test_fen_parse_errors() {
    assert!(Board::from_fen("").is_err());
    assert!(Board::from_fen("8/8/8/8/8/8/8").is_err());
    assert!(Board::from_fen("xnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - -").is_err());
    // a position without kings cannot be searched
    assert!(Board::from_fen("8/8/8/8/8/8/8/8 w - -").is_err());
}

#[test]
fn test_fen_export_round_trip() {
    let board = Board::start_position();
    let exported = board.to_fen();
    assert!(exported.starts_with("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -"));
    let reparsed = Board::from_fen(&exported).unwrap();
    assert_eq!(reparsed.hash(), board.hash());
}

#[test]
fn test_double_push_sets_en_passant() {
    let mut board = Board::start_position();
    board.execute_move(&Move::new(sq("e2"), sq("e4")));
    assert_eq!(board.strategic.en_passant, Some(sq("e3")));
    assert_eq!(board.en_passant_victim(), Some(sq("e4")));
    assert_eq!(board.side_to_move(), Color::Black);

    board.execute_move(&Move::new(sq("g8"), sq("f6")));
    assert_eq!(board.strategic.en_passant, None);
}

#[test]
fn test_incremental_hash_matches_recompute() {
    let mut board = Board::start_position();
    for m in ["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6"] {
        board
            .execute_validated_move(&Move::from_algebraic(m).unwrap())
            .unwrap();
        assert_eq!(
            board.hash(),
            zobrist::full_hash(&board),
            "hash diverged after {}",
            m
        );
    }
}

#[test]
fn test_castling_executes_atomically() {
    let mut board =
        Board::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
    let castle = Move::castling(sq("e1"), sq("g1"));
    assert!(board.legal_moves().contains(&castle));
    board.execute_move(&castle);

    assert_eq!(
        board.piece_at(sq("g1")),
        Some(Piece::new(Color::White, PieceKind::King))
    );
    assert_eq!(
        board.piece_at(sq("f1")),
        Some(Piece::new(Color::White, PieceKind::Rook))
    );
    assert_eq!(board.piece_at(sq("e1")), None);
    assert_eq!(board.piece_at(sq("h1")), None);
    assert!(!board.strategic.castling[strategic::WHITE_KING_SIDE]);
    assert!(!board.strategic.castling[strategic::WHITE_QUEEN_SIDE]);
    assert_eq!(board.hash(), zobrist::full_hash(&board));
}

#[test]
fn test_castling_blocked_by_attacked_transit() {
    // black rook covers f1, so white may not castle king side
    let board =
        Board::from_fen("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    let moves = board.legal_moves();
    assert!(!moves.contains(&Move::castling(sq("e1"), sq("g1"))));
    assert!(moves.contains(&Move::castling(sq("e1"), sq("c1"))));
}

#[test]
fn test_en_passant_removes_victim() {
    let mut board =
        Board::from_fen("rnbqkbnr/ppp1pppp/8/8/3p4/8/PPPPPPPP/RNBQKBNR w KQkq - 0 3").unwrap();
    board.execute_move(&Move::new(sq("e2"), sq("e4")));
    let ep = Move::en_passant(sq("d4"), sq("e3"));
    assert!(board.legal_moves().contains(&ep));
    board.execute_move(&ep);

    assert_eq!(board.piece_at(sq("e4")), None, "victim pawn must be gone");
    assert_eq!(
        board.piece_at(sq("e3")),
        Some(Piece::new(Color::Black, PieceKind::Pawn))
    );
    assert_eq!(board.hash(), zobrist::full_hash(&board));
}

#[test]
fn test_promotion_replaces_pawn() {
    let mut board = Board::from_fen("8/4P2k/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    board.execute_move(&Move::promotion(sq("e7"), sq("e8"), PieceKind::Queen, false));
    assert_eq!(
        board.piece_at(sq("e8")),
        Some(Piece::new(Color::White, PieceKind::Queen))
    );
    assert_eq!(board.hash(), zobrist::full_hash(&board));
}

#[test]
fn test_pinned_piece_stays_on_line() {
    // white rook e2 is pinned against the king by the rook on e8
    let board = Board::from_fen("4r2k/8/8/8/8/8/4R3/4K3 w - - 0 1").unwrap();
    let moves = board.legal_moves();
    assert!(moves.contains(&Move::new(sq("e2"), sq("e5"))), "moves along the pin line are fine");
    assert!(moves.contains(&Move::new(sq("e2"), sq("e8"))), "capturing the pinning piece is fine");
    assert!(!moves.contains(&Move::new(sq("e2"), sq("d2"))), "leaving the line is not");
    assert!(!moves.contains(&Move::new(sq("e2"), sq("a2"))));
}

#[test]
fn test_double_check_forces_king_move() {
    // rook on e8 and bishop on a5 both check the king on e1
    let board = Board::from_fen("4r2k/8/8/b7/8/8/8/R3K3 w - - 0 1").unwrap();
    let moves = board.legal_moves();
    assert!(!moves.is_empty());
    for mv in &moves {
        assert_eq!(
            board.piece_at(mv.from).unwrap().kind,
            PieceKind::King,
            "only king moves allowed in double check, got {}",
            mv
        );
    }
}

#[test]
fn test_check_must_be_resolved() {
    // rook e8 checks; white can block with the rook or move the king
    let board = Board::from_fen("4r2k/8/8/8/8/8/3R4/4K3 w - - 0 1").unwrap();
    let moves = board.legal_moves();
    assert!(moves.contains(&Move::new(sq("d2"), sq("e2"))), "blocking is legal");
    assert!(moves.contains(&Move::new(sq("e1"), sq("d1"))), "stepping off the file is legal");
    assert!(!moves.contains(&Move::new(sq("d2"), sq("d4"))), "unrelated moves are not");
    assert!(!moves.contains(&Move::new(sq("e1"), sq("e2"))), "king may not stay on the check file");
}

#[test]
fn test_en_passant_exposing_own_king_is_excluded() {
    // after ...c7c5, capturing en passant would clear the rank between the
    // rook on g5 and the king on a5
    let board = Board::from_fen("7k/8/8/K1pP2r1/8/8/8/8 w - c6 0 2").unwrap();
    let moves = board.legal_moves();
    assert!(
        !moves.contains(&Move::en_passant(sq("d5"), sq("c6"))),
        "en passant would expose the king along the fifth rank"
    );
    assert!(moves.contains(&Move::new(sq("d5"), sq("d6"))), "the plain push stays legal");
}

#[test]
fn test_checkmate_and_stalemate_detection() {
    let mated =
        Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 0 3")
            .unwrap();
    assert!(mated.is_checkmate());
    assert!(!mated.is_stalemate());

    let stale = Board::from_fen("7k/8/5KQ1/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(stale.is_stalemate());
    assert!(!stale.is_checkmate());

    let start = Board::start_position();
    assert!(!start.is_checkmate());
    assert!(!start.is_stalemate());
}

#[test]
fn test_execute_validated_move_rejects_illegal() {
    let mut board = Board::start_position();
    let err = board.execute_validated_move(&Move::from_algebraic("e2e5").unwrap());
    assert!(matches!(err, Err(crate::errors::EngineError::InvalidMove(_))));
    // board unchanged
    assert_eq!(board.hash(), Board::start_position().hash());

    assert!(board
        .execute_validated_move(&Move::from_algebraic("e2e4").unwrap())
        .is_ok());
}

#[test]
fn test_end_game_weight_rises_as_material_leaves() {
    let start = Board::start_position();
    assert_eq!(start.strategic.end_game_weight, 0.0);

    let sparse = Board::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
    assert!(sparse.strategic.end_game_weight > 0.99);

    let rooks = Board::from_fen("4k3/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
    assert!(rooks.strategic.end_game_weight > 0.8);
    assert!(rooks.strategic.end_game_weight < 1.0);
}

#[test]
fn test_incremental_cache_matches_rebuild() {
    let mut board = Board::start_position();
    for m in ["e2e4", "d7d5", "e4d5", "d8d5", "b1c3", "d5a5"] {
        board
            .execute_validated_move(&Move::from_algebraic(m).unwrap())
            .unwrap();
        for color in [Color::White, Color::Black] {
            let rebuilt = AttackCache::build(&board, color);
            let live = board.attack_cache(color);
            assert_eq!(
                live.capture_targets(),
                rebuilt.capture_targets(),
                "capture targets diverged for {:?} after {}",
                color,
                m
            );
            assert_eq!(live.guarded_union(), rebuilt.guarded_union());
            assert_eq!(live.direct_union(), rebuilt.direct_union());
            assert_eq!(live.sliders().len(), rebuilt.sliders().len());
        }
    }
}

#[test]
fn test_no_stale_capture_targets_after_rook_capture() {
    // the rook captures the pawn on a5; nothing of the captured pawn's
    // attacks may survive in either cache
    let mut board = Board::from_fen("4k3/8/8/p7/8/8/8/R3K3 w - - 0 1").unwrap();
    board.execute_move(&Move::capture(sq("a1"), sq("a5")));

    for color in [Color::White, Color::Black] {
        let rebuilt = AttackCache::build(&board, color);
        let live = board.attack_cache(color);
        assert_eq!(
            live.capture_targets(),
            rebuilt.capture_targets(),
            "stale capture target for {:?}",
            color
        );
    }
    // the b4 square was only covered by the captured pawn
    assert!(!board.attack_cache(Color::Black).attacks_square(sq("b4")));
}

#[test]
fn test_pin_appears_when_second_blocker_leaves_the_line() {
    // the g5 rook bears on the white king through two blockers; once the
    // bishop steps off the rank the d5 pawn is pinned, even though no
    // cached entry of the rook ever referenced the bishop's square
    let mut board = Board::from_fen("7k/8/8/K1BP2r1/8/8/8/8 w - - 0 1").unwrap();
    board
        .execute_validated_move(&Move::from_algebraic("c5e3").unwrap())
        .unwrap();
    board
        .execute_validated_move(&Move::from_algebraic("h8h7").unwrap())
        .unwrap();

    let cache = board.attack_cache(Color::Black);
    assert!(
        cache.sliders().iter().any(|pin| pin.guard == Some(sq("d5"))),
        "rook pin on the d5 pawn must be recorded"
    );
    let moves = board.legal_moves();
    assert!(
        !moves.contains(&Move::new(sq("d5"), sq("d6"))),
        "pinned pawn must not leave the rank"
    );
}

#[test]
fn test_perft_start_position() {
    let board = Board::start_position();
    assert_eq!(movegen::perft(&board, 1), 20);
    assert_eq!(movegen::perft(&board, 2), 400);
    assert_eq!(movegen::perft(&board, 3), 8_902);
    assert_eq!(movegen::perft(&board, 4), 197_281);
}

#[test]
fn test_perft_kiwipete() {
    let board = Board::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    )
    .unwrap();
    assert_eq!(movegen::perft(&board, 1), 48);
    assert_eq!(movegen::perft(&board, 2), 2_039);
}

#[test]
fn test_divide_sums_to_perft() {
    let board = Board::start_position();
    let split = movegen::divide(&board, 3);
    let total: u64 = split.iter().map(|(_, n)| n).sum();
    assert_eq!(total, movegen::perft(&board, 3));
    assert_eq!(split.len(), 20);
}

#[test]
fn test_make_child_leaves_parent_untouched() {
    let board = Board::start_position();
    let hash_before = board.hash();
    let child = board.make_child(&Move::new(sq("e2"), sq("e4")));
    assert_eq!(board.hash(), hash_before);
    assert_ne!(child.hash(), hash_before);
    assert_eq!(board.piece_at(sq("e4")), None);
    assert!(child.piece_at(sq("e4")).is_some());
    // the transposition table is shared between parent and child
    assert!(Arc::ptr_eq(board.shared(), child.shared()));
}
