// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use gambit::{Color, GameState, Piece, PieceKind, Square};

fn play(game: &mut GameState, tokens: &[&str]) {
    for token in tokens {
        if let Err(err) = game.apply_uci_move(token) {
            panic!("{} rejected in {}: {}", token, game.as_fen(), err);
        }
    }
}

#[test]
fn en_passant_reset() {
    // EP square at e3, black to move
    let mut game = GameState::from_fen("4k3/8/8/8/4Pp2/8/8/4K3 b - e3 0 1").unwrap();

    // black not taking EP opportunity
    play(&mut game, &["f4f3"]);

    // EP no longer possible.
    assert_eq!(Color::White, game.side_to_move());
    assert_eq!(None, game.en_passant_square());
}

#[test]
fn en_passant_removes_the_passed_pawn() {
    let mut game = GameState::from_fen("4k3/8/8/8/4Pp2/8/8/4K3 b - e3 0 1").unwrap();
    play(&mut game, &["f4e3"]);

    // the captured pawn stood on e4, not on the destination.
    assert!(game.board().is_empty(Square::E4));
    assert!(game.board().is_empty(Square::F4));
    assert_eq!(
        Some(Piece::new(PieceKind::Pawn, Color::Black)),
        game.board().piece_at(Square::E3)
    );
    assert_eq!(0, game.halfmove_clock());
    assert_eq!(None, game.en_passant_square());
}

#[test]
fn en_passant_expires_after_one_ply() {
    let mut game = GameState::new();
    play(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5"]);
    assert!(game.move_from_uci("e5d6").is_some());

    play(&mut game, &["h2h3", "a6a5"]);
    assert!(game.move_from_uci("e5d6").is_none());
}

#[test]
fn kingside_castle_moves_rook() {
    let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10").unwrap();
    play(&mut game, &["e1g1"]);

    let board = game.board();
    assert_eq!(Some(Piece::new(PieceKind::King, Color::White)), board.piece_at(Square::G1));
    assert_eq!(Some(Piece::new(PieceKind::Rook, Color::White)), board.piece_at(Square::F1));
    assert!(board.is_empty(Square::E1));
    assert!(board.is_empty(Square::H1));
    assert!(!game.can_castle_kingside(Color::White));
    assert!(!game.can_castle_queenside(Color::White));
    assert!(game.can_castle_kingside(Color::Black));
    assert_eq!(4, game.halfmove_clock());
}

#[test]
fn queenside_castle_moves_rook() {
    let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").unwrap();
    play(&mut game, &["e8c8"]);

    let board = game.board();
    assert_eq!(Some(Piece::new(PieceKind::King, Color::Black)), board.piece_at(Square::C8));
    assert_eq!(Some(Piece::new(PieceKind::Rook, Color::Black)), board.piece_at(Square::D8));
    assert!(board.is_empty(Square::A8));
    assert_eq!("2kr3r/8/8/8/8/8/8/R3K2R w KQ - 1 2", game.as_fen());
}

#[test]
fn promotion_per_choice() {
    for &(letter, kind) in &[
        ('b', PieceKind::Bishop),
        ('n', PieceKind::Knight),
        ('q', PieceKind::Queen),
        ('r', PieceKind::Rook),
    ] {
        let mut game = GameState::from_fen("8/P6k/8/8/8/8/8/K7 w - - 5 40").unwrap();
        play(&mut game, &[&format!("a7a8{}", letter)]);
        assert_eq!(
            Some(Piece::new(kind, Color::White)),
            game.board().piece_at(Square::A8)
        );
        assert_eq!(0, game.halfmove_clock());
    }
}

#[test]
fn capture_promotion_clears_castle_right() {
    let mut game = GameState::from_fen("r3k3/1P6/8/8/8/8/8/4K3 w q - 0 1").unwrap();
    play(&mut game, &["b7a8q"]);
    assert!(!game.can_castle_queenside(Color::Black));
    assert_eq!(Some(PieceKind::Queen), game.board().piece_at(Square::A8).map(|p| p.kind));
}

#[test]
fn undo_round_trips_every_legal_move() {
    let fens = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
        "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
    ];

    for fen in &fens {
        let mut game = GameState::from_fen(fen).unwrap();
        let before_fen = game.as_fen();
        let before_board = *game.board();
        let before_count = game.repetition_count();
        for legal in game.legal_moves() {
            game.commit(legal);
            assert_eq!(1, game.undo(1), "undo after {}", legal);
            assert_eq!(before_fen, game.as_fen(), "after undoing {}", legal);
            assert_eq!(&before_board, game.board());
            assert_eq!(before_count, game.repetition_count());
        }
    }
}

#[test]
fn legal_moves_never_leave_king_attacked() {
    let fens = [
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    ];

    for fen in &fens {
        let game = GameState::from_fen(fen).unwrap();
        let mover = game.side_to_move();
        for legal in game.legal_moves() {
            let mut next = game.fork();
            next.commit(legal);
            assert!(!next.is_check(mover), "{} leaves the king attacked", legal);
        }
    }
}
