// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use gambit::{Color, GameState, Outcome, PositionKey, Square};

#[test]
fn smoke_test_starting_position() {
    let game = GameState::new();

    // white is not in check.
    assert!(!game.is_check(Color::White));
    assert_eq!(20, game.legal_moves().len());
    assert_eq!(None, game.outcome());
}

#[test]
fn fools_mate_check() {
    let game = GameState::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
        .unwrap();

    // white is checkmated
    assert!(game.is_check(Color::White));
    assert!(game.is_checkmate(Color::White));
    assert!(game.is_game_over());
    assert_eq!(Some(Color::Black), game.outcome().and_then(|o| o.winner()));
}

#[test]
fn sliding_piece_pin() {
    let game = GameState::from_fen("4k3/8/4q3/8/8/8/4P3/4K3 w - - 0 1").unwrap();

    // white is not checked, the white pawn is blocking the queen
    assert!(!game.is_check(Color::White));
}

#[test]
fn stalemate_is_not_checkmate() {
    let game = GameState::from_fen("k7/2Q5/2K5/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(game.is_stalemate(Color::Black));
    assert!(!game.is_checkmate(Color::Black));
    assert_eq!(Some(Outcome::Stalemate), game.outcome());
    assert_eq!("Draw by stalemate.", game.outcome().unwrap().to_string());
}

#[test]
fn fifty_move_rule_reached_by_play() {
    let mut game = GameState::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 98 60").unwrap();
    game.apply_uci_move("a1a2").unwrap();
    assert_eq!(99, game.halfmove_clock());
    assert!(!game.is_fifty_move_draw());

    game.apply_uci_move("e8d8").unwrap();
    assert_eq!(100, game.halfmove_clock());
    assert!(game.is_fifty_move_draw());
    assert!(!game.is_seventy_five_move_draw());
    assert_eq!(Some(Outcome::FiftyMoveRule), game.outcome());
}

#[test]
fn seventy_five_move_rule_reached_by_play() {
    let mut game = GameState::from_fen("4k3/8/8/8/8/8/8/R3K3 b - - 148 60").unwrap();
    game.apply_uci_move("e8d8").unwrap();
    assert!(!game.is_seventy_five_move_draw());
    game.apply_uci_move("a1a2").unwrap();
    assert!(game.is_seventy_five_move_draw());
    assert_eq!(Some(Outcome::SeventyFiveMoveRule), game.outcome());
}

#[test]
fn pawn_move_resets_the_clock() {
    let mut game = GameState::from_fen("4k3/8/8/8/8/8/4P3/R3K3 w - - 99 60").unwrap();
    game.apply_uci_move("e2e3").unwrap();
    assert_eq!(0, game.halfmove_clock());
    assert!(!game.is_fifty_move_draw());
}

#[test]
fn insufficient_material_cases() {
    let drawn = [
        "4k3/8/8/8/8/8/8/4K3 w - - 0 1",
        "4k3/8/8/8/8/8/8/2B1K3 w - - 0 1",
        "4k3/8/8/8/8/8/8/1N2K3 b - - 0 1",
        "1n2k3/8/8/8/8/8/8/1N2K3 w - - 0 1",
    ];
    for fen in &drawn {
        let game = GameState::from_fen(fen).unwrap();
        assert!(game.is_insufficient_material(), "{}", fen);
        assert_eq!(Some(Outcome::InsufficientMaterial), game.outcome(), "{}", fen);
    }

    let live = [
        "4k3/8/8/8/8/8/8/1NB1K3 w - - 0 1",
        "4k3/8/8/8/8/8/8/2B1KB2 w - - 0 1",
        "4k3/8/8/8/8/8/8/R3K3 w - - 0 1",
        "4k3/p7/8/8/8/8/8/4K3 w - - 0 1",
        "4k3/8/8/8/8/8/8/3QK3 w - - 0 1",
    ];
    for fen in &live {
        let game = GameState::from_fen(fen).unwrap();
        assert!(!game.is_insufficient_material(), "{}", fen);
    }
}

#[test]
fn threefold_repetition_by_knight_shuffle() {
    let mut game = GameState::new();
    for _ in 0..2 {
        for token in &["b1c3", "b8c6", "c3b1", "c6b8"] {
            assert!(!game.is_threefold_repetition());
            game.apply_uci_move(token).unwrap();
        }
    }

    assert_eq!(3, game.repetition_count());
    assert!(game.is_threefold_repetition());
    assert!(!game.is_fivefold_repetition());
    assert_eq!(
        "Draw by threefold repetition.",
        game.outcome().unwrap().to_string()
    );
}

#[test]
fn repetition_ignores_uncapturable_en_passant() {
    // after 1. e4 the en passant square is set but no black pawn can use it,
    // so the position repeats the one reached by other move orders.
    let mut game = GameState::new();
    for token in &["e2e4", "g8f6", "g1f3", "f6g8", "f3g1"] {
        game.apply_uci_move(token).unwrap();
    }

    let direct = GameState::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
        .unwrap();
    let no_ep = GameState::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1")
        .unwrap();
    assert_eq!(direct.position_key(), no_ep.position_key());
    assert_eq!(direct.position_key(), game.position_key());
    assert_eq!(2, game.repetition_count());
}

#[test]
fn capturable_en_passant_distinguishes_positions() {
    let with_ep = GameState::from_fen("4k3/8/8/8/4Pp2/8/8/4K3 b - e3 0 1").unwrap();
    let without = GameState::from_fen("4k3/8/8/8/4Pp2/8/8/4K3 b - - 0 1").unwrap();
    assert_ne!(with_ep.position_key(), without.position_key());
    assert_eq!(Some(Square::E3), with_ep.position_key().en_passant_square());
}

#[test]
fn position_key_is_reflexive() {
    let game = GameState::new();
    let key: PositionKey = game.position_key();
    assert_eq!(key, game.clone().position_key());
}
