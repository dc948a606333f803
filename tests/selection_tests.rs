// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use rand::rngs::StdRng;
use rand::SeedableRng;

use gambit::report::GameReport;
use gambit::search::{choose_move, Level, Provenance, SelectorConfig};
use gambit::GameState;

fn play_out(white: Level, black: Level, seed: u64, max_plies: u32) -> GameState {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = GameState::new();
    for _ in 0..max_plies {
        if game.is_game_over() {
            break;
        }

        let level = if game.side_to_move() == gambit::Color::White {
            white
        } else {
            black
        };

        let selection = choose_move(&game, &SelectorConfig::new(level), None, &mut rng)
            .expect("a live game always has a move");
        game.apply_uci_move(&selection.token).unwrap();
    }

    game
}

#[test]
fn seeded_selfplay_is_reproducible() {
    let first = play_out(Level::Easy, Level::Hard, 42, 40);
    let second = play_out(Level::Easy, Level::Hard, 42, 40);
    assert_eq!(first.as_fen(), second.as_fen());
}

#[test]
fn selfplay_only_makes_legal_moves() {
    let game = play_out(Level::Easy, Level::Easy, 7, 60);
    assert!(game.history_len() <= 60);
    let report = GameReport::new(&game);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(game.as_fen(), json["fen"]);
}

#[test]
fn very_hard_selection_reproducible_under_parallel_evaluation() {
    let game = GameState::from_fen(
        "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5Q2/PPPP1PPP/RNB1K1NR w KQkq - 2 3",
    )
    .unwrap();

    let config = SelectorConfig::new(Level::VeryHard);
    let first = choose_move(&game, &config, None, &mut StdRng::seed_from_u64(1)).unwrap();
    for _ in 0..3 {
        let again = choose_move(&game, &config, None, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(first, again);
    }

    // scholar's mate is available.
    assert_eq!("f3f7", first.token);
    assert_eq!(Provenance::VeryHard, first.provenance);
}

#[test]
fn selection_serializes_with_provenance() {
    let game = GameState::new();
    let config = SelectorConfig::new(Level::from_name("Very-Hard"));
    let selection = choose_move(&game, &config, None, &mut StdRng::seed_from_u64(3)).unwrap();
    let json = serde_json::to_value(&selection).unwrap();
    assert_eq!("very_hard", json["provenance"]);
    assert!(game.move_from_uci(json["token"].as_str().unwrap()).is_some());
}
