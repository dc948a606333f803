// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate criterion;

use criterion::black_box;
use criterion::Criterion;
use rand::rngs::StdRng;
use rand::SeedableRng;

use gambit::attacks;
use gambit::search::select_very_hard;
use gambit::{Color, GameState, Square};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("square attacked f5 kiwipete", |b| {
        let game = GameState::from_fen(KIWIPETE).unwrap();
        b.iter(|| attacks::is_square_attacked(game.board(), black_box(Square::F5), Color::Black))
    });

    c.bench_function("game state clone", |b| {
        let game = GameState::new();
        b.iter(|| black_box(&game).clone())
    });

    c.bench_function("legal moves start", |b| {
        let game = GameState::new();
        b.iter(|| black_box(&game).legal_moves())
    });

    c.bench_function("legal moves kiwipete", |b| {
        let game = GameState::from_fen(KIWIPETE).unwrap();
        b.iter(|| black_box(&game).legal_moves())
    });

    c.bench_function("very hard selection start", |b| {
        let game = GameState::new();
        let mut rng = StdRng::seed_from_u64(7);
        b.iter(|| select_very_hard(black_box(&game), &mut rng))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
