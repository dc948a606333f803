// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use rayon::prelude::*;

use crate::game::GameState;

/// Counts the leaf nodes of the legal move tree `depth` plies deep. Every
/// node goes through the full legality pipeline, so this doubles as a check
/// of the rules against published counts.
pub fn perft(game: &GameState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = game.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .par_iter()
        .map(|&legal| {
            let mut next = game.fork();
            next.commit(legal);
            perft(&next, depth - 1)
        })
        .sum()
}

/// Per-root-move node counts, in enumeration order.
pub fn divide(game: &GameState, depth: u32) -> Vec<(String, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    game.legal_moves()
        .par_iter()
        .map(|&legal| {
            let mut next = game.fork();
            next.commit(legal);
            (legal.to_uci(), perft(&next, depth - 1))
        })
        .collect()
}
