// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::board::Board;
use crate::eval::BoardEvaluator;
use crate::game::GameState;
use crate::types::Color;

pub const MATE_SCORE: i32 = 10_000;
const MATERIAL_WEIGHT: i32 = 10;
const CHECK_WEIGHT: i32 = 3;

/// Material plus a small bonus for giving check. Mates score `MATE_SCORE`,
/// stalemates zero.
pub struct MaterialEvaluator;

impl MaterialEvaluator {
    pub fn new() -> MaterialEvaluator {
        MaterialEvaluator
    }
}

impl Default for MaterialEvaluator {
    fn default() -> MaterialEvaluator {
        MaterialEvaluator
    }
}

impl BoardEvaluator for MaterialEvaluator {
    fn evaluate(&self, game: &GameState, perspective: Color) -> i32 {
        let side_to_move = game.side_to_move();
        if !game.has_any_legal_move(side_to_move) {
            if !game.is_check(side_to_move) {
                return 0;
            }

            // the side to move is the one that got mated.
            return if side_to_move == perspective {
                -MATE_SCORE
            } else {
                MATE_SCORE
            };
        }

        let mut score = MATERIAL_WEIGHT * material_balance(game.board(), perspective);
        if game.is_check(perspective.toggle()) {
            score += CHECK_WEIGHT;
        }

        if game.is_check(perspective) {
            score -= CHECK_WEIGHT;
        }

        score
    }
}

/// Sum of piece values for `perspective` minus the opponent's.
pub fn material_balance(board: &Board, perspective: Color) -> i32 {
    board
        .pieces()
        .map(|(_, piece)| {
            let value = piece.kind.value();
            if piece.color == perspective {
                value
            } else {
                -value
            }
        })
        .sum()
}
