// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::game::GameState;
use crate::types::Color;

mod material_evaluator;

pub use material_evaluator::{material_balance, MaterialEvaluator};

/// Scores a position from the point of view of `perspective`: larger is
/// better for that side.
pub trait BoardEvaluator: Default + Sync {
    fn evaluate(&self, game: &GameState, perspective: Color) -> i32;
}
