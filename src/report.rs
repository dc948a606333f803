// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::draws::color_name;
use crate::game::GameState;

/// A serializable summary of a game's current status, for whatever serves
/// games to clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameReport {
    pub fen: String,
    pub turn: &'static str,
    pub fullmove: u32,
    pub halfmove: u32,
    pub castling: String,
    pub en_passant: Option<String>,
    pub check: bool,
    pub ended: bool,
    pub result: Option<&'static str>,
    pub winner: Option<&'static str>,
    pub message: String,
}

impl GameReport {
    pub fn new(game: &GameState) -> GameReport {
        let side = game.side_to_move();
        let check = game.is_check(side);
        let outcome = game.outcome();
        let message = match outcome {
            Some(ref outcome) => outcome.to_string(),
            None if check => format!("{} to move. {} is in check.", color_name(side), color_name(side)),
            None => format!("{} to move.", color_name(side)),
        };

        GameReport {
            fen: game.as_fen(),
            turn: color_name(side),
            fullmove: game.fullmove_number(),
            halfmove: game.halfmove_clock(),
            castling: game.castle_status().to_string(),
            en_passant: game.en_passant_square().map(|sq| sq.to_string()),
            check,
            ended: outcome.is_some(),
            result: outcome.map(|o| o.result()),
            winner: outcome.and_then(|o| o.winner()).map(color_name),
            message,
        }
    }
}
