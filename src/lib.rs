// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A chess rules engine with a shallow move selector.
//!
//! `GameState` is the root of everything: it parses and emits FEN,
//! enumerates and validates legal moves, commits and undoes them, and
//! detects check, mate and the draw rules. The `search` module picks moves
//! for an automated opponent on top of that.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

pub mod attacks;
mod board;
pub mod draws;
pub mod eval;
mod fen;
mod game;
mod legality;
pub mod movement;
mod moves;
mod perft;
mod position_key;
pub mod record;
pub mod report;
pub mod search;
mod types;
pub mod uci;

pub use board::Board;
pub use draws::{insufficient_material, Outcome};
pub use fen::FenParseError;
pub use game::GameState;
pub use legality::{parse_uci_move, MoveError};
pub use moves::{LegalMove, Move, MoveKind};
pub use perft::{divide, perft};
pub use position_key::{effective_en_passant, PositionKey};
pub use types::{CastleStatus, Color, File, Piece, PieceKind, Rank, Square};
pub use types::PROMOTION_CHOICES;
