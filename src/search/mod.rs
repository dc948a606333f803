// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Move selection for an automated opponent.
//!
//! Selection is stateless: given a game and a `SelectorConfig`, it returns a
//! move token and a `Provenance` naming what produced it. An external
//! `MoveDelegate` may be consulted first; whenever it has nothing usable to
//! offer, the tier named by the configured `Level` runs instead.
use std::fmt;

mod level;
mod selector;

pub use level::{Budget, Level, SelectorConfig};
pub use selector::{choose_move, select_easy, select_hard, select_very_hard, select_very_hard_with};

/// Which selector produced a move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Delegate,
    Easy,
    Hard,
    VeryHard,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            Provenance::Delegate => "delegate",
            Provenance::Easy => "easy",
            Provenance::Hard => "hard",
            Provenance::VeryHard => "very_hard",
        };

        write!(f, "{}", name)
    }
}

/// A chosen move, as a token, and what chose it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub token: String,
    pub provenance: Provenance,
}

impl Selection {
    pub fn new<S: Into<String>>(token: S, provenance: Provenance) -> Selection {
        Selection {
            token: token.into(),
            provenance,
        }
    }
}

/// A source of move suggestions outside this crate, typically a stronger
/// engine. Given a position in FEN and a budget, it returns a move token or
/// None. Suggestions are validated before use.
pub trait MoveDelegate {
    fn suggest(&self, fen: &str, budget: &Budget) -> Option<String>;
}
