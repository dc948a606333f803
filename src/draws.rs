// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Check, mate, and the draw rules.
use std::fmt;

use crate::attacks::is_square_attacked;
use crate::board::Board;
use crate::game::GameState;
use crate::types::{Color, Piece, PieceKind};

/// Halfmove clock values, in plies, at which the move-count rules apply.
pub const FIFTY_MOVE_PLIES: u32 = 100;
pub const SEVENTY_FIVE_MOVE_PLIES: u32 = 150;

/// How a game ended, from the point of view of the side to move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    InsufficientMaterial,
    FivefoldRepetition,
    SeventyFiveMoveRule,
    ThreefoldRepetition,
    FiftyMoveRule,
}

impl Outcome {
    /// The machine-readable name of this result.
    pub fn result(&self) -> &'static str {
        match *self {
            Outcome::Checkmate { .. } => "checkmate",
            Outcome::Stalemate => "stalemate",
            Outcome::InsufficientMaterial => "insufficient_material",
            Outcome::FivefoldRepetition => "fivefold_repetition",
            Outcome::SeventyFiveMoveRule => "seventy_five_move_rule",
            Outcome::ThreefoldRepetition => "threefold_repetition",
            Outcome::FiftyMoveRule => "fifty_move_rule",
        }
    }

    pub fn winner(&self) -> Option<Color> {
        match *self {
            Outcome::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        self.winner().is_none()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Outcome::Checkmate { winner } => {
                write!(f, "Checkmate! {} wins.", color_name(winner))
            }
            Outcome::Stalemate => write!(f, "Draw by stalemate."),
            Outcome::InsufficientMaterial => write!(f, "Draw by insufficient material."),
            Outcome::FivefoldRepetition => write!(f, "Draw by fivefold repetition."),
            Outcome::SeventyFiveMoveRule => write!(f, "Draw by seventy-five-move rule."),
            Outcome::ThreefoldRepetition => write!(f, "Draw by threefold repetition."),
            Outcome::FiftyMoveRule => write!(f, "Draw by fifty-move rule."),
        }
    }
}

pub(crate) fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}

/// No pawns, rooks or queens remain, and the minor pieces left cannot force
/// mate: at most one, or exactly two that either belong to different sides
/// or are both knights.
pub fn insufficient_material(board: &Board) -> bool {
    let mut minors: Vec<Piece> = Vec::with_capacity(2);
    for (_, piece) in board.pieces() {
        match piece.kind {
            PieceKind::King => {}
            PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
            PieceKind::Knight | PieceKind::Bishop => {
                if minors.len() == 2 {
                    return false;
                }

                minors.push(piece);
            }
        }
    }

    match minors.as_slice() {
        [] | [_] => true,
        [first, second] => {
            first.color != second.color
                || (first.kind == PieceKind::Knight && second.kind == PieceKind::Knight)
        }
        _ => false,
    }
}

impl GameState {
    /// Whether `color`'s king is attacked by the other side.
    pub fn is_check(&self, color: Color) -> bool {
        is_square_attacked(self.board(), self.king_square(color), color.toggle())
    }

    pub fn is_checkmate(&self, color: Color) -> bool {
        self.is_check(color) && !self.has_any_legal_move(color)
    }

    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.is_check(color) && !self.has_any_legal_move(color)
    }

    pub fn is_threefold_repetition(&self) -> bool {
        self.repetition_count() >= 3
    }

    pub fn is_fivefold_repetition(&self) -> bool {
        self.repetition_count() >= 5
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock() >= FIFTY_MOVE_PLIES
    }

    pub fn is_seventy_five_move_draw(&self) -> bool {
        self.halfmove_clock() >= SEVENTY_FIVE_MOVE_PLIES
    }

    pub fn is_insufficient_material(&self) -> bool {
        insufficient_material(self.board())
    }

    /// The result of the game for the side to move, if it has ended. Mate
    /// and stalemate take priority over the automatic draws, which take
    /// priority over the claimable ones.
    pub fn outcome(&self) -> Option<Outcome> {
        let side = self.side_to_move();
        if !self.has_any_legal_move(side) {
            return if self.is_check(side) {
                Some(Outcome::Checkmate {
                    winner: side.toggle(),
                })
            } else {
                Some(Outcome::Stalemate)
            };
        }

        if self.is_insufficient_material() {
            Some(Outcome::InsufficientMaterial)
        } else if self.is_fivefold_repetition() {
            Some(Outcome::FivefoldRepetition)
        } else if self.is_seventy_five_move_draw() {
            Some(Outcome::SeventyFiveMoveRule)
        } else if self.is_threefold_repetition() {
            Some(Outcome::ThreefoldRepetition)
        } else if self.is_fifty_move_draw() {
            Some(Outcome::FiftyMoveRule)
        } else {
            None
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }
}
