// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::board::Board;
use crate::types::{CastleStatus, Color, Piece, PieceKind, Square};

/// The unit of equality for repetition detection: board contents, side to
/// move, castling rights and the *effective* en passant square.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PositionKey {
    board: Board,
    side_to_move: Color,
    castle_status: CastleStatus,
    en_passant_square: Option<Square>,
}

impl PositionKey {
    pub fn new(
        board: &Board,
        side_to_move: Color,
        castle_status: CastleStatus,
        en_passant_square: Option<Square>,
    ) -> PositionKey {
        PositionKey {
            board: *board,
            side_to_move,
            castle_status,
            en_passant_square: effective_en_passant(board, en_passant_square, side_to_move),
        }
    }

    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }
}

/// Returns the en passant square only if a pawn of the side to move stands
/// next to the double-stepped pawn, ready to capture it this ply.
pub fn effective_en_passant(
    board: &Board,
    en_passant_square: Option<Square>,
    side_to_move: Color,
) -> Option<Square> {
    let target = en_passant_square?;
    let capturer = Piece::new(PieceKind::Pawn, side_to_move);
    let back = -side_to_move.pawn_direction();
    let has_capturer = [-1, 1].iter().any(|&file_delta| {
        target
            .offset(back, file_delta)
            .and_then(|sq| board.piece_at(sq))
            == Some(capturer)
    });

    if has_capturer {
        Some(target)
    } else {
        None
    }
}
