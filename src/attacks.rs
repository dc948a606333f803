// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::board::Board;
use crate::movement::{self, pawn_attacks};
use crate::types::{Color, Piece, PieceKind, Square};

/// Returns whether `piece` on `from` attacks `to`. Pawns attack diagonally
/// forward whatever stands there; every other piece attacks exactly the
/// squares it could move to.
pub fn piece_attacks(board: &Board, piece: Piece, from: Square, to: Square) -> bool {
    match piece.kind {
        PieceKind::Pawn => pawn_attacks(piece.color, from, to),
        _ => movement::can_move(board, piece, from, to),
    }
}

/// Returns whether any piece of color `attacker` reaches `target`. This is a
/// pure reachability test over the board; castling and en passant play no
/// part in it.
pub fn is_square_attacked(board: &Board, target: Square, attacker: Color) -> bool {
    board
        .pieces_of(attacker)
        .any(|(square, piece)| piece_attacks(board, piece, square, target))
}
