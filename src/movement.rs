// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Geometric movement rules, one per piece kind.
//!
//! Each rule answers "can this piece travel from `from` to `to` given only
//! the occupancy of the board", ignoring check, castling rights and en
//! passant. Destination occupancy is not judged here except by the pawn,
//! whose forward and diagonal moves depend on it; the move builder is
//! responsible for rejecting friendly-occupied destinations.
use crate::board::Board;
use crate::types::TableIndex;
use crate::types::{Color, Piece, PieceKind, Square};

pub type MoveRule = fn(&Board, Piece, Square, Square) -> bool;

/// Movement rules indexed by `PieceKind`.
static MOVE_RULES: [MoveRule; 6] = [
    pawn_moves,
    knight_moves,
    bishop_moves,
    rook_moves,
    queen_moves,
    king_moves,
];

/// Returns whether `piece` standing on `from` can move to `to`.
pub fn can_move(board: &Board, piece: Piece, from: Square, to: Square) -> bool {
    if from == to {
        return false;
    }

    MOVE_RULES[piece.kind.as_index()](board, piece, from, to)
}

fn deltas(from: Square, to: Square) -> (i32, i32) {
    let rank_delta = to.rank().as_index() as i32 - from.rank().as_index() as i32;
    let file_delta = to.file().as_index() as i32 - from.file().as_index() as i32;
    (rank_delta, file_delta)
}

/// Every square strictly between `from` and `to` must be empty. Callers
/// guarantee the two squares share a rank, file or diagonal.
fn clear_path(board: &Board, from: Square, to: Square) -> bool {
    let (rank_delta, file_delta) = deltas(from, to);
    let step = (rank_delta.signum(), file_delta.signum());
    let mut current = from;
    loop {
        current = match current.offset(step.0, step.1) {
            Some(sq) => sq,
            None => return false,
        };

        if current == to {
            return true;
        }

        if !board.is_empty(current) {
            return false;
        }
    }
}

/// The squares a pawn attacks: one step diagonally forward, regardless of
/// what stands there.
pub fn pawn_attacks(color: Color, from: Square, to: Square) -> bool {
    let (rank_delta, file_delta) = deltas(from, to);
    rank_delta == color.pawn_direction() && file_delta.abs() == 1
}

pub fn pawn_moves(board: &Board, piece: Piece, from: Square, to: Square) -> bool {
    let (rank_delta, file_delta) = deltas(from, to);
    let dir = piece.color.pawn_direction();

    if file_delta == 0 {
        if rank_delta == dir && board.is_empty(to) {
            return true;
        }

        if from.rank() == piece.color.pawn_rank() && rank_delta == 2 * dir {
            let passed = from
                .offset(dir, 0)
                .expect("pawn on its start rank always has a square ahead");
            return board.is_empty(passed) && board.is_empty(to);
        }

        return false;
    }

    if pawn_attacks(piece.color, from, to) {
        if let Some(target) = board.piece_at(to) {
            return target.color != piece.color;
        }
    }

    false
}

pub fn knight_moves(_: &Board, _: Piece, from: Square, to: Square) -> bool {
    let (rank_delta, file_delta) = deltas(from, to);
    let (r, f) = (rank_delta.abs(), file_delta.abs());
    (r == 1 && f == 2) || (r == 2 && f == 1)
}

pub fn bishop_moves(board: &Board, _: Piece, from: Square, to: Square) -> bool {
    let (rank_delta, file_delta) = deltas(from, to);
    rank_delta != 0 && rank_delta.abs() == file_delta.abs() && clear_path(board, from, to)
}

pub fn rook_moves(board: &Board, _: Piece, from: Square, to: Square) -> bool {
    let (rank_delta, file_delta) = deltas(from, to);
    (rank_delta == 0) != (file_delta == 0) && clear_path(board, from, to)
}

pub fn queen_moves(board: &Board, piece: Piece, from: Square, to: Square) -> bool {
    rook_moves(board, piece, from, to) || bishop_moves(board, piece, from, to)
}

/// A single step in any direction. Castling needs game state and is handled
/// by the move builder.
pub fn king_moves(_: &Board, _: Piece, from: Square, to: Square) -> bool {
    let (rank_delta, file_delta) = deltas(from, to);
    from != to && rank_delta.abs() <= 1 && file_delta.abs() <= 1
}
