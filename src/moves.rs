// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `moves` module contains the definition of moves as produced by the
//! legality pipeline.
//!
//! A `Move` is a fully-described, structurally validated move: it knows the
//! piece that moves, what (if anything) it captures and where that piece
//! stands, and whether it is one of the special moves of chess. Moves are
//! derived fresh from the current board on every query and are never cached
//! across turns.
//!
//! A `LegalMove` pairs a `Move` with the promotion choice it will be played
//! with. It is the unit handed out by move enumeration and the only thing
//! `GameState::commit` accepts, so nothing can reach the board without
//! passing the legality pipeline first.
use std::fmt;

use crate::types::{Color, File, Piece, PieceKind, Square};

/// The special-move tag of a move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveKind {
    Normal,
    EnPassant,
    KingsideCastle,
    QueensideCastle,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    source: Square,
    destination: Square,
    piece: Piece,
    captured: Option<Piece>,
    capture_square: Option<Square>,
    kind: MoveKind,
    promotion_required: bool,
}

impl Move {
    /// A plain move or capture. The captured piece, if any, stands on the
    /// destination square.
    pub(crate) fn normal(
        source: Square,
        destination: Square,
        piece: Piece,
        captured: Option<Piece>,
    ) -> Move {
        Move {
            source,
            destination,
            piece,
            captured,
            capture_square: captured.map(|_| destination),
            kind: MoveKind::Normal,
            promotion_required: false,
        }
    }

    /// An en passant capture. The captured pawn stands beside the source
    /// square, not on the destination.
    pub(crate) fn en_passant(source: Square, destination: Square, piece: Piece) -> Move {
        let capture_square = Square::of(source.rank(), destination.file());
        Move {
            source,
            destination,
            piece,
            captured: Some(Piece::new(PieceKind::Pawn, piece.color.toggle())),
            capture_square: Some(capture_square),
            kind: MoveKind::EnPassant,
            promotion_required: false,
        }
    }

    pub(crate) fn castle(source: Square, destination: Square, piece: Piece, kind: MoveKind) -> Move {
        debug_assert!(kind == MoveKind::KingsideCastle || kind == MoveKind::QueensideCastle);
        Move {
            source,
            destination,
            piece,
            captured: None,
            capture_square: None,
            kind,
            promotion_required: false,
        }
    }

    pub(crate) fn requiring_promotion(mut self) -> Move {
        self.promotion_required = true;
        self
    }

    pub fn source(&self) -> Square {
        self.source
    }

    pub fn destination(&self) -> Square {
        self.destination
    }

    pub fn piece(&self) -> Piece {
        self.piece
    }

    pub fn color(&self) -> Color {
        self.piece.color
    }

    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }

    /// The square the captured piece is removed from. Differs from the
    /// destination only for en passant.
    pub fn capture_square(&self) -> Option<Square> {
        self.capture_square
    }

    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    pub fn is_en_passant(&self) -> bool {
        self.kind == MoveKind::EnPassant
    }

    pub fn is_castle(&self) -> bool {
        self.is_kingside_castle() || self.is_queenside_castle()
    }

    pub fn is_kingside_castle(&self) -> bool {
        self.kind == MoveKind::KingsideCastle
    }

    pub fn is_queenside_castle(&self) -> bool {
        self.kind == MoveKind::QueensideCastle
    }

    pub fn requires_promotion(&self) -> bool {
        self.promotion_required
    }

    pub fn is_double_pawn_push(&self) -> bool {
        self.piece.kind == PieceKind::Pawn
            && (self.destination.rank() as i32 - self.source.rank() as i32).abs() == 2
    }

    /// For castles, the rook's (from, to) squares.
    pub fn castle_rook_squares(&self) -> Option<(Square, Square)> {
        let rank = self.source.rank();
        match self.kind {
            MoveKind::KingsideCastle => Some((
                Square::of(rank, File::H),
                Square::of(rank, File::F),
            )),
            MoveKind::QueensideCastle => Some((
                Square::of(rank, File::A),
                Square::of(rank, File::D),
            )),
            _ => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.source, self.destination)
    }
}

/// A move that has passed the full legality pipeline, together with the
/// promotion choice it is played with (None unless the move promotes).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LegalMove {
    mov: Move,
    promotion: Option<PieceKind>,
}

impl LegalMove {
    pub(crate) fn new(mov: Move, promotion: Option<PieceKind>) -> LegalMove {
        debug_assert_eq!(mov.requires_promotion(), promotion.is_some());
        LegalMove { mov, promotion }
    }

    pub fn mov(&self) -> &Move {
        &self.mov
    }

    pub fn promotion(&self) -> Option<PieceKind> {
        self.promotion
    }

    /// The canonical token for this move: `<from><to>[promotion]`, lowercase.
    pub fn to_uci(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LegalMove {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.mov)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind)?;
        }

        Ok(())
    }
}
